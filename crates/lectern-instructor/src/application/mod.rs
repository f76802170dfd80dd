//! Application layer for the Instructor Course Authoring context.

pub mod command_handlers;
pub mod query_handlers;
