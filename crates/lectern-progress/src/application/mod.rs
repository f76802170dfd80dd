//! Application layer for the Course Progress context.

pub mod command_handlers;
pub mod query_handlers;
