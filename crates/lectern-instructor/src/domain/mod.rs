//! Domain layer for the Instructor Course Authoring context.

pub mod commands;
pub mod drafts;
