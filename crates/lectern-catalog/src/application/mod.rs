//! Application layer for the Catalog & Enrollment context.

pub mod command_handlers;
pub mod query_handlers;
