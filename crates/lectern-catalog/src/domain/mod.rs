//! Domain layer for the Catalog & Enrollment context.

pub mod commands;
