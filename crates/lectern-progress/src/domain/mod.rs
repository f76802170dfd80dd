//! Domain layer for the Course Progress context.

pub mod aggregates;
pub mod commands;
