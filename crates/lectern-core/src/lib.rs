//! Lectern Core: shared domain abstractions.
//!
//! This crate defines the record types, collaborator traits and error
//! taxonomy that the progress and catalog contexts depend on. It contains
//! no infrastructure code; storage lives in `lectern-store`.

pub mod catalog;
pub mod clock;
pub mod command;
pub mod error;
pub mod progress;
pub mod purchase;
