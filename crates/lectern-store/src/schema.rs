//! Database schema.
//!
//! Tables are created by the SQL migrations in the workspace `migrations/`
//! directory, embedded here at compile time.

use sqlx::migrate::Migrator;

/// Embedded migrations for every Lectern table.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");
