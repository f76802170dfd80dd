//! Lectern Store: `PostgreSQL` implementations of the core collaborator
//! traits.

pub mod pg_course_catalog;
pub mod pg_progress_repository;
pub mod pg_purchase_ledger;
pub mod schema;

use lectern_core::error::DomainError;

/// Maps a driver error to the retryable store failure.
pub(crate) fn store_error(err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "database operation failed");
    DomainError::StoreUnavailable(err.to_string())
}
