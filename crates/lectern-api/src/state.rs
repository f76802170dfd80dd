//! Shared application state.

use std::sync::Arc;

use lectern_core::catalog::CourseCatalog;
use lectern_core::clock::{Clock, SystemClock};
use lectern_core::progress::ProgressRepository;
use lectern_core::purchase::PurchaseLedger;
use lectern_store::pg_course_catalog::PgCourseCatalog;
use lectern_store::pg_progress_repository::PgProgressRepository;
use lectern_store::pg_purchase_ledger::PgPurchaseLedger;
use sqlx::PgPool;

/// Application state shared across all request handlers.
///
/// Collaborators are trait objects so tests can swap in the in-memory
/// stores from `lectern-test-support`.
#[derive(Clone)]
pub struct AppState {
    /// Source of timestamps.
    pub clock: Arc<dyn Clock>,
    /// Course documents.
    pub catalog: Arc<dyn CourseCatalog>,
    /// Purchase authorization.
    pub purchases: Arc<dyn PurchaseLedger>,
    /// Learner progress.
    pub progress: Arc<dyn ProgressRepository>,
}

impl AppState {
    /// Create new application state from explicit collaborators.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        catalog: Arc<dyn CourseCatalog>,
        purchases: Arc<dyn PurchaseLedger>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            purchases,
            progress,
        }
    }

    /// Create production state backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(SystemClock),
            Arc::new(PgCourseCatalog::new(pool.clone())),
            Arc::new(PgPurchaseLedger::new(pool.clone())),
            Arc::new(PgProgressRepository::new(pool)),
        )
    }
}
