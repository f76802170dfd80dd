//! Purchase records and the purchase-authorization collaborator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// A course in a learner's purchased list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedCourse {
    /// The purchased course.
    pub course_id: Uuid,
    /// Course title at purchase time.
    pub title: String,
    /// Course instructor.
    pub instructor_id: Uuid,
    /// Instructor display name.
    pub instructor_name: String,
    /// When payment was captured.
    pub purchased_at: DateTime<Utc>,
    /// Cover image URL.
    pub course_image: String,
}

/// Per-learner purchase records.
#[async_trait]
pub trait PurchaseLedger: Send + Sync {
    /// Returns whether `user_id` owns `course_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` on backend failure.
    async fn is_purchased(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, DomainError>;

    /// Lists every course the learner owns, oldest purchase first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` on backend failure.
    async fn purchased_courses(&self, user_id: Uuid) -> Result<Vec<PurchasedCourse>, DomainError>;

    /// Records a captured purchase and returns the record the ledger holds.
    /// Recording the same course twice keeps, and returns, the first record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` on backend failure.
    async fn record_purchase(
        &self,
        user_id: Uuid,
        purchase: PurchasedCourse,
    ) -> Result<PurchasedCourse, DomainError>;
}
