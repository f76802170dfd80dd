//! Test purchase ledgers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use lectern_core::error::DomainError;
use lectern_core::purchase::{PurchaseLedger, PurchasedCourse};
use uuid::Uuid;

/// A ledger kept in a map of learner to purchased courses.
#[derive(Debug, Default)]
pub struct InMemoryPurchaseLedger {
    purchases: Mutex<HashMap<Uuid, Vec<PurchasedCourse>>>,
}

impl InMemoryPurchaseLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger where `user_id` already owns `purchases`.
    #[must_use]
    pub fn with_purchases(user_id: Uuid, purchases: Vec<PurchasedCourse>) -> Self {
        Self {
            purchases: Mutex::new(HashMap::from([(user_id, purchases)])),
        }
    }
}

#[async_trait]
impl PurchaseLedger for InMemoryPurchaseLedger {
    async fn is_purchased(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, DomainError> {
        Ok(self
            .purchases
            .lock()
            .unwrap()
            .get(&user_id)
            .is_some_and(|owned| owned.iter().any(|p| p.course_id == course_id)))
    }

    async fn purchased_courses(&self, user_id: Uuid) -> Result<Vec<PurchasedCourse>, DomainError> {
        Ok(self
            .purchases
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn record_purchase(
        &self,
        user_id: Uuid,
        purchase: PurchasedCourse,
    ) -> Result<PurchasedCourse, DomainError> {
        let mut purchases = self.purchases.lock().unwrap();
        let owned = purchases.entry(user_id).or_default();
        if let Some(existing) = owned.iter().find(|p| p.course_id == purchase.course_id) {
            return Ok(existing.clone());
        }
        owned.push(purchase.clone());
        Ok(purchase)
    }
}

/// A ledger whose every call fails with `StoreUnavailable`.
#[derive(Debug)]
pub struct FailingPurchaseLedger;

#[async_trait]
impl PurchaseLedger for FailingPurchaseLedger {
    async fn is_purchased(&self, _user_id: Uuid, _course_id: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn purchased_courses(&self, _user_id: Uuid) -> Result<Vec<PurchasedCourse>, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn record_purchase(
        &self,
        _user_id: Uuid,
        _purchase: PurchasedCourse,
    ) -> Result<PurchasedCourse, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }
}
