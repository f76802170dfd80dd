//! `PostgreSQL` implementation of the `PurchaseLedger` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use lectern_core::error::DomainError;
use lectern_core::purchase::{PurchaseLedger, PurchasedCourse};

use crate::store_error;

#[derive(Debug, FromRow)]
struct PurchaseRow {
    course_id: Uuid,
    title: String,
    instructor_id: Uuid,
    instructor_name: String,
    purchased_at: DateTime<Utc>,
    course_image: String,
}

impl From<PurchaseRow> for PurchasedCourse {
    fn from(row: PurchaseRow) -> Self {
        Self {
            course_id: row.course_id,
            title: row.title,
            instructor_id: row.instructor_id,
            instructor_name: row.instructor_name,
            purchased_at: row.purchased_at,
            course_image: row.course_image,
        }
    }
}

/// PostgreSQL-backed purchase ledger.
#[derive(Debug, Clone)]
pub struct PgPurchaseLedger {
    pool: PgPool,
}

impl PgPurchaseLedger {
    /// Creates a new `PgPurchaseLedger`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseLedger for PgPurchaseLedger {
    async fn is_purchased(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM purchases WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn purchased_courses(&self, user_id: Uuid) -> Result<Vec<PurchasedCourse>, DomainError> {
        let rows: Vec<PurchaseRow> = sqlx::query_as(
            "SELECT course_id, title, instructor_id, instructor_name, purchased_at, course_image \
             FROM purchases WHERE user_id = $1 ORDER BY purchased_at, course_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(rows.into_iter().map(PurchasedCourse::from).collect())
    }

    async fn record_purchase(
        &self,
        user_id: Uuid,
        purchase: PurchasedCourse,
    ) -> Result<PurchasedCourse, DomainError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row: PurchaseRow = sqlx::query_as(
            "INSERT INTO purchases \
             (user_id, course_id, title, instructor_id, instructor_name, course_image, purchased_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (user_id, course_id) DO UPDATE SET user_id = purchases.user_id \
             RETURNING course_id, title, instructor_id, instructor_name, purchased_at, course_image",
        )
        .bind(user_id)
        .bind(purchase.course_id)
        .bind(&purchase.title)
        .bind(purchase.instructor_id)
        .bind(&purchase.instructor_name)
        .bind(&purchase.course_image)
        .bind(purchase.purchased_at)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.into())
    }
}
