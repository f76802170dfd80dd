//! `PostgreSQL` implementation of the `ProgressRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use lectern_core::error::DomainError;
use lectern_core::progress::{CourseProgress, LectureProgress, ProgressKey, ProgressRepository};

use crate::store_error;

/// One row of the aggregate joined with one of its lecture records. The
/// lecture columns are `NULL` when nothing has been viewed.
#[derive(Debug, FromRow)]
struct ProgressJoinRow {
    completed: bool,
    completion_date: Option<DateTime<Utc>>,
    lecture_id: Option<Uuid>,
    viewed: Option<bool>,
    viewed_at: Option<DateTime<Utc>>,
}

impl ProgressJoinRow {
    fn lecture(&self) -> Option<LectureProgress> {
        Some(LectureProgress {
            lecture_id: self.lecture_id?,
            viewed: self.viewed?,
            viewed_at: self.viewed_at?,
        })
    }
}

/// PostgreSQL-backed progress store.
///
/// The aggregate row lives in `course_progress`; viewed lectures live in
/// `lecture_progress` and cascade on reset.
#[derive(Debug, Clone)]
pub struct PgProgressRepository {
    pool: PgPool,
}

impl PgProgressRepository {
    /// Creates a new `PgProgressRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn reload(&self, key: ProgressKey) -> Result<CourseProgress, DomainError> {
        // A concurrent reset can delete the row between the write and this read.
        Ok(self
            .load_progress(key)
            .await?
            .unwrap_or_else(|| CourseProgress::empty(key)))
    }
}

#[async_trait]
impl ProgressRepository for PgProgressRepository {
    async fn load_progress(&self, key: ProgressKey) -> Result<Option<CourseProgress>, DomainError> {
        // One statement, one snapshot: a concurrent reset cannot split the
        // aggregate flag from its lecture records.
        let rows: Vec<ProgressJoinRow> = sqlx::query_as(
            "SELECT cp.completed, cp.completion_date, lp.lecture_id, lp.viewed, lp.viewed_at \
             FROM course_progress cp \
             LEFT JOIN lecture_progress lp \
               ON lp.user_id = cp.user_id AND lp.course_id = cp.course_id \
             WHERE cp.user_id = $1 AND cp.course_id = $2 \
             ORDER BY lp.viewed_at, lp.lecture_id",
        )
        .bind(key.user_id)
        .bind(key.course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        let Some(first) = rows.first() else {
            return Ok(None);
        };

        Ok(Some(CourseProgress {
            user_id: key.user_id,
            course_id: key.course_id,
            completed: first.completed,
            completion_date: first.completion_date,
            lecture_progress: rows.iter().filter_map(ProgressJoinRow::lecture).collect(),
        }))
    }

    async fn upsert_lecture_viewed(
        &self,
        key: ProgressKey,
        lecture_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        sqlx::query(
            "INSERT INTO course_progress (user_id, course_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, course_id) DO NOTHING",
        )
        .bind(key.user_id)
        .bind(key.course_id)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;

        sqlx::query(
            "INSERT INTO lecture_progress (user_id, course_id, lecture_id, viewed, viewed_at) \
             VALUES ($1, $2, $3, TRUE, $4) \
             ON CONFLICT (user_id, course_id, lecture_id) DO UPDATE \
             SET viewed = TRUE, viewed_at = EXCLUDED.viewed_at \
             WHERE NOT lecture_progress.viewed",
        )
        .bind(key.user_id)
        .bind(key.course_id)
        .bind(lecture_id)
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;
        self.reload(key).await
    }

    async fn complete_if_all_viewed(
        &self,
        key: ProgressKey,
        lecture_ids: &[Uuid],
        at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError> {
        // Row lock on the aggregate plus the `completed = FALSE` guard makes
        // the transition fire at most once.
        let result = sqlx::query(
            "UPDATE course_progress cp SET completed = TRUE, completion_date = $3 \
             WHERE cp.user_id = $1 AND cp.course_id = $2 AND cp.completed = FALSE \
             AND (SELECT COUNT(DISTINCT lp.lecture_id) FROM lecture_progress lp \
                  WHERE lp.user_id = cp.user_id AND lp.course_id = cp.course_id \
                  AND lp.viewed AND lp.lecture_id = ANY($4)) \
               = (SELECT COUNT(DISTINCT id) FROM unnest($4::uuid[]) AS id)",
        )
        .bind(key.user_id)
        .bind(key.course_id)
        .bind(at)
        .bind(lecture_ids)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 1 {
            tracing::debug!(user_id = %key.user_id, course_id = %key.course_id, "completion stored");
        }
        self.reload(key).await
    }

    async fn clear_progress(&self, key: ProgressKey) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM course_progress WHERE user_id = $1 AND course_id = $2")
            .bind(key.user_id)
            .bind(key.course_id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(())
    }
}
