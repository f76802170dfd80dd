//! Test progress stores: in-memory, rendezvous and failing
//! `ProgressRepository` implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Barrier;
use chrono::{DateTime, Utc};
use lectern_core::error::DomainError;
use lectern_core::progress::{CourseProgress, LectureProgress, ProgressKey, ProgressRepository};
use uuid::Uuid;

/// A progress store keyed by learner/course pair.
///
/// Every operation runs under one mutex, which makes the conditional
/// completion update atomic. The store also counts writes so tests can
/// assert that a refused call touched nothing.
#[derive(Debug, Default)]
pub struct InMemoryProgressRepository {
    aggregates: Mutex<HashMap<ProgressKey, CourseProgress>>,
    writes: Mutex<usize>,
}

impl InMemoryProgressRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an existing aggregate.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed(&self, progress: CourseProgress) {
        self.aggregates
            .lock()
            .unwrap()
            .insert(progress.key(), progress);
    }

    /// Returns the stored aggregate for `key`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn snapshot(&self, key: ProgressKey) -> Option<CourseProgress> {
        self.aggregates.lock().unwrap().get(&key).cloned()
    }

    /// Returns how many mutating calls reached the store.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    fn record_write(&self) {
        *self.writes.lock().unwrap() += 1;
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn load_progress(&self, key: ProgressKey) -> Result<Option<CourseProgress>, DomainError> {
        Ok(self.snapshot(key))
    }

    async fn upsert_lecture_viewed(
        &self,
        key: ProgressKey,
        lecture_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError> {
        self.record_write();
        let mut aggregates = self.aggregates.lock().unwrap();
        let progress = aggregates
            .entry(key)
            .or_insert_with(|| CourseProgress::empty(key));
        match progress
            .lecture_progress
            .iter_mut()
            .find(|p| p.lecture_id == lecture_id)
        {
            Some(record) if record.viewed => {}
            Some(record) => {
                record.viewed = true;
                record.viewed_at = at;
            }
            None => progress.lecture_progress.push(LectureProgress {
                lecture_id,
                viewed: true,
                viewed_at: at,
            }),
        }
        Ok(progress.clone())
    }

    async fn complete_if_all_viewed(
        &self,
        key: ProgressKey,
        lecture_ids: &[Uuid],
        at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError> {
        self.record_write();
        let mut aggregates = self.aggregates.lock().unwrap();
        let Some(progress) = aggregates.get_mut(&key) else {
            return Ok(CourseProgress::empty(key));
        };
        if !progress.completed && progress.covers(lecture_ids) {
            progress.completed = true;
            progress.completion_date = Some(at);
        }
        Ok(progress.clone())
    }

    async fn clear_progress(&self, key: ProgressKey) -> Result<(), DomainError> {
        self.record_write();
        self.aggregates.lock().unwrap().remove(&key);
        Ok(())
    }
}

/// A progress store whose every call fails with `StoreUnavailable`.
#[derive(Debug)]
pub struct FailingProgressRepository;

#[async_trait]
impl ProgressRepository for FailingProgressRepository {
    async fn load_progress(&self, _key: ProgressKey) -> Result<Option<CourseProgress>, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn upsert_lecture_viewed(
        &self,
        _key: ProgressKey,
        _lecture_id: Uuid,
        _at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn complete_if_all_viewed(
        &self,
        _key: ProgressKey,
        _lecture_ids: &[Uuid],
        _at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn clear_progress(&self, _key: ProgressKey) -> Result<(), DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }
}

/// An in-memory store that holds each `upsert_lecture_viewed` call at a
/// barrier until `parties` calls have written, then answers every one of
/// them with the aggregate as it stands after all the writes.
///
/// Concurrent final marks therefore all observe a fully viewed curriculum
/// and race on `complete_if_all_viewed`.
#[derive(Debug)]
pub struct RendezvousProgressRepository {
    inner: InMemoryProgressRepository,
    barrier: Barrier,
}

impl RendezvousProgressRepository {
    /// Creates an empty store whose upserts rendezvous in groups of `parties`.
    #[must_use]
    pub fn new(parties: usize) -> Self {
        Self {
            inner: InMemoryProgressRepository::new(),
            barrier: Barrier::new(parties),
        }
    }

    /// Returns the stored aggregate for `key`, if any.
    #[must_use]
    pub fn snapshot(&self, key: ProgressKey) -> Option<CourseProgress> {
        self.inner.snapshot(key)
    }
}

#[async_trait]
impl ProgressRepository for RendezvousProgressRepository {
    async fn load_progress(&self, key: ProgressKey) -> Result<Option<CourseProgress>, DomainError> {
        self.inner.load_progress(key).await
    }

    async fn upsert_lecture_viewed(
        &self,
        key: ProgressKey,
        lecture_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError> {
        self.inner.upsert_lecture_viewed(key, lecture_id, at).await?;
        self.barrier.wait().await;
        Ok(self
            .inner
            .snapshot(key)
            .unwrap_or_else(|| CourseProgress::empty(key)))
    }

    async fn complete_if_all_viewed(
        &self,
        key: ProgressKey,
        lecture_ids: &[Uuid],
        at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError> {
        self.inner.complete_if_all_viewed(key, lecture_ids, at).await
    }

    async fn clear_progress(&self, key: ProgressKey) -> Result<(), DomainError> {
        self.inner.clear_progress(key).await
    }
}
