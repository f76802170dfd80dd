//! Course progress records and the progress persistence collaborator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identity of a course progress aggregate: one per learner per course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressKey {
    /// The learner.
    pub user_id: Uuid,
    /// The course.
    pub course_id: Uuid,
}

impl ProgressKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(user_id: Uuid, course_id: Uuid) -> Self {
        Self { user_id, course_id }
    }
}

/// Persisted fact that a learner finished watching a lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureProgress {
    /// The lecture that was watched.
    pub lecture_id: Uuid,
    /// Always `true` for stored records; absence means "not viewed".
    pub viewed: bool,
    /// When the lecture was first marked viewed.
    pub viewed_at: DateTime<Utc>,
}

/// Stored progress for one learner in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    /// The learner.
    pub user_id: Uuid,
    /// The course.
    pub course_id: Uuid,
    /// Set once every curriculum lecture has been viewed.
    pub completed: bool,
    /// Set exactly once, at the transition to completed.
    pub completion_date: Option<DateTime<Utc>>,
    /// Lecture records in the order they were first viewed.
    pub lecture_progress: Vec<LectureProgress>,
}

impl CourseProgress {
    /// Returns the `NotStarted` aggregate readers use when nothing is stored.
    #[must_use]
    pub fn empty(key: ProgressKey) -> Self {
        Self {
            user_id: key.user_id,
            course_id: key.course_id,
            completed: false,
            completion_date: None,
            lecture_progress: Vec::new(),
        }
    }

    /// Returns the aggregate's key.
    #[must_use]
    pub fn key(&self) -> ProgressKey {
        ProgressKey::new(self.user_id, self.course_id)
    }

    /// Returns `true` if the lecture has a viewed record.
    #[must_use]
    pub fn is_viewed(&self, lecture_id: Uuid) -> bool {
        self.lecture_progress
            .iter()
            .any(|p| p.lecture_id == lecture_id && p.viewed)
    }

    /// Returns `true` if every given lecture has a viewed record.
    #[must_use]
    pub fn covers(&self, lecture_ids: &[Uuid]) -> bool {
        lecture_ids.iter().all(|id| self.is_viewed(*id))
    }
}

/// Persistence for course progress aggregates.
///
/// Implementations create aggregates lazily on the first write and must make
/// [`ProgressRepository::complete_if_all_viewed`] a single atomic conditional
/// update so the completion transition fires at most once per key.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Loads the aggregate, or `None` if the learner has not started.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` on backend failure.
    async fn load_progress(&self, key: ProgressKey) -> Result<Option<CourseProgress>, DomainError>;

    /// Records `lecture_id` as viewed at `at`. A lecture that is already
    /// viewed keeps its original `viewed_at`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` on backend failure.
    async fn upsert_lecture_viewed(
        &self,
        key: ProgressKey,
        lecture_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError>;

    /// Sets `completed = true` and `completion_date = at` only if the
    /// aggregate is not yet completed and every id in `lecture_ids` has a
    /// viewed record. Returns the aggregate after the attempt.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` on backend failure.
    async fn complete_if_all_viewed(
        &self,
        key: ProgressKey,
        lecture_ids: &[Uuid],
        at: DateTime<Utc>,
    ) -> Result<CourseProgress, DomainError>;

    /// Removes every lecture record and clears completion. Succeeds when
    /// nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` on backend failure.
    async fn clear_progress(&self, key: ProgressKey) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_progress_covers_only_empty_curriculum() {
        let progress = CourseProgress::empty(ProgressKey::new(Uuid::new_v4(), Uuid::new_v4()));

        assert!(!progress.completed);
        assert!(progress.completion_date.is_none());
        assert!(progress.covers(&[]));
        assert!(!progress.covers(&[Uuid::new_v4()]));
    }

    #[test]
    fn test_covers_requires_every_lecture_viewed() {
        let l1 = Uuid::new_v4();
        let l2 = Uuid::new_v4();
        let mut progress = CourseProgress::empty(ProgressKey::new(Uuid::new_v4(), Uuid::new_v4()));
        progress.lecture_progress.push(LectureProgress {
            lecture_id: l1,
            viewed: true,
            viewed_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        });

        assert!(progress.is_viewed(l1));
        assert!(!progress.covers(&[l1, l2]));
        assert!(progress.covers(&[l1]));
    }
}
