//! Query handlers for the Course Progress context.
//!
//! Queries check purchase authorization, load the course and the learner's
//! stored progress, and return read-only view DTOs. They never write.

use chrono::{DateTime, Utc};
use lectern_core::catalog::{Course, CourseCatalog, Lecture};
use lectern_core::error::DomainError;
use lectern_core::progress::{CourseProgress, LectureProgress, ProgressKey, ProgressRepository};
use lectern_core::purchase::PurchaseLedger;
use serde::Serialize;
use tracing::debug;

use crate::domain::aggregates::{LearnerProgress, ProgressState};

/// Read-only view of a learner's progress in a purchased course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    /// Always `true`; unpurchased courses fail with `NotPurchased` instead.
    pub is_purchased: bool,
    /// The course with its ordered curriculum.
    pub course_details: Course,
    /// Stored lecture records, in the order they were first viewed.
    pub progress: Vec<LectureProgress>,
    /// Lecture to resume at, `None` when completed or fully viewed.
    pub next_lecture: Option<Lecture>,
    /// Whether the course is completed.
    pub completed: bool,
    /// When the course was completed.
    pub completion_date: Option<DateTime<Utc>>,
    /// Lifecycle state.
    pub state: ProgressState,
    /// Curriculum lectures viewed so far.
    pub viewed_count: usize,
    /// Lectures in the curriculum.
    pub total_lectures: usize,
    /// Viewed share of the curriculum, in whole percent.
    pub percent_complete: u8,
}

impl ProgressView {
    /// Evaluates `progress` against `course`.
    #[must_use]
    pub fn build(course: Course, progress: CourseProgress) -> Self {
        let learner = LearnerProgress::new(&course, &progress);
        let next_lecture = learner.next_lecture().cloned();
        let completed = learner.is_completed();
        let state = learner.state();
        let viewed_count = learner.viewed_count();
        let total_lectures = learner.total_lectures();
        let percent_complete = learner.percent_complete();
        Self {
            is_purchased: true,
            next_lecture,
            completed,
            completion_date: progress.completion_date,
            state,
            viewed_count,
            total_lectures,
            percent_complete,
            progress: progress.lecture_progress,
            course_details: course,
        }
    }
}

/// Fails with `NotPurchased` unless the learner owns the course.
///
/// # Errors
///
/// Returns `DomainError::NotPurchased`, or `DomainError::StoreUnavailable`
/// if the ledger cannot be reached.
pub(crate) async fn ensure_purchased(
    key: ProgressKey,
    purchases: &dyn PurchaseLedger,
) -> Result<(), DomainError> {
    if purchases.is_purchased(key.user_id, key.course_id).await? {
        Ok(())
    } else {
        debug!(user_id = %key.user_id, course_id = %key.course_id, "course is locked");
        Err(DomainError::NotPurchased {
            user_id: key.user_id,
            course_id: key.course_id,
        })
    }
}

/// Retrieves the learner's progress in a course and the lecture to resume at.
///
/// A learner who has never watched anything gets an empty `NotStarted` view.
///
/// # Errors
///
/// Returns `DomainError::NotPurchased` before any progress read if the
/// learner does not own the course, `DomainError::CourseNotFound` if the
/// course does not exist, and `DomainError::StoreUnavailable` on
/// collaborator failure.
pub async fn get_course_progress(
    key: ProgressKey,
    purchases: &dyn PurchaseLedger,
    catalog: &dyn CourseCatalog,
    repo: &dyn ProgressRepository,
) -> Result<ProgressView, DomainError> {
    ensure_purchased(key, purchases).await?;
    let course = catalog.get_course(key.course_id).await?;
    let progress = repo
        .load_progress(key)
        .await?
        .unwrap_or_else(|| CourseProgress::empty(key));
    Ok(ProgressView::build(course, progress))
}
