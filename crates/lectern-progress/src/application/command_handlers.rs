//! Command handlers for the Course Progress context.
//!
//! Each handler checks purchase authorization first, then validates the
//! command against the catalog, then writes through the progress store.
//! The handlers are the only writers of progress state.

use lectern_core::catalog::CourseCatalog;
use lectern_core::clock::Clock;
use lectern_core::command::Command;
use lectern_core::error::DomainError;
use lectern_core::progress::ProgressRepository;
use lectern_core::purchase::PurchaseLedger;
use tracing::{debug, info};

use crate::application::query_handlers::{ProgressView, ensure_purchased};
use crate::domain::aggregates::LearnerProgress;
use crate::domain::commands::{MarkLectureViewed, RecordPlayback, ResetCourseProgress};

/// Outcome of a playback report.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackOutcome {
    /// The lecture has not been played to the end; nothing was stored.
    Ignored,
    /// The lecture was played to the end and marked viewed.
    Recorded(Box<ProgressView>),
}

/// Handles the `MarkLectureViewed` command: records the lecture as viewed
/// and, if that completes the curriculum, transitions the course to
/// completed through the store's atomic conditional update.
///
/// Marking an already-viewed lecture changes nothing and still succeeds.
///
/// # Errors
///
/// Returns `DomainError::NotPurchased` if the learner does not own the
/// course, `DomainError::CourseNotFound` if the course does not exist,
/// `DomainError::UnknownLecture` if the lecture is not in the curriculum,
/// and `DomainError::StoreUnavailable` on collaborator failure.
pub async fn handle_mark_lecture_viewed(
    command: &MarkLectureViewed,
    clock: &dyn Clock,
    purchases: &dyn PurchaseLedger,
    catalog: &dyn CourseCatalog,
    repo: &dyn ProgressRepository,
) -> Result<ProgressView, DomainError> {
    let key = command.key();
    ensure_purchased(key, purchases).await?;

    let course = catalog.get_course(key.course_id).await?;
    if course.lecture(command.lecture_id).is_none() {
        return Err(DomainError::UnknownLecture {
            course_id: key.course_id,
            lecture_id: command.lecture_id,
        });
    }

    let now = clock.now();
    let mut progress = repo
        .upsert_lecture_viewed(key, command.lecture_id, now)
        .await?;
    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        lecture_id = %command.lecture_id,
        "lecture marked viewed"
    );

    if !progress.completed && LearnerProgress::new(&course, &progress).all_viewed() {
        progress = repo
            .complete_if_all_viewed(key, &course.lecture_ids(), now)
            .await?;
        if progress.completion_date == Some(now) {
            info!(
                correlation_id = %command.correlation_id(),
                user_id = %key.user_id,
                course_id = %key.course_id,
                "course completed"
            );
        }
    }

    Ok(ProgressView::build(course, progress))
}

/// Handles the `ResetCourseProgress` command: removes every lecture record
/// and clears completion so the course can be watched again from the start.
///
/// Resetting a course with no stored progress succeeds.
///
/// # Errors
///
/// Returns `DomainError::NotPurchased` if the learner does not own the
/// course, and `DomainError::StoreUnavailable` on collaborator failure.
pub async fn handle_reset_course_progress(
    command: &ResetCourseProgress,
    purchases: &dyn PurchaseLedger,
    repo: &dyn ProgressRepository,
) -> Result<(), DomainError> {
    let key = command.key();
    ensure_purchased(key, purchases).await?;

    repo.clear_progress(key).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        user_id = %key.user_id,
        course_id = %key.course_id,
        "course progress reset"
    );
    Ok(())
}

/// Handles the `RecordPlayback` command. Fractions below `1.0` are
/// ephemeral player state and are not stored; reaching `1.0` marks the
/// lecture viewed.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `fraction` is not within
/// `[0.0, 1.0]`, plus every error of [`handle_mark_lecture_viewed`].
pub async fn handle_record_playback(
    command: &RecordPlayback,
    clock: &dyn Clock,
    purchases: &dyn PurchaseLedger,
    catalog: &dyn CourseCatalog,
    repo: &dyn ProgressRepository,
) -> Result<PlaybackOutcome, DomainError> {
    if !(0.0..=1.0).contains(&command.fraction) {
        return Err(DomainError::Validation(format!(
            "playback fraction must be between 0.0 and 1.0, got {}",
            command.fraction
        )));
    }

    if command.fraction >= 1.0 {
        let view =
            handle_mark_lecture_viewed(&command.as_mark_viewed(), clock, purchases, catalog, repo)
                .await?;
        return Ok(PlaybackOutcome::Recorded(Box::new(view)));
    }

    let key = command.key();
    ensure_purchased(key, purchases).await?;
    let course = catalog.get_course(key.course_id).await?;
    if course.lecture(command.lecture_id).is_none() {
        return Err(DomainError::UnknownLecture {
            course_id: key.course_id,
            lecture_id: command.lecture_id,
        });
    }
    Ok(PlaybackOutcome::Ignored)
}
