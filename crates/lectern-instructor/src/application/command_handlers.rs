//! Command handlers for the Instructor Course Authoring context.

use lectern_core::catalog::{Course, CourseCatalog};
use lectern_core::clock::Clock;
use lectern_core::command::Command;
use lectern_core::error::DomainError;
use tracing::info;
use uuid::Uuid;

use crate::domain::commands::{CreateCourse, UpdateCourse};
use crate::domain::drafts::CourseIdentity;

/// Handles the `CreateCourse` command: validates the draft and stores it as
/// a new course owned by the instructor.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the draft is rejected,
/// `DomainError::UnknownLecture` if a lecture draft carries an id, or
/// `DomainError::StoreUnavailable` on catalog failure.
pub async fn handle_create_course(
    command: &CreateCourse,
    clock: &dyn Clock,
    catalog: &dyn CourseCatalog,
) -> Result<Course, DomainError> {
    if command.instructor_name.trim().is_empty() {
        return Err(DomainError::Validation("instructor name must not be blank".into()));
    }
    let identity = CourseIdentity {
        id: Uuid::new_v4(),
        instructor_id: command.instructor_id,
        instructor_name: command.instructor_name.clone(),
        created_at: clock.now(),
    };
    let course = command.draft.clone().into_course(identity, &[])?;

    catalog.save_course(&course).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        instructor_id = %course.instructor_id,
        course_id = %course.id,
        lectures = course.curriculum.len(),
        "course created"
    );
    Ok(course)
}

/// Handles the `UpdateCourse` command: replaces the course content while
/// keeping its id, instructor and creation time.
///
/// # Errors
///
/// Returns `DomainError::CourseNotFound` if the course does not exist,
/// `DomainError::Validation` or `DomainError::UnknownLecture` if the draft
/// is rejected, or `DomainError::StoreUnavailable` on catalog failure.
pub async fn handle_update_course(
    command: &UpdateCourse,
    catalog: &dyn CourseCatalog,
) -> Result<Course, DomainError> {
    let existing = catalog.get_course(command.course_id).await?;
    let course = command
        .draft
        .clone()
        .into_course(CourseIdentity::of(&existing), &existing.curriculum)?;

    catalog.save_course(&course).await?;
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        course_id = %course.id,
        lectures = course.curriculum.len(),
        "course updated"
    );
    Ok(course)
}
