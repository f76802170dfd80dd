//! Query handlers for the Instructor Course Authoring context.

use lectern_core::catalog::{Course, CourseCatalog, CourseQuery};
use lectern_core::error::DomainError;
use uuid::Uuid;

/// Lists every course authored by `instructor_id`, published or not,
/// ordered by title.
///
/// # Errors
///
/// Returns `DomainError::StoreUnavailable` if the catalog cannot be reached.
pub async fn list_instructor_courses(
    instructor_id: Uuid,
    catalog: &dyn CourseCatalog,
) -> Result<Vec<Course>, DomainError> {
    catalog
        .list_courses(&CourseQuery::by_instructor(instructor_id))
        .await
}

/// Loads a course for editing.
///
/// # Errors
///
/// Returns `DomainError::CourseNotFound` if the course does not exist, or
/// `DomainError::StoreUnavailable` on catalog failure.
pub async fn get_instructor_course(
    course_id: Uuid,
    catalog: &dyn CourseCatalog,
) -> Result<Course, DomainError> {
    catalog.get_course(course_id).await
}
