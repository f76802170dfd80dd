//! Query handlers for the Catalog & Enrollment context.

use lectern_core::catalog::{Course, CourseCatalog, CourseQuery};
use lectern_core::error::DomainError;
use lectern_core::purchase::{PurchaseLedger, PurchasedCourse};
use serde::Serialize;
use uuid::Uuid;

/// Listing card for a course in the student catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    /// Course identifier.
    pub id: Uuid,
    /// Course title.
    pub title: String,
    /// Instructor display name.
    pub instructor_name: String,
    /// Catalog category.
    pub category: String,
    /// Difficulty level.
    pub level: String,
    /// Language the course is taught in.
    pub primary_language: String,
    /// Listed price.
    pub pricing: f64,
    /// Cover image URL.
    pub image: String,
    /// Number of lectures in the curriculum.
    pub lecture_count: usize,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            instructor_name: course.instructor_name.clone(),
            category: course.category.clone(),
            level: course.level.clone(),
            primary_language: course.primary_language.clone(),
            pricing: course.pricing,
            image: course.image.clone(),
            lecture_count: course.curriculum.len(),
        }
    }
}

/// Lists catalog courses matching `query`, in the requested order.
///
/// # Errors
///
/// Returns `DomainError::StoreUnavailable` if the catalog cannot be reached.
pub async fn list_student_courses(
    query: &CourseQuery,
    catalog: &dyn CourseCatalog,
) -> Result<Vec<CourseSummary>, DomainError> {
    let courses = catalog.list_courses(query).await?;
    Ok(courses.iter().map(CourseSummary::from).collect())
}

/// Retrieves a course with its full curriculum.
///
/// # Errors
///
/// Returns `DomainError::CourseNotFound` if the course does not exist, or
/// `DomainError::StoreUnavailable` on catalog failure.
pub async fn get_course_detail(
    course_id: Uuid,
    catalog: &dyn CourseCatalog,
) -> Result<Course, DomainError> {
    catalog.get_course(course_id).await
}

/// Lists the courses a learner has bought. Empty when none.
///
/// # Errors
///
/// Returns `DomainError::StoreUnavailable` if the ledger cannot be reached.
pub async fn get_purchased_courses(
    user_id: Uuid,
    purchases: &dyn PurchaseLedger,
) -> Result<Vec<PurchasedCourse>, DomainError> {
    purchases.purchased_courses(user_id).await
}
