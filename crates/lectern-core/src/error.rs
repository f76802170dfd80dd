//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Every collaborator and handler returns this type so callers can tell a
/// locked course apart from a missing one or a transient store failure.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The learner has not bought the course.
    #[error("course {course_id} has not been purchased by user {user_id}")]
    NotPurchased {
        /// The learner that was refused.
        user_id: Uuid,
        /// The locked course.
        course_id: Uuid,
    },

    /// The course identifier does not resolve in the catalog.
    #[error("course not found: {0}")]
    CourseNotFound(Uuid),

    /// The lecture is not part of the course's curriculum.
    #[error("lecture {lecture_id} is not part of course {course_id}")]
    UnknownLecture {
        /// The course whose curriculum was searched.
        course_id: Uuid,
        /// The lecture that was not found.
        lecture_id: Uuid,
    },

    /// A validation error in request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A persistence collaborator failed. Retryable by the caller.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl DomainError {
    /// Returns `true` if retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
