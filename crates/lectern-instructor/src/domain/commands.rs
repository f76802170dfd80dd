//! Commands for the Instructor Course Authoring context.

use lectern_core::command::Command;
use uuid::Uuid;

use crate::domain::drafts::CourseDraft;

/// Command to publish a new course document.
#[derive(Debug, Clone)]
pub struct CreateCourse {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The authoring instructor.
    pub instructor_id: Uuid,
    /// Instructor display name.
    pub instructor_name: String,
    /// Course content.
    pub draft: CourseDraft,
}

impl Command for CreateCourse {
    fn command_type(&self) -> &'static str {
        "instructor.create_course"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace the content of an existing course.
#[derive(Debug, Clone)]
pub struct UpdateCourse {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The course to edit.
    pub course_id: Uuid,
    /// New course content.
    pub draft: CourseDraft,
}

impl Command for UpdateCourse {
    fn command_type(&self) -> &'static str {
        "instructor.update_course"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
