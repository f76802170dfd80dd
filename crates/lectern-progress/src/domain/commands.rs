//! Commands for the Course Progress context.

use lectern_core::command::Command;
use lectern_core::progress::ProgressKey;
use uuid::Uuid;

/// Command to record that a learner finished watching a lecture.
#[derive(Debug, Clone)]
pub struct MarkLectureViewed {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The learner.
    pub user_id: Uuid,
    /// The course the lecture belongs to.
    pub course_id: Uuid,
    /// The lecture that was watched.
    pub lecture_id: Uuid,
}

impl MarkLectureViewed {
    /// The learner/course pair this command operates on.
    #[must_use]
    pub fn key(&self) -> ProgressKey {
        ProgressKey::new(self.user_id, self.course_id)
    }
}

impl Command for MarkLectureViewed {
    fn command_type(&self) -> &'static str {
        "progress.mark_lecture_viewed"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to wipe a learner's progress so the course can be rewatched.
#[derive(Debug, Clone)]
pub struct ResetCourseProgress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The learner.
    pub user_id: Uuid,
    /// The course to reset.
    pub course_id: Uuid,
}

impl ResetCourseProgress {
    /// The learner/course pair this command operates on.
    #[must_use]
    pub fn key(&self) -> ProgressKey {
        ProgressKey::new(self.user_id, self.course_id)
    }
}

impl Command for ResetCourseProgress {
    fn command_type(&self) -> &'static str {
        "progress.reset_course_progress"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Playback position report from the video player.
///
/// `fraction` is the played share of the lecture in `[0.0, 1.0]`. Only the
/// end of the video is persisted.
#[derive(Debug, Clone)]
pub struct RecordPlayback {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The learner.
    pub user_id: Uuid,
    /// The course being watched.
    pub course_id: Uuid,
    /// The lecture currently playing.
    pub lecture_id: Uuid,
    /// Played fraction of the lecture.
    pub fraction: f64,
}

impl RecordPlayback {
    /// The learner/course pair this command operates on.
    #[must_use]
    pub fn key(&self) -> ProgressKey {
        ProgressKey::new(self.user_id, self.course_id)
    }

    /// Returns the equivalent mark command once playback reached the end.
    #[must_use]
    pub fn as_mark_viewed(&self) -> MarkLectureViewed {
        MarkLectureViewed {
            correlation_id: self.correlation_id,
            user_id: self.user_id,
            course_id: self.course_id,
            lecture_id: self.lecture_id,
        }
    }
}

impl Command for RecordPlayback {
    fn command_type(&self) -> &'static str {
        "progress.record_playback"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
