//! Resume and completion rules for a learner's progress in one course.

use lectern_core::catalog::{Course, Lecture};
use lectern_core::progress::CourseProgress;
use serde::Serialize;

/// Lifecycle of a course progress aggregate.
///
/// `Completed` is re-enterable: a reset returns the aggregate to
/// `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    /// No lecture has been viewed.
    NotStarted,
    /// Some, but not all, curriculum lectures have been viewed.
    InProgress,
    /// The completion transition has been stored.
    Completed,
}

/// A learner's stored progress evaluated against the course curriculum.
#[derive(Debug, Clone, Copy)]
pub struct LearnerProgress<'a> {
    course: &'a Course,
    progress: &'a CourseProgress,
}

impl<'a> LearnerProgress<'a> {
    /// Pairs a course with the learner's stored progress in it.
    #[must_use]
    pub fn new(course: &'a Course, progress: &'a CourseProgress) -> Self {
        Self { course, progress }
    }

    /// Returns the lecture to resume at.
    ///
    /// This is the first curriculum lecture, in curriculum order, without a
    /// viewed record, so a skipped lecture is always resumed before later
    /// ones. `None` once the course is completed or fully viewed.
    #[must_use]
    pub fn next_lecture(&self) -> Option<&'a Lecture> {
        if self.progress.completed {
            return None;
        }
        self.course
            .curriculum
            .iter()
            .find(|lecture| !self.progress.is_viewed(lecture.id))
    }

    /// Returns `true` if the curriculum is non-empty and every lecture in it
    /// has a viewed record.
    #[must_use]
    pub fn all_viewed(&self) -> bool {
        !self.course.curriculum.is_empty()
            && self
                .course
                .curriculum
                .iter()
                .all(|lecture| self.progress.is_viewed(lecture.id))
    }

    /// Returns `true` once the completion transition has been stored.
    ///
    /// A fully viewed curriculum whose transition has not been written yet
    /// is still in progress; only `complete_if_all_viewed` sets the flag
    /// together with its `completion_date`.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.progress.completed
    }

    /// Number of curriculum lectures with a viewed record. Records for
    /// lectures no longer in the curriculum are not counted.
    #[must_use]
    pub fn viewed_count(&self) -> usize {
        self.course
            .curriculum
            .iter()
            .filter(|lecture| self.progress.is_viewed(lecture.id))
            .count()
    }

    /// Number of lectures in the curriculum.
    #[must_use]
    pub fn total_lectures(&self) -> usize {
        self.course.curriculum.len()
    }

    /// Viewed share of the curriculum as a whole percent, rounded half up.
    #[must_use]
    pub fn percent_complete(&self) -> u8 {
        let total = self.total_lectures();
        if total == 0 {
            return 0;
        }
        let percent = (self.viewed_count() * 200 + total) / (2 * total);
        u8::try_from(percent).unwrap_or(100)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ProgressState {
        if self.is_completed() {
            ProgressState::Completed
        } else if self.viewed_count() == 0 {
            ProgressState::NotStarted
        } else {
            ProgressState::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use lectern_core::progress::{LectureProgress, ProgressKey};
    use lectern_test_support::{course_with_lectures, fixed_now};
    use uuid::Uuid;

    use super::*;

    fn progress_with(course: &Course, viewed: &[Uuid]) -> CourseProgress {
        let mut progress = CourseProgress::empty(ProgressKey::new(Uuid::new_v4(), course.id));
        for (i, id) in viewed.iter().enumerate() {
            progress.lecture_progress.push(LectureProgress {
                lecture_id: *id,
                viewed: true,
                viewed_at: fixed_now() + Duration::minutes(i64::try_from(i).unwrap()),
            });
        }
        progress
    }

    #[test]
    fn test_next_lecture_is_first_curriculum_item_when_not_started() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let course = course_with_lectures(Uuid::new_v4(), &ids);
        let progress = progress_with(&course, &[]);

        let learner = LearnerProgress::new(&course, &progress);

        assert_eq!(learner.next_lecture().map(|l| l.id), Some(ids[0]));
        assert_eq!(learner.state(), ProgressState::NotStarted);
    }

    #[test]
    fn test_next_lecture_resumes_at_first_gap_not_after_last_viewed() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let course = course_with_lectures(Uuid::new_v4(), &ids);
        let progress = progress_with(&course, &[ids[1]]);

        let learner = LearnerProgress::new(&course, &progress);

        assert_eq!(learner.next_lecture().map(|l| l.id), Some(ids[0]));
        assert_eq!(learner.state(), ProgressState::InProgress);
    }

    #[test]
    fn test_next_lecture_skips_leading_viewed_lectures() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let course = course_with_lectures(Uuid::new_v4(), &ids);
        let progress = progress_with(&course, &[ids[0], ids[2]]);

        let learner = LearnerProgress::new(&course, &progress);

        assert_eq!(learner.next_lecture().map(|l| l.id), Some(ids[1]));
    }

    #[test]
    fn test_completed_aggregate_has_no_next_lecture() {
        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        let course = course_with_lectures(Uuid::new_v4(), &ids);
        let mut progress = progress_with(&course, &[ids[0]]);
        progress.completed = true;

        let learner = LearnerProgress::new(&course, &progress);

        assert!(learner.next_lecture().is_none());
        assert_eq!(learner.state(), ProgressState::Completed);
    }

    #[test]
    fn test_fully_viewed_but_unstored_completion_is_still_in_progress() {
        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        let course = course_with_lectures(Uuid::new_v4(), &ids);
        let progress = progress_with(&course, &ids);

        let learner = LearnerProgress::new(&course, &progress);

        assert!(learner.all_viewed());
        assert!(!learner.is_completed());
        assert!(learner.next_lecture().is_none());
        assert_eq!(learner.state(), ProgressState::InProgress);
        assert_eq!(learner.percent_complete(), 100);
    }

    #[test]
    fn test_all_viewed_requires_non_empty_curriculum() {
        let course = course_with_lectures(Uuid::new_v4(), &[]);
        let progress = progress_with(&course, &[]);

        let learner = LearnerProgress::new(&course, &progress);

        assert!(!learner.all_viewed());
        assert!(learner.next_lecture().is_none());
        assert_eq!(learner.percent_complete(), 0);
        assert_eq!(learner.state(), ProgressState::NotStarted);
    }

    #[test]
    fn test_records_outside_curriculum_are_ignored() {
        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        let course = course_with_lectures(Uuid::new_v4(), &ids);
        let progress = progress_with(&course, &[Uuid::new_v4(), ids[0]]);

        let learner = LearnerProgress::new(&course, &progress);

        assert_eq!(learner.viewed_count(), 1);
        assert_eq!(learner.next_lecture().map(|l| l.id), Some(ids[1]));
        assert!(!learner.all_viewed());
    }

    #[test]
    fn test_percent_complete_rounds_half_up() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let course = course_with_lectures(Uuid::new_v4(), &ids);

        let one = progress_with(&course, &[ids[0]]);
        let two = progress_with(&course, &[ids[0], ids[1]]);
        let all = progress_with(&course, &ids);

        assert_eq!(LearnerProgress::new(&course, &one).percent_complete(), 33);
        assert_eq!(LearnerProgress::new(&course, &two).percent_complete(), 67);
        assert_eq!(LearnerProgress::new(&course, &all).percent_complete(), 100);
    }
}
