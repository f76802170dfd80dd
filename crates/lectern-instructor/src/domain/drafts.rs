//! Editable course content submitted by an instructor.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use lectern_core::catalog::{Course, Lecture};
use lectern_core::error::DomainError;
use serde::Deserialize;
use uuid::Uuid;

/// One curriculum entry as submitted.
///
/// `id` names an existing lecture of the course being edited; omit it for a
/// new lecture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureDraft {
    /// Existing lecture to keep, if any.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Lecture title.
    pub title: String,
    /// Video location.
    #[serde(default)]
    pub video_url: String,
    /// Whether the lecture can be watched before purchase.
    #[serde(default)]
    pub free_preview: bool,
}

/// Course fields an instructor controls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    /// Course title.
    pub title: String,
    /// Catalog category.
    #[serde(default)]
    pub category: String,
    /// Difficulty level.
    #[serde(default)]
    pub level: String,
    /// Language the course is taught in.
    #[serde(default)]
    pub primary_language: String,
    /// Short tagline.
    #[serde(default)]
    pub subtitle: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Cover image URL.
    #[serde(default)]
    pub image: String,
    /// Listed price.
    #[serde(default)]
    pub pricing: f64,
    /// Learning objectives, comma-separated.
    #[serde(default)]
    pub objectives: String,
    /// Whether the course shows in the student catalog.
    #[serde(default)]
    pub is_published: bool,
    /// Ordered curriculum.
    #[serde(default)]
    pub curriculum: Vec<LectureDraft>,
}

/// Identity fields that survive every edit of a course.
#[derive(Debug, Clone)]
pub struct CourseIdentity {
    /// Course identifier.
    pub id: Uuid,
    /// Authoring instructor.
    pub instructor_id: Uuid,
    /// Instructor display name.
    pub instructor_name: String,
    /// When the course was first created.
    pub created_at: DateTime<Utc>,
}

impl CourseIdentity {
    /// Identity of an already stored course.
    #[must_use]
    pub fn of(course: &Course) -> Self {
        Self {
            id: course.id,
            instructor_id: course.instructor_id,
            instructor_name: course.instructor_name.clone(),
            created_at: course.created_at,
        }
    }
}

impl CourseDraft {
    /// Checks the draft and turns it into a course document.
    ///
    /// `existing` is the curriculum the course has today; a lecture draft
    /// with an `id` must name one of those lectures and keeps that id. New
    /// lectures get fresh ids.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the title is blank, the price is
    /// negative or not a number, a lecture title is blank, or a lecture id
    /// is unknown or repeated.
    pub fn into_course(
        self,
        identity: CourseIdentity,
        existing: &[Lecture],
    ) -> Result<Course, DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("course title must not be blank".into()));
        }
        if !self.pricing.is_finite() || self.pricing < 0.0 {
            return Err(DomainError::Validation(format!(
                "pricing must be a non-negative number, got {}",
                self.pricing
            )));
        }

        let mut seen = HashSet::new();
        let mut curriculum = Vec::with_capacity(self.curriculum.len());
        for (index, draft) in self.curriculum.into_iter().enumerate() {
            if draft.title.trim().is_empty() {
                return Err(DomainError::Validation(format!(
                    "lecture {} has a blank title",
                    index + 1
                )));
            }
            let id = match draft.id {
                Some(id) if !existing.iter().any(|l| l.id == id) => {
                    return Err(DomainError::UnknownLecture {
                        course_id: identity.id,
                        lecture_id: id,
                    });
                }
                Some(id) => id,
                None => Uuid::new_v4(),
            };
            if !seen.insert(id) {
                return Err(DomainError::Validation(format!(
                    "lecture {id} appears twice in the curriculum"
                )));
            }
            curriculum.push(Lecture {
                id,
                title: draft.title,
                video_url: draft.video_url,
                free_preview: draft.free_preview,
            });
        }

        Ok(Course {
            id: identity.id,
            instructor_id: identity.instructor_id,
            instructor_name: identity.instructor_name,
            title: self.title,
            category: self.category,
            level: self.level,
            primary_language: self.primary_language,
            subtitle: self.subtitle,
            description: self.description,
            image: self.image,
            pricing: self.pricing,
            objectives: self.objectives,
            is_published: self.is_published,
            created_at: identity.created_at,
            curriculum,
        })
    }
}
