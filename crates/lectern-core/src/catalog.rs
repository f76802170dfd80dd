//! Course catalog records and the read-only catalog collaborator.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// A single video unit within a course's curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    /// Lecture identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Reference to the hosted video.
    pub video_url: String,
    /// Whether the lecture can be watched without buying the course.
    pub free_preview: bool,
}

/// A course document as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course identifier.
    pub id: Uuid,
    /// Instructor who authored the course.
    pub instructor_id: Uuid,
    /// Instructor display name.
    pub instructor_name: String,
    /// Course title.
    pub title: String,
    /// Catalog category, e.g. `web-development`.
    pub category: String,
    /// Difficulty level, e.g. `beginner`.
    pub level: String,
    /// Language the course is taught in.
    pub primary_language: String,
    /// Short tagline.
    pub subtitle: String,
    /// Long-form description.
    pub description: String,
    /// Cover image URL.
    pub image: String,
    /// Listed price.
    pub pricing: f64,
    /// Learning objectives, comma separated.
    pub objectives: String,
    /// Whether the course is visible to students.
    pub is_published: bool,
    /// When the course was created.
    pub created_at: DateTime<Utc>,
    /// Ordered lectures. Order is authoritative for resume.
    pub curriculum: Vec<Lecture>,
}

impl Course {
    /// Returns the curriculum lecture ids in order.
    #[must_use]
    pub fn lecture_ids(&self) -> Vec<Uuid> {
        self.curriculum.iter().map(|l| l.id).collect()
    }

    /// Looks up a curriculum lecture by id.
    #[must_use]
    pub fn lecture(&self, lecture_id: Uuid) -> Option<&Lecture> {
        self.curriculum.iter().find(|l| l.id == lecture_id)
    }
}

/// Sort order for catalog listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseSort {
    /// Cheapest first.
    #[default]
    PriceLowToHigh,
    /// Most expensive first.
    PriceHighToLow,
    /// Title ascending.
    TitleAToZ,
    /// Title descending.
    TitleZToA,
}

impl CourseSort {
    /// Parses the frontend's sort key. Unknown keys fall back to
    /// [`CourseSort::PriceLowToHigh`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "price-hightolow" => Self::PriceHighToLow,
            "title-atoz" => Self::TitleAToZ,
            "title-ztoa" => Self::TitleZToA,
            _ => Self::PriceLowToHigh,
        }
    }

    /// Compares two courses under this ordering.
    #[must_use]
    pub fn compare(self, a: &Course, b: &Course) -> Ordering {
        match self {
            Self::PriceLowToHigh => a.pricing.total_cmp(&b.pricing),
            Self::PriceHighToLow => b.pricing.total_cmp(&a.pricing),
            Self::TitleAToZ => a.title.cmp(&b.title),
            Self::TitleZToA => b.title.cmp(&a.title),
        }
    }
}

/// Filter and ordering for a catalog listing. Empty filter sets match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    /// Accepted categories.
    pub categories: Vec<String>,
    /// Accepted levels.
    pub levels: Vec<String>,
    /// Accepted primary languages.
    pub primary_languages: Vec<String>,
    /// Restricts the listing to one instructor's courses.
    pub instructor_id: Option<Uuid>,
    /// Result ordering.
    pub sort: CourseSort,
}

impl CourseQuery {
    /// Builds a query from comma-separated filter strings and a sort key.
    #[must_use]
    pub fn from_params(
        category: Option<&str>,
        level: Option<&str>,
        primary_language: Option<&str>,
        sort_by: Option<&str>,
    ) -> Self {
        Self {
            categories: split_filter(category),
            levels: split_filter(level),
            primary_languages: split_filter(primary_language),
            instructor_id: None,
            sort: sort_by.map(CourseSort::from_key).unwrap_or_default(),
        }
    }

    /// Builds a query for every course authored by `instructor_id`, by title.
    #[must_use]
    pub fn by_instructor(instructor_id: Uuid) -> Self {
        Self {
            instructor_id: Some(instructor_id),
            sort: CourseSort::TitleAToZ,
            ..Self::default()
        }
    }

    /// Returns `true` if the course passes every non-empty filter.
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        accepts(&self.categories, &course.category)
            && accepts(&self.levels, &course.level)
            && accepts(&self.primary_languages, &course.primary_language)
            && self.instructor_id.is_none_or(|id| id == course.instructor_id)
    }
}

fn split_filter(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

fn accepts(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|a| a == value)
}

/// Storage for course documents.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Loads a single course with its curriculum.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CourseNotFound` if the id does not resolve, or
    /// `DomainError::StoreUnavailable` on backend failure.
    async fn get_course(&self, course_id: Uuid) -> Result<Course, DomainError>;

    /// Lists courses matching `query`, ordered by `query.sort`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` on backend failure.
    async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>, DomainError>;

    /// Inserts or replaces a course together with its curriculum, in
    /// curriculum order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the course cannot be stored as
    /// given, or `DomainError::StoreUnavailable` on backend failure.
    async fn save_course(&self, course: &Course) -> Result<(), DomainError>;
}
