//! Test catalogs: in-memory and failing `CourseCatalog` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use lectern_core::catalog::{Course, CourseCatalog, CourseQuery};
use lectern_core::error::DomainError;
use uuid::Uuid;

/// A catalog backed by an in-memory list of courses.
#[derive(Debug, Default)]
pub struct InMemoryCourseCatalog {
    courses: Mutex<Vec<Course>>,
}

impl InMemoryCourseCatalog {
    /// Creates a catalog holding `courses`.
    #[must_use]
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: Mutex::new(courses),
        }
    }

    /// Replaces the stored course with the same id, or appends it.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn put(&self, course: Course) {
        let mut courses = self.courses.lock().unwrap();
        match courses.iter_mut().find(|c| c.id == course.id) {
            Some(existing) => *existing = course,
            None => courses.push(course),
        }
    }
}

#[async_trait]
impl CourseCatalog for InMemoryCourseCatalog {
    async fn get_course(&self, course_id: Uuid) -> Result<Course, DomainError> {
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == course_id)
            .cloned()
            .ok_or(DomainError::CourseNotFound(course_id))
    }

    async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>, DomainError> {
        let mut matching: Vec<Course> = self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));
        Ok(matching)
    }

    async fn save_course(&self, course: &Course) -> Result<(), DomainError> {
        self.put(course.clone());
        Ok(())
    }
}

/// A catalog whose every call fails with `StoreUnavailable`.
#[derive(Debug)]
pub struct FailingCourseCatalog;

#[async_trait]
impl CourseCatalog for FailingCourseCatalog {
    async fn get_course(&self, _course_id: Uuid) -> Result<Course, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn list_courses(&self, _query: &CourseQuery) -> Result<Vec<Course>, DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }

    async fn save_course(&self, _course: &Course) -> Result<(), DomainError> {
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }
}
