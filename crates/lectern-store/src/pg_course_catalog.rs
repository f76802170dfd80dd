//! `PostgreSQL` implementation of the `CourseCatalog` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use lectern_core::catalog::{Course, CourseCatalog, CourseQuery, CourseSort, Lecture};
use lectern_core::error::DomainError;

use crate::store_error;

const COURSE_COLUMNS: &str = "id, instructor_id, instructor_name, title, category, level, \
     primary_language, subtitle, description, image, pricing, objectives, is_published, created_at";

#[derive(Debug, FromRow)]
struct CourseRow {
    id: Uuid,
    instructor_id: Uuid,
    instructor_name: String,
    title: String,
    category: String,
    level: String,
    primary_language: String,
    subtitle: String,
    description: String,
    image: String,
    pricing: f64,
    objectives: String,
    is_published: bool,
    created_at: DateTime<Utc>,
}

impl CourseRow {
    fn into_course(self, curriculum: Vec<Lecture>) -> Course {
        Course {
            id: self.id,
            instructor_id: self.instructor_id,
            instructor_name: self.instructor_name,
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
            created_at: self.created_at,
            curriculum,
        }
    }
}

#[derive(Debug, FromRow)]
struct LectureRow {
    course_id: Uuid,
    id: Uuid,
    title: String,
    video_url: String,
    free_preview: bool,
}

impl From<LectureRow> for Lecture {
    fn from(row: LectureRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            video_url: row.video_url,
            free_preview: row.free_preview,
        }
    }
}

fn order_by(sort: CourseSort) -> &'static str {
    match sort {
        CourseSort::PriceLowToHigh => "pricing ASC, title ASC",
        CourseSort::PriceHighToLow => "pricing DESC, title ASC",
        CourseSort::TitleAToZ => "title ASC",
        CourseSort::TitleZToA => "title DESC",
    }
}

/// PostgreSQL-backed course catalog.
#[derive(Debug, Clone)]
pub struct PgCourseCatalog {
    pool: PgPool,
}

impl PgCourseCatalog {
    /// Creates a new `PgCourseCatalog`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn curricula(&self, course_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Lecture>>, DomainError> {
        let rows: Vec<LectureRow> = sqlx::query_as(
            "SELECT course_id, id, title, video_url, free_preview FROM lectures \
             WHERE course_id = ANY($1) ORDER BY course_id, position",
        )
        .bind(course_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let mut curricula: HashMap<Uuid, Vec<Lecture>> = HashMap::new();
        for row in rows {
            curricula.entry(row.course_id).or_default().push(row.into());
        }
        Ok(curricula)
    }
}

#[async_trait]
impl CourseCatalog for PgCourseCatalog {
    async fn get_course(&self, course_id: Uuid) -> Result<Course, DomainError> {
        let row: Option<CourseRow> =
            sqlx::query_as(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
                .bind(course_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;
        let row = row.ok_or(DomainError::CourseNotFound(course_id))?;

        let mut curricula = self.curricula(&[course_id]).await?;
        let curriculum = curricula.remove(&course_id).unwrap_or_default();
        Ok(row.into_course(curriculum))
    }

    async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>, DomainError> {
        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses \
             WHERE (cardinality($1::text[]) = 0 OR category = ANY($1)) \
             AND (cardinality($2::text[]) = 0 OR level = ANY($2)) \
             AND (cardinality($3::text[]) = 0 OR primary_language = ANY($3)) \
             AND ($4::uuid IS NULL OR instructor_id = $4) \
             ORDER BY {}",
            order_by(query.sort)
        );
        let rows: Vec<CourseRow> = sqlx::query_as(&sql)
            .bind(&query.categories)
            .bind(&query.levels)
            .bind(&query.primary_languages)
            .bind(query.instructor_id)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut curricula = self.curricula(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let curriculum = curricula.remove(&row.id).unwrap_or_default();
                row.into_course(curriculum)
            })
            .collect())
    }

    async fn save_course(&self, course: &Course) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        sqlx::query(
            "INSERT INTO courses (id, instructor_id, instructor_name, title, category, level, \
             primary_language, subtitle, description, image, pricing, objectives, is_published, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (id) DO UPDATE SET \
             instructor_id = EXCLUDED.instructor_id, instructor_name = EXCLUDED.instructor_name, \
             title = EXCLUDED.title, category = EXCLUDED.category, level = EXCLUDED.level, \
             primary_language = EXCLUDED.primary_language, subtitle = EXCLUDED.subtitle, \
             description = EXCLUDED.description, image = EXCLUDED.image, pricing = EXCLUDED.pricing, \
             objectives = EXCLUDED.objectives, is_published = EXCLUDED.is_published",
        )
        .bind(course.id)
        .bind(course.instructor_id)
        .bind(&course.instructor_name)
        .bind(&course.title)
        .bind(&course.category)
        .bind(&course.level)
        .bind(&course.primary_language)
        .bind(&course.subtitle)
        .bind(&course.description)
        .bind(&course.image)
        .bind(course.pricing)
        .bind(&course.objectives)
        .bind(course.is_published)
        .bind(course.created_at)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;

        sqlx::query("DELETE FROM lectures WHERE course_id = $1")
            .bind(course.id)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?;

        // Lecture order is the curriculum order.
        for (index, lecture) in course.curriculum.iter().enumerate() {
            let position = i32::try_from(index).map_err(|_| {
                DomainError::Validation(format!("curriculum of course {} is too long", course.id))
            })?;
            sqlx::query(
                "INSERT INTO lectures (id, course_id, position, title, video_url, free_preview) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(lecture.id)
            .bind(course.id)
            .bind(position)
            .bind(&lecture.title)
            .bind(&lecture.video_url)
            .bind(lecture.free_preview)
            .execute(&mut *tx)
            .await
            .map_err(store_error)?;
        }

        tx.commit().await.map_err(store_error)
    }
}
