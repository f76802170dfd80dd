//! Routes for the student course catalog.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use lectern_catalog::application::query_handlers::{
    CourseSummary, get_course_detail, list_student_courses,
};
use lectern_core::catalog::{Course, CourseQuery};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery};
use crate::routes::{Envelope, ok};
use crate::state::AppState;

/// Query string of `GET /`. List filters are comma-separated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseParams {
    /// Categories to include.
    pub category: Option<String>,
    /// Levels to include.
    pub level: Option<String>,
    /// Languages to include.
    pub primary_language: Option<String>,
    /// Sort key, e.g. `price-hightolow`.
    pub sort_by: Option<String>,
}

impl From<&BrowseParams> for CourseQuery {
    fn from(params: &BrowseParams) -> Self {
        Self::from_params(
            params.category.as_deref(),
            params.level.as_deref(),
            params.primary_language.as_deref(),
            params.sort_by.as_deref(),
        )
    }
}

/// GET /
async fn browse(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<BrowseParams>,
) -> Result<Json<Envelope<Vec<CourseSummary>>>, ApiError> {
    let courses = list_student_courses(&CourseQuery::from(&params), state.catalog.as_ref()).await?;
    Ok(ok(courses))
}

/// GET /{course_id}
async fn detail(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<Uuid>,
) -> Result<Json<Envelope<Course>>, ApiError> {
    let course = get_course_detail(course_id, state.catalog.as_ref()).await?;
    Ok(ok(course))
}

/// Returns the router for the catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(browse))
        .route("/{course_id}", get(detail))
}
