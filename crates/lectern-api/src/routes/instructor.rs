//! Routes for instructor course authoring.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use lectern_core::catalog::Course;
use lectern_instructor::application::command_handlers::{
    handle_create_course, handle_update_course,
};
use lectern_instructor::application::query_handlers::{
    get_instructor_course, list_instructor_courses,
};
use lectern_instructor::domain::commands::{CreateCourse, UpdateCourse};
use lectern_instructor::domain::drafts::CourseDraft;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{Envelope, ok};
use crate::state::AppState;

/// Body of `POST /`: the author plus the course content.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    /// The authoring instructor.
    pub instructor_id: Uuid,
    /// Instructor display name.
    pub instructor_name: String,
    /// Course content.
    #[serde(flatten)]
    pub draft: CourseDraft,
}

/// Query string of `GET /`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorParams {
    /// Whose courses to list.
    pub instructor_id: Uuid,
}

/// GET /
async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<InstructorParams>,
) -> Result<Json<Envelope<Vec<Course>>>, ApiError> {
    let courses = list_instructor_courses(params.instructor_id, state.catalog.as_ref()).await?;
    Ok(ok(courses))
}

/// POST /
async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Envelope<Course>>), ApiError> {
    let command = CreateCourse {
        correlation_id: Uuid::now_v7(),
        instructor_id: body.instructor_id,
        instructor_name: body.instructor_name,
        draft: body.draft,
    };
    let course =
        handle_create_course(&command, state.clock.as_ref(), state.catalog.as_ref()).await?;
    Ok((StatusCode::CREATED, ok(course)))
}

/// GET /{course_id}
async fn detail(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<Uuid>,
) -> Result<Json<Envelope<Course>>, ApiError> {
    let course = get_instructor_course(course_id, state.catalog.as_ref()).await?;
    Ok(ok(course))
}

/// PUT /{course_id}
async fn update(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<Uuid>,
    ApiJson(draft): ApiJson<CourseDraft>,
) -> Result<Json<Envelope<Course>>, ApiError> {
    let command = UpdateCourse {
        correlation_id: Uuid::now_v7(),
        course_id,
        draft,
    };
    let course = handle_update_course(&command, state.catalog.as_ref()).await?;
    Ok(ok(course))
}

/// Returns the router for instructor authoring.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{course_id}", get(detail).put(update))
}
