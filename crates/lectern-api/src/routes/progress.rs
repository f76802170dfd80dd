//! Routes for the Course Progress bounded context.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use lectern_core::progress::ProgressKey;
use lectern_progress::application::command_handlers::{
    PlaybackOutcome, handle_mark_lecture_viewed, handle_record_playback,
    handle_reset_course_progress,
};
use lectern_progress::application::query_handlers::{ProgressView, get_course_progress};
use lectern_progress::domain::commands::{MarkLectureViewed, RecordPlayback, ResetCourseProgress};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::{Envelope, ok};
use crate::state::AppState;

/// Body of `POST /mark-lecture-viewed`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLectureViewedRequest {
    /// The learner.
    pub user_id: Uuid,
    /// The course.
    pub course_id: Uuid,
    /// The lecture that finished playing.
    pub lecture_id: Uuid,
}

/// Body of `POST /playback`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackRequest {
    /// The learner.
    pub user_id: Uuid,
    /// The course.
    pub course_id: Uuid,
    /// The lecture currently playing.
    pub lecture_id: Uuid,
    /// Played fraction, `0.0` to `1.0`.
    pub fraction: f64,
}

/// Body of `POST /reset-progress`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetProgressRequest {
    /// The learner.
    pub user_id: Uuid,
    /// The course to reset.
    pub course_id: Uuid,
}

/// Response of `POST /playback`.
#[derive(Debug, Serialize)]
pub struct PlaybackResponse {
    /// Whether the report was persisted.
    pub recorded: bool,
    /// Updated progress when recorded.
    pub progress: Option<ProgressView>,
}

/// Response of `POST /reset-progress`.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Always `true`.
    pub reset: bool,
}

/// GET /{user_id}/{course_id}
async fn course_progress(
    State(state): State<AppState>,
    ApiPath((user_id, course_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Envelope<ProgressView>>, ApiError> {
    let view = get_course_progress(
        ProgressKey::new(user_id, course_id),
        state.purchases.as_ref(),
        state.catalog.as_ref(),
        state.progress.as_ref(),
    )
    .await?;
    Ok(ok(view))
}

/// POST /mark-lecture-viewed
async fn mark_lecture_viewed(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<MarkLectureViewedRequest>,
) -> Result<Json<Envelope<ProgressView>>, ApiError> {
    let command = MarkLectureViewed {
        correlation_id: Uuid::now_v7(),
        user_id: body.user_id,
        course_id: body.course_id,
        lecture_id: body.lecture_id,
    };
    let view = handle_mark_lecture_viewed(
        &command,
        state.clock.as_ref(),
        state.purchases.as_ref(),
        state.catalog.as_ref(),
        state.progress.as_ref(),
    )
    .await?;
    Ok(ok(view))
}

/// POST /playback
async fn playback(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PlaybackRequest>,
) -> Result<Json<Envelope<PlaybackResponse>>, ApiError> {
    let command = RecordPlayback {
        correlation_id: Uuid::now_v7(),
        user_id: body.user_id,
        course_id: body.course_id,
        lecture_id: body.lecture_id,
        fraction: body.fraction,
    };
    let outcome = handle_record_playback(
        &command,
        state.clock.as_ref(),
        state.purchases.as_ref(),
        state.catalog.as_ref(),
        state.progress.as_ref(),
    )
    .await?;
    let response = match outcome {
        PlaybackOutcome::Ignored => PlaybackResponse {
            recorded: false,
            progress: None,
        },
        PlaybackOutcome::Recorded(view) => PlaybackResponse {
            recorded: true,
            progress: Some(*view),
        },
    };
    Ok(ok(response))
}

/// POST /reset-progress
async fn reset_progress(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ResetProgressRequest>,
) -> Result<Json<Envelope<ResetResponse>>, ApiError> {
    let command = ResetCourseProgress {
        correlation_id: Uuid::now_v7(),
        user_id: body.user_id,
        course_id: body.course_id,
    };
    handle_reset_course_progress(&command, state.purchases.as_ref(), state.progress.as_ref())
        .await?;
    Ok(ok(ResetResponse { reset: true }))
}

/// Returns the router for the progress context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{user_id}/{course_id}", get(course_progress))
        .route("/mark-lecture-viewed", post(mark_lecture_viewed))
        .route("/playback", post(playback))
        .route("/reset-progress", post(reset_progress))
}
