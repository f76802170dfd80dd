//! Routes for a learner's purchased courses.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use lectern_catalog::application::command_handlers::handle_record_purchase;
use lectern_catalog::application::query_handlers::get_purchased_courses;
use lectern_catalog::domain::commands::RecordPurchase;
use lectern_core::purchase::PurchasedCourse;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::{Envelope, ok};
use crate::state::AppState;

/// Body of `POST /{user_id}/courses`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPurchaseRequest {
    /// The course bought.
    pub course_id: Uuid,
}

/// GET /{user_id}/courses
async fn purchased_courses(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Envelope<Vec<PurchasedCourse>>>, ApiError> {
    let courses = get_purchased_courses(user_id, state.purchases.as_ref()).await?;
    Ok(ok(courses))
}

/// POST /{user_id}/courses
async fn record_purchase(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<RecordPurchaseRequest>,
) -> Result<(StatusCode, Json<Envelope<PurchasedCourse>>), ApiError> {
    let command = RecordPurchase {
        correlation_id: Uuid::now_v7(),
        user_id,
        course_id: body.course_id,
    };
    let purchase = handle_record_purchase(
        &command,
        state.clock.as_ref(),
        state.catalog.as_ref(),
        state.purchases.as_ref(),
    )
    .await?;
    Ok((StatusCode::CREATED, ok(purchase)))
}

/// Returns the router for student enrollment.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{user_id}/courses",
        get(purchased_courses).post(record_purchase),
    )
}
