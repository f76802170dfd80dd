//! Route modules organized by bounded context.

pub mod courses;
pub mod health;
pub mod instructor;
pub mod progress;
pub mod students;

use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Success envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Always `true`; failures use `ErrorBody`.
    pub success: bool,
    /// The response payload.
    pub data: T,
}

pub(crate) fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
    })
}

/// Returns the full application router, without middleware or state.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/course-progress", progress::router())
        .nest("/api/v1/courses", courses::router())
        .nest("/api/v1/students", students::router())
        .nest("/api/v1/instructor/courses", instructor::router())
}
