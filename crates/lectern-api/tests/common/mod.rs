//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lectern_core::catalog::Course;
use lectern_core::progress::ProgressRepository;
use lectern_core::purchase::PurchaseLedger;
use lectern_test_support::{
    FailingProgressRepository, FixedClock, InMemoryCourseCatalog, InMemoryProgressRepository,
    InMemoryPurchaseLedger, course_with_lectures, fixed_now, purchase_of,
};
use tower::ServiceExt;
use uuid::Uuid;

use lectern_api::routes;
use lectern_api::state::AppState;

/// In-memory collaborators behind a router, kept so tests can inspect them.
pub struct TestApp {
    pub catalog: Arc<InMemoryCourseCatalog>,
    pub purchases: Arc<InMemoryPurchaseLedger>,
    pub progress: Arc<InMemoryProgressRepository>,
    router: Router,
}

impl TestApp {
    /// Build the full app router over empty in-memory stores and a fixed
    /// clock. Uses the same route structure as `main.rs`.
    pub fn new() -> Self {
        let catalog = Arc::new(InMemoryCourseCatalog::default());
        let purchases = Arc::new(InMemoryPurchaseLedger::new());
        let progress = Arc::new(InMemoryProgressRepository::new());
        let router = build_router(catalog.clone(), purchases.clone(), progress.clone());
        Self {
            catalog,
            purchases,
            progress,
            router,
        }
    }

    /// A fresh clone of the router for one request.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

fn build_router(
    catalog: Arc<InMemoryCourseCatalog>,
    purchases: Arc<dyn PurchaseLedger>,
    progress: Arc<dyn ProgressRepository>,
) -> Router {
    let state = AppState::new(Arc::new(FixedClock(fixed_now())), catalog, purchases, progress);
    routes::router().with_state(state)
}

/// Build a router whose progress store always fails.
pub fn build_failing_app(catalog: Arc<InMemoryCourseCatalog>, purchases: Arc<InMemoryPurchaseLedger>) -> Router {
    build_router(catalog, purchases, Arc::new(FailingProgressRepository))
}

/// Seed a course with `lecture_count` lectures owned by a new learner.
/// Returns `(user_id, course, lecture_ids)`.
pub async fn seed_purchased_course(app: &TestApp, lecture_count: usize) -> (Uuid, Course, Vec<Uuid>) {
    let user_id = Uuid::new_v4();
    let lectures: Vec<Uuid> = (0..lecture_count).map(|_| Uuid::new_v4()).collect();
    let course = course_with_lectures(Uuid::new_v4(), &lectures);
    app.catalog.put(course.clone());
    app.purchases
        .record_purchase(user_id, purchase_of(&course, fixed_now()))
        .await
        .unwrap();
    (user_id, course, lectures)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, body).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "PUT", uri, body).await
}

async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return only the status, for non-JSON responses.
pub async fn get_status(app: Router, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}
