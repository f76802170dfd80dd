//! Integration tests for student enrollment.

mod common;

use axum::http::StatusCode;
use lectern_test_support::course_with_lectures;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_purchase_then_list_and_unlock_progress() {
    let app = common::TestApp::new();
    let lectures = [Uuid::new_v4()];
    let course = course_with_lectures(Uuid::new_v4(), &lectures);
    app.catalog.put(course.clone());
    let user_id = Uuid::new_v4();

    // Locked before purchase
    let status = common::get_status(
        app.router(),
        &format!("/api/v1/course-progress/{user_id}/{}", course.id),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = common::post_json(
        app.router(),
        &format!("/api/v1/students/{user_id}/courses"),
        &json!({ "courseId": course.id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["courseId"], course.id.to_string());

    let (status, json) =
        common::get_json(app.router(), &format!("/api/v1/students/{user_id}/courses")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], course.title);

    let (status, json) = common::get_json(
        app.router(),
        &format!("/api/v1/course-progress/{user_id}/{}", course.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["nextLecture"]["id"], lectures[0].to_string());
}

#[tokio::test]
async fn test_new_student_has_no_courses() {
    let app = common::TestApp::new();

    let (status, json) = common::get_json(
        app.router(),
        &format!("/api/v1/students/{}/courses", Uuid::new_v4()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn test_purchasing_missing_course_returns_404() {
    let app = common::TestApp::new();

    let (status, json) = common::post_json(
        app.router(),
        &format!("/api/v1/students/{}/courses", Uuid::new_v4()),
        &json!({ "courseId": Uuid::new_v4() }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "course_not_found");
}
