//! Integration tests for the Course Progress bounded context.

mod common;

use axum::http::StatusCode;
use lectern_core::progress::ProgressKey;
use serde_json::json;
use uuid::Uuid;

fn mark_body(user_id: Uuid, course_id: Uuid, lecture_id: Uuid) -> serde_json::Value {
    json!({ "userId": user_id, "courseId": course_id, "lectureId": lecture_id })
}

#[tokio::test]
async fn test_first_visit_resumes_at_first_lecture() {
    let app = common::TestApp::new();
    let (user_id, course, lectures) = common::seed_purchased_course(&app, 3).await;

    let (status, json) = common::get_json(
        app.router(),
        &format!("/api/v1/course-progress/{user_id}/{}", course.id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["isPurchased"], true);
    assert_eq!(json["data"]["completed"], false);
    assert_eq!(json["data"]["nextLecture"]["id"], lectures[0].to_string());
    assert_eq!(json["data"]["progress"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["courseDetails"]["title"], course.title);
}

#[tokio::test]
async fn test_watching_lectures_in_order_completes_course() {
    let app = common::TestApp::new();
    let (user_id, course, lectures) = common::seed_purchased_course(&app, 2).await;

    // Watch L1
    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/course-progress/mark-lecture-viewed",
        &mark_body(user_id, course.id, lectures[0]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["completed"], false);
    assert_eq!(json["data"]["nextLecture"]["id"], lectures[1].to_string());

    // Watch L2
    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/course-progress/mark-lecture-viewed",
        &mark_body(user_id, course.id, lectures[1]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["completed"], true);
    assert!(json["data"]["completionDate"].is_string());
    assert!(json["data"]["nextLecture"].is_null());
    assert_eq!(json["data"]["percentComplete"], 100);

    // GET reflects the completion
    let (status, json) = common::get_json(
        app.router(),
        &format!("/api/v1/course-progress/{user_id}/{}", course.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["completed"], true);
    assert_eq!(json["data"]["state"], "completed");
}

#[tokio::test]
async fn test_marking_same_lecture_twice_keeps_one_record() {
    let app = common::TestApp::new();
    let (user_id, course, lectures) = common::seed_purchased_course(&app, 3).await;

    for _ in 0..2 {
        let (status, _) = common::post_json(
            app.router(),
            "/api/v1/course-progress/mark-lecture-viewed",
            &mark_body(user_id, course.id, lectures[0]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let stored = app
        .progress
        .snapshot(ProgressKey::new(user_id, course.id))
        .unwrap();
    assert_eq!(stored.lecture_progress.len(), 1);
}

#[tokio::test]
async fn test_unpurchased_course_returns_403_with_locked_flag() {
    let app = common::TestApp::new();
    let (_, course, lectures) = common::seed_purchased_course(&app, 2).await;
    let stranger = Uuid::new_v4();

    let (status, json) = common::get_json(
        app.router(),
        &format!("/api/v1/course-progress/{stranger}/{}", course.id),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "not_purchased");
    assert_eq!(json["data"]["isPurchased"], false);

    let (status, _) = common::post_json(
        app.router(),
        "/api/v1/course-progress/mark-lecture-viewed",
        &mark_body(stranger, course.id, lectures[0]),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(
        app.progress
            .snapshot(ProgressKey::new(stranger, course.id))
            .is_none()
    );
    assert_eq!(app.progress.write_count(), 0);
}

#[tokio::test]
async fn test_unknown_lecture_returns_404() {
    let app = common::TestApp::new();
    let (user_id, course, _) = common::seed_purchased_course(&app, 2).await;

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/course-progress/mark-lecture-viewed",
        &mark_body(user_id, course.id, Uuid::new_v4()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "unknown_lecture");
}

#[tokio::test]
async fn test_reset_returns_learner_to_first_lecture() {
    let app = common::TestApp::new();
    let (user_id, course, lectures) = common::seed_purchased_course(&app, 1).await;
    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/course-progress/mark-lecture-viewed",
        &mark_body(user_id, course.id, lectures[0]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["completed"], true);

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/course-progress/reset-progress",
        &json!({ "userId": user_id, "courseId": course.id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["reset"], true);

    let (status, json) = common::get_json(
        app.router(),
        &format!("/api/v1/course-progress/{user_id}/{}", course.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["completed"], false);
    assert!(json["data"]["completionDate"].is_null());
    assert_eq!(json["data"]["nextLecture"]["id"], lectures[0].to_string());
    assert_eq!(json["data"]["state"], "not_started");
}

#[tokio::test]
async fn test_partial_playback_is_not_recorded() {
    let app = common::TestApp::new();
    let (user_id, course, lectures) = common::seed_purchased_course(&app, 2).await;

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/course-progress/playback",
        &json!({
            "userId": user_id,
            "courseId": course.id,
            "lectureId": lectures[0],
            "fraction": 0.5,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["recorded"], false);
    assert!(json["data"]["progress"].is_null());
    assert_eq!(app.progress.write_count(), 0);
}

#[tokio::test]
async fn test_finished_playback_marks_lecture_viewed() {
    let app = common::TestApp::new();
    let (user_id, course, lectures) = common::seed_purchased_course(&app, 2).await;

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/course-progress/playback",
        &json!({
            "userId": user_id,
            "courseId": course.id,
            "lectureId": lectures[0],
            "fraction": 1.0,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["recorded"], true);
    assert_eq!(
        json["data"]["progress"]["nextLecture"]["id"],
        lectures[1].to_string()
    );
}

#[tokio::test]
async fn test_out_of_range_playback_returns_400() {
    let app = common::TestApp::new();
    let (user_id, course, lectures) = common::seed_purchased_course(&app, 1).await;

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/course-progress/playback",
        &json!({
            "userId": user_id,
            "courseId": course.id,
            "lectureId": lectures[0],
            "fraction": 1.5,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_malformed_id_is_rejected_with_error_envelope() {
    let app = common::TestApp::new();

    let (status, json) = common::get_json(
        app.router(),
        &format!("/api/v1/course-progress/not-a-uuid/{}", Uuid::new_v4()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "validation_error");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_body_missing_lecture_id_is_rejected_with_error_envelope() {
    let app = common::TestApp::new();
    let (user_id, course, _) = common::seed_purchased_course(&app, 1).await;

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/course-progress/mark-lecture-viewed",
        &json!({ "userId": user_id, "courseId": course.id }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "validation_error");
    assert!(json["message"].as_str().unwrap().contains("lectureId"));
    assert!(
        app.progress
            .snapshot(ProgressKey::new(user_id, course.id))
            .is_none()
    );
}

#[tokio::test]
async fn test_store_failure_returns_503() {
    let app = common::TestApp::new();
    let (user_id, course, _) = common::seed_purchased_course(&app, 1).await;
    let failing = common::build_failing_app(app.catalog.clone(), app.purchases.clone());

    let (status, json) = common::get_json(
        failing,
        &format!("/api/v1/course-progress/{user_id}/{}", course.id),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "store_unavailable");
}
