//! Access request endpoint integration tests.
//!
//! Run with: `cargo test -p photoflow-api --test access_test`

mod helpers;

use axum::http::StatusCode;
use helpers::setup_test_app;
use serde_json::json;

#[tokio::test]
async fn test_first_request_sends_verification() {
    let app = setup_test_app();

    let (status, body) = app
        .post_json("/access-requests", json!({ "email": "new@example.com" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "verification_sent");
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(app.topic.subscription_count("new@example.com").await, 1);
}

#[tokio::test]
async fn test_repeat_request_reports_pending_without_duplicate() {
    let app = setup_test_app();

    let (_, first) = app
        .post_json("/access-requests", json!({ "email": "user@example.com" }))
        .await;
    assert_eq!(first["status"], "verification_sent");

    let (status, second) = app
        .post_json("/access-requests", json!({ "email": "user@example.com" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["status"], "pending");
    assert_eq!(app.topic.subscription_count("user@example.com").await, 1);
}

#[tokio::test]
async fn test_confirmed_email_reports_approved() {
    let app = setup_test_app();
    app.topic.add_subscription("done@example.com", true).await;

    let (status, body) = app
        .post_json("/access-requests", json!({ "email": "done@example.com" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(app.topic.subscription_count("done@example.com").await, 1);
}

#[tokio::test]
async fn test_email_without_at_sign_rejected() {
    let app = setup_test_app();

    let (status, body) = app
        .post_json("/access-requests", json!({ "email": "not-an-email" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(body["error"], "Invalid input: Invalid email address");
}

#[tokio::test]
async fn test_missing_email_rejected() {
    let app = setup_test_app();

    let (status, body) = app.post_json("/access-requests", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}
