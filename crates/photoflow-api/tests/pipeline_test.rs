//! End-to-end pipeline integration tests, driven through the storage
//! event webhook.
//!
//! Run with: `cargo test -p photoflow-api --test pipeline_test`

mod helpers;

use axum::http::StatusCode;
use helpers::{fixtures, setup_test_app, TestApp};
use photoflow_core::models::{META_ORIGINAL_FILENAME, META_USER_EMAIL};
use photoflow_storage::Storage;
use serde_json::json;
use std::collections::HashMap;

fn storage_event(key: &str) -> serde_json::Value {
    json!({
        "Records": [{
            "s3": {
                "bucket": { "name": "photos" },
                "object": { "key": key }
            }
        }]
    })
}

async fn seed_image(app: &TestApp, key: &str, data: Vec<u8>, email: Option<&str>) {
    let mut metadata = HashMap::new();
    if let Some(email) = email {
        metadata.insert(META_USER_EMAIL.to_string(), email.to_string());
    }
    metadata.insert(META_ORIGINAL_FILENAME.to_string(), "photo.PNG".to_string());
    app.storage
        .put(key, data, "image/png", metadata)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_then_event_produces_derivatives_and_notification() {
    let app = setup_test_app();
    app.topic.add_subscription("confirmed@example.com", true).await;

    // Upload through the gateway, exactly as a browser would.
    let (status, _) = app
        .post_json(
            "/upload",
            json!({
                "email": "confirmed@example.com",
                "image": fixtures::png_data_url(2000, 1000),
                "fileName": "photo.PNG"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let upload_key = app.storage.keys().await.into_iter().next().unwrap();

    let (status, body) = app
        .post_json("/events/storage", storage_event(&upload_key))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Success");
    assert_eq!(body["email_sent"], true);

    let derivative_keys: Vec<String> = app
        .storage
        .keys()
        .await
        .into_iter()
        .filter(|k| k.starts_with("processed/"))
        .collect();
    assert_eq!(derivative_keys.len(), 3);
    for label in ["thumbnail", "medium", "large"] {
        assert!(
            derivative_keys.iter().any(|k| k.ends_with(&format!("_{}.jpg", label))),
            "missing {} derivative",
            label
        );
    }

    let published = app.topic.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].recipient, "confirmed@example.com");
    assert_eq!(published[0].message.matches("https://").count(), 3);
}

#[tokio::test]
async fn test_event_outside_prefix_is_skipped() {
    let app = setup_test_app();

    let (status, body) = app
        .post_json("/events/storage", storage_event("archive/readme.txt"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().starts_with("Skipped"));
    // Storage content was never fetched.
    assert_eq!(app.storage.download_count(), 0);
}

#[tokio::test]
async fn test_event_for_object_without_email_fails() {
    let app = setup_test_app();
    seed_image(&app, "uploads/a.png", fixtures::png_bytes(100, 100), None).await;

    let (status, body) = app
        .post_json("/events/storage", storage_event("uploads/a.png"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_METADATA");
    assert!(app.topic.published().await.is_empty());
}

#[tokio::test]
async fn test_event_key_is_unescaped_before_lookup() {
    let app = setup_test_app();
    seed_image(
        &app,
        "uploads/my photo(1).png",
        fixtures::png_bytes(300, 200),
        Some("confirmed@example.com"),
    )
    .await;

    let (status, body) = app
        .post_json(
            "/events/storage",
            storage_event("uploads/my+photo%281%29.png"),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Success");
}

#[tokio::test]
async fn test_publish_failure_reports_email_not_sent() {
    let app = setup_test_app();
    app.topic.set_fail_publish(true);
    seed_image(
        &app,
        "uploads/b.png",
        fixtures::png_bytes(800, 600),
        Some("confirmed@example.com"),
    )
    .await;

    let (status, body) = app
        .post_json("/events/storage", storage_event("uploads/b.png"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Success");
    assert_eq!(body["email_sent"], false);

    // Derivatives are kept even though the notification failed.
    let derivative_count = app
        .storage
        .keys()
        .await
        .into_iter()
        .filter(|k| k.starts_with("processed/"))
        .count();
    assert_eq!(derivative_count, 3);
}

#[tokio::test]
async fn test_event_with_no_records_rejected() {
    let app = setup_test_app();

    let (status, body) = app.post_json("/events/storage", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}
