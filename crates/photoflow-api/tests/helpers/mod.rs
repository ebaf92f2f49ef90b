//! Shared test harness: the full router wired to in-memory backends.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use photoflow_access::{AccessRequestService, TopicAccessRegistry};
use photoflow_api::setup::routes::setup_routes;
use photoflow_api::state::AppState;
use photoflow_core::Config;
use photoflow_pipeline::{ImagePipeline, Notifier};
use photoflow_pubsub::{MemoryTopic, Topic};
use photoflow_storage::MemoryStorage;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub mod fixtures;

/// The application over in-memory backends, with direct handles to the
/// backends so tests can seed and inspect state.
pub struct TestApp {
    pub router: Router,
    pub storage: MemoryStorage,
    pub topic: MemoryTopic,
    pub config: Config,
}

pub fn setup_test_app() -> TestApp {
    let config = Config::for_testing();
    let storage = MemoryStorage::new();
    let topic = MemoryTopic::new();

    let topic_handle: Arc<dyn Topic> = Arc::new(topic.clone());
    let registry = Arc::new(TopicAccessRegistry::new(topic_handle.clone()));
    let access_requests = AccessRequestService::new(registry.clone(), topic_handle.clone());
    let notifier = Notifier::new(
        topic_handle,
        Duration::from_secs(config.upstream_timeout_secs),
    );
    let pipeline = ImagePipeline::new(Arc::new(storage.clone()), notifier, config.clone());

    let state = AppState {
        config: config.clone(),
        storage: Arc::new(storage.clone()),
        access: registry,
        access_requests,
        pipeline,
    };

    let router = setup_routes(&config, state);
    TestApp {
        router,
        storage,
        topic,
        config,
    }
}

impl TestApp {
    /// POST a JSON body and return (status, parsed JSON response).
    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }
}
