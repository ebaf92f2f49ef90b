//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use photoflow_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: AppState) -> Router {
    // Browser clients upload from static pages on other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // The decoded payload cap is enforced by the upload handler; the
    // body limit only has to admit its base64 form plus JSON envelope.
    // Axum's built-in 2 MB default body limit would reject uploads
    // inside the Json extractor before either check runs, so it is
    // raised to the same bound.
    let body_limit = config.max_file_size_bytes * 2;

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/upload", post(handlers::upload::upload))
        .route("/access-requests", post(handlers::access::request_access))
        .route("/events/storage", post(handlers::events::storage_event))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
