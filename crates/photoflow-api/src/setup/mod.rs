//! Application initialization.

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use axum::Router;
use photoflow_core::Config;

/// Build the collaborator backends, services, and router for `config`.
pub async fn initialize_app(config: &Config) -> Result<(AppState, Router), anyhow::Error> {
    let state = services::build_state(config).await?;
    let router = routes::setup_routes(config, state.clone());
    Ok((state, router))
}
