//! Application state.
//!
//! All collaborator handles are injected as `Arc<dyn ...>` capability
//! traits, constructed once at startup. Handlers clone the state; no
//! globals, no per-request construction.

use photoflow_access::{AccessLookup, AccessRequestService};
use photoflow_core::Config;
use photoflow_pipeline::ImagePipeline;
use photoflow_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub access: Arc<dyn AccessLookup>,
    pub access_requests: AccessRequestService,
    pub pipeline: ImagePipeline,
}
