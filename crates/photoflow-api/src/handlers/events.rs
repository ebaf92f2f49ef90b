//! Storage event webhook.
//!
//! Storage-write notifications arrive here (one record per object
//! write) and drive the image pipeline. Skips are 200s so the notifier
//! never redelivers events the pipeline deliberately ignored.

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use photoflow_pipeline::{PipelineOutcome, StorageEvent};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_sent: Option<bool>,
}

pub async fn storage_event(
    State(state): State<AppState>,
    ValidatedJson(event): ValidatedJson<StorageEvent>,
) -> Result<Json<EventResponse>, HttpAppError> {
    match state.pipeline.handle_event(&event).await? {
        PipelineOutcome::Skipped { reason } => Ok(Json(EventResponse {
            message: format!("Skipped: {}", reason),
            email_sent: None,
        })),
        PipelineOutcome::Processed(result) => Ok(Json(EventResponse {
            message: "Success".to_string(),
            email_sent: Some(result.email_sent),
        })),
    }
}
