//! Access request handler.

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use photoflow_access::AccessRequestOutcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AccessRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub message: String,
    pub status: AccessRequestOutcomeBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Response wire names for request outcomes.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequestOutcomeBody {
    Approved,
    Pending,
    VerificationSent,
}

pub async fn request_access(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AccessRequest>,
) -> Result<Json<AccessResponse>, HttpAppError> {
    let email = request.email.unwrap_or_default();

    let outcome = state.access_requests.request_access(&email).await?;

    let response = match outcome {
        AccessRequestOutcome::AlreadyApproved => AccessResponse {
            message: "Your email is already approved! You can upload images now.".to_string(),
            status: AccessRequestOutcomeBody::Approved,
            email: None,
        },
        AccessRequestOutcome::AlreadyPending => AccessResponse {
            message: "Verification email already sent! Check your inbox and click the confirmation link."
                .to_string(),
            status: AccessRequestOutcomeBody::Pending,
            email: None,
        },
        AccessRequestOutcome::VerificationSent => AccessResponse {
            message: "Verification email sent! Check your inbox and click the confirmation link. Once confirmed, you can immediately use the service."
                .to_string(),
            status: AccessRequestOutcomeBody::VerificationSent,
            email: Some(email),
        },
    };

    Ok(Json(response))
}
