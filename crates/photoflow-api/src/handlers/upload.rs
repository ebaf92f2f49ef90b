//! Upload gateway handler.
//!
//! Validation runs in a fixed order so clients see the cheapest
//! applicable rejection: missing fields, then access list, then file
//! type, then decoded size. The response carries a short opaque upload
//! id, not the storage key.

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use photoflow_core::{AppError, ObjectMetadata};
use photoflow_storage::keys;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub email: Option<String>,
    /// Base64 image payload, with or without a data-URL prefix.
    pub image: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(rename = "uploadId")]
    pub upload_id: String,
}

pub async fn upload(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UploadRequest>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let email = request.email.as_deref().unwrap_or("");
    let image = request.image.as_deref().unwrap_or("");
    let file_name = request.file_name.as_deref().unwrap_or("image.jpg");

    if email.is_empty() || image.is_empty() {
        return Err(AppError::InvalidInput("Missing email or image".to_string()).into());
    }

    tracing::info!(email = %email, file_name = %file_name, "Upload request");

    if !state.access.check(email).await.is_confirmed() {
        return Err(AppError::Unauthorized(
            "Your email is not on the approved list. Please request access first.".to_string(),
        )
        .into());
    }

    let extension = keys::extension(file_name)
        .filter(|ext| state.config.allowed_extensions.contains(ext))
        .ok_or_else(|| AppError::UnsupportedType(file_name.to_string()))?;

    // Browsers send "data:image/png;base64,<payload>"; storage gets the
    // payload only.
    let payload = image.rsplit_once(',').map(|(_, p)| p).unwrap_or(image);
    let data = BASE64
        .decode(payload)
        .map_err(|e| AppError::InvalidInput(format!("Invalid base64 image data: {}", e)))?;

    if data.len() > state.config.max_file_size_bytes {
        return Err(AppError::PayloadTooLarge {
            size: data.len(),
            max: state.config.max_file_size_bytes,
        }
        .into());
    }

    let (key, upload_id) = keys::upload_key(&state.config.upload_prefix, &extension);
    let timestamp = Utc::now().format("%Y%m%d-%H%M%S").to_string();
    let metadata = ObjectMetadata::new(email, file_name, &timestamp);

    state
        .storage
        .put(
            &key,
            data,
            keys::content_type_for_extension(&extension),
            metadata.to_map(),
        )
        .await?;

    tracing::info!(key = %key, email = %email, upload_id = %upload_id, "Upload stored");

    Ok(Json(UploadResponse {
        message: "Upload successful!".to_string(),
        upload_id,
    }))
}
