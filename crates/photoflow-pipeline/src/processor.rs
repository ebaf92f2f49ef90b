//! Image pipeline processor.
//!
//! One invocation per storage-write event: fetch the uploaded object,
//! normalize color, render the three derivatives, store them with
//! presigned links, and notify the uploader. No cross-invocation state;
//! redelivered events overwrite the same derivative keys.

use crate::event::{unescape_key, StorageEvent};
use crate::notify::Notifier;
use photoflow_core::{AppError, Config, ObjectMetadata, SizeProfile};
use photoflow_processing::{prepare_source, render_derivative, ProcessingError};
use photoflow_storage::{keys, Storage, StorageError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Event was not for us (outside the watched prefix, or not an
    /// image). Storage content was never fetched.
    Skipped { reason: String },
    /// Derivatives were produced and stored.
    Processed(PipelineResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub source_key: String,
    pub derivatives: Vec<DerivativeRecord>,
    /// False when every derivative was stored but the notification
    /// publish failed; derivatives are never rolled back.
    pub email_sent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivativeRecord {
    pub profile: SizeProfile,
    pub key: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// The event-triggered image pipeline.
#[derive(Clone)]
pub struct ImagePipeline {
    storage: Arc<dyn Storage>,
    notifier: Notifier,
    config: Config,
}

impl ImagePipeline {
    pub fn new(storage: Arc<dyn Storage>, notifier: Notifier, config: Config) -> Self {
        Self {
            storage,
            notifier,
            config,
        }
    }

    fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.config.upstream_timeout_secs)
    }

    /// Apply the configured upstream timeout to a storage call.
    async fn storage_call<T, F>(&self, operation: &str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        match tokio::time::timeout(self.upstream_timeout(), fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AppError::Storage(format!("{}: {}", operation, e))),
            Err(_) => Err(AppError::Storage(format!(
                "{} timed out after {}s",
                operation,
                self.config.upstream_timeout_secs
            ))),
        }
    }

    /// Handle one storage-write event.
    ///
    /// Keys outside the watched upload prefix and non-image keys are
    /// skipped without fetching object content. A missing uploader
    /// email is a hard failure (malformed upload, not transient): the
    /// event must not be retried.
    pub async fn handle_event(&self, event: &StorageEvent) -> Result<PipelineOutcome, AppError> {
        let record = event
            .first_record()
            .ok_or_else(|| AppError::InvalidInput("Event contains no records".to_string()))?;

        let key = unescape_key(&record.s3.object.key);
        tracing::info!(bucket = %record.s3.bucket.name, key = %key, "Processing storage event");

        if !key.starts_with(&self.config.upload_prefix) {
            tracing::info!(key = %key, prefix = %self.config.upload_prefix, "Skipping: key outside watched prefix");
            return Ok(PipelineOutcome::Skipped {
                reason: "key outside watched prefix".to_string(),
            });
        }

        let supported = keys::extension(&key)
            .map(|ext| self.config.allowed_extensions.contains(&ext))
            .unwrap_or(false);
        if !supported {
            tracing::info!(key = %key, "Skipping: unsupported file extension");
            return Ok(PipelineOutcome::Skipped {
                reason: "unsupported file extension".to_string(),
            });
        }

        self.process(&key).await.map(PipelineOutcome::Processed)
    }

    async fn process(&self, key: &str) -> Result<PipelineResult, AppError> {
        let object = self
            .storage_call("object fetch", self.storage.get(key))
            .await?;

        let metadata = ObjectMetadata::from_map(&object.metadata);
        let email = metadata
            .user_email
            .clone()
            .ok_or_else(|| AppError::MissingMetadata("user-email".to_string()))?;
        let filename = metadata.display_filename().to_string();

        let source = prepare_source(&object.data).map_err(|e| match e {
            ProcessingError::DecodeFailed(msg) => {
                AppError::InvalidInput(format!("Image decode failed: {}", msg))
            }
            ProcessingError::EncodeFailed(msg) => AppError::Internal(msg),
        })?;

        let mut derivatives = Vec::with_capacity(SizeProfile::ALL.len());
        let mut links = Vec::with_capacity(SizeProfile::ALL.len());

        for profile in SizeProfile::ALL {
            let rendered = render_derivative(&source, profile, self.config.jpeg_quality)
                .map_err(|e| AppError::Internal(e.to_string()))?;

            let derivative_key =
                keys::derivative_key(&self.config.derivative_prefix, key, profile.label());

            self.storage_call(
                "derivative store",
                self.storage.put(
                    &derivative_key,
                    rendered.data,
                    "image/jpeg",
                    object.metadata.clone(),
                ),
            )
            .await?;

            let url = self
                .storage_call(
                    "presigned URL generation",
                    self.storage.presigned_get_url(
                        &derivative_key,
                        Duration::from_secs(self.config.presign_expiry_secs),
                    ),
                )
                .await?;

            tracing::info!(
                profile = %profile,
                key = %derivative_key,
                width = rendered.width,
                height = rendered.height,
                "Stored derivative"
            );

            links.push((profile, url.clone()));
            derivatives.push(DerivativeRecord {
                profile,
                key: derivative_key,
                url,
                width: rendered.width,
                height: rendered.height,
            });
        }

        let email_sent = self
            .notifier
            .compose_and_send(&email, &filename, &links)
            .await;

        if email_sent {
            tracing::info!(key = %key, email = %email, "Pipeline complete, notification sent");
        } else {
            tracing::warn!(key = %key, email = %email, "Processing done but notification failed");
        }

        Ok(PipelineResult {
            source_key: key.to_string(),
            derivatives,
            email_sent,
        })
    }
}
