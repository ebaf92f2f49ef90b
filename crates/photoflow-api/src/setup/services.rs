//! Service construction.
//!
//! Builds the storage and pub/sub backends selected by configuration and
//! wires the access and pipeline services on top of them. Everything is
//! constructed once here and injected as capability handles.

use crate::state::AppState;
use photoflow_access::{AccessRequestService, TopicAccessRegistry};
use photoflow_core::{Config, PubSubBackend, StorageBackend};
use photoflow_pipeline::{ImagePipeline, Notifier};
use photoflow_pubsub::{MemoryTopic, SnsTopic, Topic};
use photoflow_storage::{MemoryStorage, S3Storage, Storage};
use std::sync::Arc;
use std::time::Duration;

pub async fn build_state(config: &Config) -> Result<AppState, anyhow::Error> {
    let storage = build_storage(config)?;
    let topic = build_topic(config).await?;

    let registry = Arc::new(TopicAccessRegistry::new(topic.clone()));
    let access_requests = AccessRequestService::new(registry.clone(), topic.clone());

    let notifier = Notifier::new(
        topic,
        Duration::from_secs(config.upstream_timeout_secs),
    );
    let pipeline = ImagePipeline::new(storage.clone(), notifier, config.clone());

    Ok(AppState {
        config: config.clone(),
        storage,
        access: registry,
        access_requests,
        pipeline,
    })
}

fn build_storage(config: &Config) -> Result<Arc<dyn Storage>, anyhow::Error> {
    match config.storage_backend {
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| anyhow::anyhow!("S3_BUCKET must be set for the s3 backend"))?;
            tracing::info!(bucket = %bucket, "Using S3 storage backend");
            let storage = S3Storage::new(
                bucket,
                config.s3_region.clone(),
                config.s3_endpoint.clone(),
            )?;
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage backend");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

async fn build_topic(config: &Config) -> Result<Arc<dyn Topic>, anyhow::Error> {
    match config.pubsub_backend {
        PubSubBackend::Sns => {
            let topic_arn = config
                .sns_topic_arn
                .clone()
                .ok_or_else(|| anyhow::anyhow!("SNS_TOPIC_ARN must be set for the sns backend"))?;
            tracing::info!(topic_arn = %topic_arn, "Using SNS pub/sub backend");
            Ok(Arc::new(SnsTopic::from_env(topic_arn).await))
        }
        PubSubBackend::Memory => {
            tracing::info!("Using in-memory pub/sub backend");
            Ok(Arc::new(MemoryTopic::new()))
        }
    }
}
