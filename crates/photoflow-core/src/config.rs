//! Configuration module
//!
//! Application configuration loaded from the environment, with sane
//! defaults for local development. Secrets and collaborator endpoints
//! (bucket, topic ARN) come from the environment only.

use std::env;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_FILE_SIZE_MB: usize = 10;
const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 604_800; // 7 days
const DEFAULT_JPEG_QUALITY: u8 = 90;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Memory,
}

/// Pub/sub backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PubSubBackend {
    Sns,
    Memory,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,

    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers

    // Pub/sub configuration
    pub pubsub_backend: PubSubBackend,
    pub sns_topic_arn: Option<String>,

    // Object layout
    pub upload_prefix: String,
    pub derivative_prefix: String,

    // Upload validation
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,

    // Derivative output
    pub jpeg_quality: u8,
    pub presign_expiry_secs: u64,

    // Upstream call behavior
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            _ => StorageBackend::S3,
        };

        let pubsub_backend = match env::var("PUBSUB_BACKEND")
            .unwrap_or_else(|_| "sns".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => PubSubBackend::Memory,
            _ => PubSubBackend::Sns,
        };

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "jpg,jpeg,png,gif,webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            pubsub_backend,
            sns_topic_arn: env::var("SNS_TOPIC_ARN").ok(),
            upload_prefix: env::var("UPLOAD_PREFIX").unwrap_or_else(|_| "uploads/".to_string()),
            derivative_prefix: env::var("DERIVATIVE_PREFIX")
                .unwrap_or_else(|_| "processed/".to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_extensions,
            jpeg_quality: env::var("JPEG_QUALITY")
                .unwrap_or_else(|_| DEFAULT_JPEG_QUALITY.to_string())
                .parse()
                .unwrap_or(DEFAULT_JPEG_QUALITY),
            presign_expiry_secs: env::var("PRESIGN_EXPIRY_SECS")
                .unwrap_or_else(|_| DEFAULT_PRESIGN_EXPIRY_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_PRESIGN_EXPIRY_SECS),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that can never work: missing collaborator
    /// endpoints for the selected backends, or overlapping input/output
    /// prefixes (the derivative write would re-trigger the upload event
    /// pattern and loop forever).
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_backend == StorageBackend::S3 && self.s3_bucket.is_none() {
            return Err(anyhow::anyhow!("S3_BUCKET must be set for the s3 backend"));
        }

        if self.pubsub_backend == PubSubBackend::Sns && self.sns_topic_arn.is_none() {
            return Err(anyhow::anyhow!(
                "SNS_TOPIC_ARN must be set for the sns backend"
            ));
        }

        if self.upload_prefix.is_empty() || self.derivative_prefix.is_empty() {
            return Err(anyhow::anyhow!(
                "UPLOAD_PREFIX and DERIVATIVE_PREFIX must be non-empty"
            ));
        }

        if self.upload_prefix.starts_with(&self.derivative_prefix)
            || self.derivative_prefix.starts_with(&self.upload_prefix)
        {
            return Err(anyhow::anyhow!(
                "UPLOAD_PREFIX ({}) and DERIVATIVE_PREFIX ({}) must not overlap",
                self.upload_prefix,
                self.derivative_prefix
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must not be empty"));
        }

        Ok(())
    }

    /// Configuration suitable for tests and local development: in-memory
    /// backends, default limits.
    pub fn for_testing() -> Self {
        Config {
            server_port: 0,
            storage_backend: StorageBackend::Memory,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            pubsub_backend: PubSubBackend::Memory,
            sns_topic_arn: None,
            upload_prefix: "uploads/".to_string(),
            derivative_prefix: "processed/".to_string(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
            allowed_extensions: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "gif".to_string(),
                "webp".to_string(),
            ],
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            presign_expiry_secs: DEFAULT_PRESIGN_EXPIRY_SECS,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testing_config_is_valid() {
        let config = Config::for_testing();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_file_size_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_overlapping_prefixes_rejected() {
        let mut config = Config::for_testing();
        config.derivative_prefix = "uploads/processed/".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::for_testing();
        config.derivative_prefix = config.upload_prefix.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_s3_backend_requires_bucket() {
        let mut config = Config::for_testing();
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());

        config.s3_bucket = Some("photos".to_string());
        assert!(config.validate().is_ok());
    }
}
