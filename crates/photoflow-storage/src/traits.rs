//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement. Uploaded objects are immutable once written; reprocessing
//! overwrites derivative keys rather than mutating anything in place.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// An object read back from storage: raw bytes plus the string-keyed
/// metadata map attached at write time.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// Storage abstraction trait
///
/// All storage backends (S3, in-memory) implement this trait so the
/// upload gateway and the image pipeline can work against any backend
/// without coupling to implementation details. Presigned URL validity is
/// enforced by the backend's signature, not tracked by callers.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write an object under the given key with a content type and
    /// descriptive metadata. Overwrites any existing object at that key.
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<()>;

    /// Read an object's bytes and metadata by key.
    async fn get(&self, key: &str) -> StorageResult<StoredObject>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Generate a time-limited signed GET URL for direct download.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;
}
