//! S3 storage implementation

use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::borrow::Cow;
use std::collections::HashMap;
use std::time::Duration;

/// S3 storage backed by `object_store`'s AmazonS3 client.
///
/// Works against AWS S3 or any S3-compatible provider (MinIO, Spaces)
/// via a custom endpoint. Presigned GET URLs are produced by the
/// client-side signer; their validity window is enforced by the
/// signature, not by this crate.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(
        bucket: String,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket.clone());

        if let Some(region) = region {
            builder = builder.with_region(region);
        }

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage { store, bucket })
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<()> {
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = Path::from(key.to_string());
        let start = std::time::Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        for (name, value) in metadata {
            attributes.insert(Attribute::Metadata(Cow::Owned(name)), value.into());
        }

        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(bytes), opts)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 put failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 put successful"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        let start = std::time::Instant::now();
        let location = Path::from(key.to_string());

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 get failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let mut content_type = None;
        let mut metadata = HashMap::new();
        for (attr, value) in result.attributes.iter() {
            match attr {
                Attribute::ContentType => content_type = Some(value.as_ref().to_string()),
                Attribute::Metadata(name) => {
                    metadata.insert(name.to_string(), value.as_ref().to_string());
                }
                _ => {}
            }
        }

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 get successful"
        );

        Ok(StoredObject {
            data: bytes.to_vec(),
            content_type,
            metadata,
        })
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let location = Path::from(key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let location = Path::from(key.to_string());
        let url_result: ObjectResult<_> = self
            .store
            .signed_url(Method::GET, &location, expires_in)
            .await;

        let url = url_result
            .map_err(|e| StorageError::BackendError(e.to_string()))?
            .to_string();

        Ok(url)
    }
}
