//! In-memory storage backend for tests and local development.

use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory object store. Presigned URLs are synthetic but carry the
/// key and expiry so tests can assert on their shape.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    downloads: Arc<AtomicU64>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls served. Lets tests assert that skipped
    /// pipeline events never fetched object content.
    pub fn download_count(&self) -> u64 {
        self.downloads.load(Ordering::Relaxed)
    }

    /// All keys currently stored, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<()> {
        let object = StoredObject {
            data,
            content_type: Some(content_type.to_string()),
            metadata,
        };
        self.objects.write().await.insert(key.to_string(), object);
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        self.downloads.fetch_add(1, Ordering::Relaxed);
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        if !self.objects.read().await.contains_key(key) {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(format!(
            "https://storage.invalid/{}?X-Expires={}",
            key,
            expires_in.as_secs()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let storage = MemoryStorage::new();
        let mut metadata = HashMap::new();
        metadata.insert("user-email".to_string(), "a@b.com".to_string());

        storage
            .put("uploads/x.png", vec![1, 2, 3], "image/png", metadata)
            .await
            .unwrap();

        let object = storage.get("uploads/x.png").await.unwrap();
        assert_eq!(object.data, vec![1, 2, 3]);
        assert_eq!(object.content_type.as_deref(), Some("image/png"));
        assert_eq!(
            object.metadata.get("user-email").map(String::as_str),
            Some("a@b.com")
        );
        assert_eq!(storage.download_count(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let storage = MemoryStorage::new();
        match storage.get("nope").await {
            Err(StorageError::NotFound(key)) => assert_eq!(key, "nope"),
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let storage = MemoryStorage::new();
        storage
            .put("k", vec![1], "image/jpeg", HashMap::new())
            .await
            .unwrap();
        storage
            .put("k", vec![2, 2], "image/jpeg", HashMap::new())
            .await
            .unwrap();
        assert_eq!(storage.get("k").await.unwrap().data, vec![2, 2]);
    }

    #[tokio::test]
    async fn test_presigned_url_requires_object() {
        let storage = MemoryStorage::new();
        assert!(storage
            .presigned_get_url("missing", Duration::from_secs(60))
            .await
            .is_err());

        storage
            .put("k.jpg", vec![1], "image/jpeg", HashMap::new())
            .await
            .unwrap();
        let url = storage
            .presigned_get_url("k.jpg", Duration::from_secs(604_800))
            .await
            .unwrap();
        assert!(url.contains("k.jpg"));
        assert!(url.contains("604800"));
    }
}
