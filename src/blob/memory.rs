//! Process-local offload store for local runs and tests.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use crate::blob::{new_object_key, BlobError, BlobStore, StoredBlob, CONTENT_ENCODING_GZIP, SIGNED_URL_TTL};

/// An object held by [`InMemoryBlobStore`].
#[derive(Debug, Clone)]
pub struct MemoryObject {
    pub content: Bytes,
    pub content_type: String,
    pub content_encoding: String,
    pub expires_at: SystemTime,
}

/// Objects are readable until their URL expires and are pruned on the next
/// `put`; URLs use the `memory://` scheme.
#[derive(Clone)]
pub struct InMemoryBlobStore {
    bucket: String,
    ttl: Duration,
    objects: Arc<DashMap<String, MemoryObject>>,
}

impl InMemoryBlobStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self::with_ttl(bucket, SIGNED_URL_TTL)
    }

    pub fn with_ttl(bucket: impl Into<String>, ttl: Duration) -> Self {
        Self {
            bucket: bucket.into(),
            ttl,
            objects: Arc::new(DashMap::new()),
        }
    }

    /// Expired objects are treated as absent.
    pub fn get(&self, key: &str) -> Option<MemoryObject> {
        let now = SystemTime::now();
        self.objects
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value().clone())
    }

    /// Resolve a URL previously returned by `put`.
    pub fn get_by_url(&self, url: &str) -> Option<MemoryObject> {
        let rest = url.strip_prefix("memory://")?;
        let (_bucket, path) = rest.split_once('/')?;
        let key = path.split('?').next()?;
        self.get(key)
    }

    /// Drop every object whose URL has expired.
    pub fn prune_expired(&self) {
        let now = SystemTime::now();
        self.objects.retain(|_, object| object.expires_at > now);
    }

    /// Number of objects held, including expired ones not yet pruned.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new("local")
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, content: Bytes, content_type: &str) -> Result<StoredBlob, BlobError> {
        self.prune_expired();

        let key = new_object_key();
        let expires_at = SystemTime::now() + self.ttl;
        let expires_unix = expires_at
            .duration_since(UNIX_EPOCH)
            .map_err(|e| BlobError::Sign(e.to_string()))?
            .as_secs();

        self.objects.insert(
            key.clone(),
            MemoryObject {
                content,
                content_type: content_type.to_string(),
                content_encoding: CONTENT_ENCODING_GZIP.to_string(),
                expires_at,
            },
        );

        let url = format!("memory://{}/{}?expires={}", self.bucket, key, expires_unix);
        Ok(StoredBlob {
            key,
            url,
            expires_at,
        })
    }
}
