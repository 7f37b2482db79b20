//! Blob offload store.
//!
//! # Data Flow
//! ```text
//! compressed payload (≥ inline limit)
//!     → BlobStore::put (fresh key, gzip metadata)
//!     → signed GET URL, valid for one hour
//!     → Location header of a 302 reply
//! ```
//!
//! # Design Decisions
//! - One trait, two backends: S3 for deployments, in-memory for local runs
//! - Keys are `response-<uuid v4>.json`; uniqueness comes from the UUID
//! - Every backend failure collapses into a single `BlobError`
//! - Expiry of stored objects is left to the bucket's lifecycle rules

pub mod memory;
pub mod s3;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{BlobBackend, BlobStoreConfig, SIGNED_URL_TTL_SECS};

pub use memory::InMemoryBlobStore;
pub use s3::S3BlobStore;

const KEY_PREFIX: &str = "response-";
const KEY_SUFFIX: &str = ".json";

/// Content encoding of every offloaded object.
pub const CONTENT_ENCODING_GZIP: &str = "gzip";

/// How long a signed retrieval URL stays valid.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(SIGNED_URL_TTL_SECS);

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("upload failed: {0}")]
    Upload(String),

    #[error("signing failed: {0}")]
    Sign(String),
}

/// Result of a successful offload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub key: String,
    /// Capability URL granting GET on `key` only.
    pub url: String,
    pub expires_at: SystemTime,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist gzip-encoded `content` under a fresh key and return a signed
    /// retrieval URL.
    async fn put(&self, content: Bytes, content_type: &str) -> Result<StoredBlob, BlobError>;
}

/// Generate a globally unique object key.
pub fn new_object_key() -> String {
    format!("{}{}{}", KEY_PREFIX, Uuid::new_v4(), KEY_SUFFIX)
}

/// Build the configured store. Called once at start-up.
pub async fn from_config(config: &BlobStoreConfig) -> Arc<dyn BlobStore> {
    match config.backend {
        BlobBackend::S3 => {
            tracing::info!(bucket = %config.bucket, "Using S3 offload store");
            Arc::new(S3BlobStore::from_env(config.bucket.clone(), config.region.clone()).await)
        }
        BlobBackend::Memory => {
            tracing::warn!("Using in-memory offload store; signed URLs are not externally retrievable");
            let bucket = if config.bucket.is_empty() { "local" } else { config.bucket.as_str() };
            Arc::new(InMemoryBlobStore::new(bucket))
        }
    }
}
