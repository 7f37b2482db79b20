//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the adapter.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Largest compressed payload that can be returned inline (6 MiB).
pub const MAX_INLINE_PAYLOAD_BYTES: usize = 6 * 1024 * 1024;

/// Lifetime of a signed retrieval URL, in seconds.
pub const SIGNED_URL_TTL_SECS: u64 = 3600;

/// Root configuration for the gateway adapter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdapterConfig {
    /// Local backend the adapter proxies to.
    pub backend: BackendConfig,

    /// Response packaging limits.
    pub response: ResponseConfig,

    /// Object store used for oversized responses.
    pub blob_store: BlobStoreConfig,

    /// Bearer token denylist.
    pub access: AccessConfig,

    /// Local invocation server settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend (downstream) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Scheme and authority of the co-located backend, without a trailing slash.
    pub base_url: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082".to_string(),
            connect_timeout_secs: 2,
        }
    }
}

/// Response packaging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Compressed payloads at or above this size are offloaded.
    pub inline_limit_bytes: usize,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            inline_limit_bytes: MAX_INLINE_PAYLOAD_BYTES,
        }
    }
}

/// Which object store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackend {
    #[default]
    S3,
    /// Process-local store, for local runs only.
    Memory,
}

/// Object store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlobStoreConfig {
    pub backend: BlobBackend,

    /// Bucket that receives offloaded responses.
    pub bucket: String,

    /// Region override; the SDK default chain is used when absent.
    pub region: Option<String>,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            backend: BlobBackend::S3,
            bucket: String::new(),
            region: None,
        }
    }
}

/// Access control configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AccessConfig {
    /// Comma-separated bearer token fragments to reject.
    pub denied_tokens: String,
}

/// Local invocation server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:9000").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9000".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
