//! Adapter error taxonomy.

use thiserror::Error;

use crate::blob::BlobError;
use crate::event::AdaptedResponse;

/// Every way a single invocation can fail.
///
/// All failures are local to one invocation; none are retried.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Bearer credential matched the denylist.
    #[error("Too many requests")]
    AccessDenied,

    #[error("invalid request: {0}")]
    Translation(String),

    #[error("downstream unavailable: {0}")]
    DownstreamUnavailable(String),

    #[error("failed to compress response: {0}")]
    Compression(String),

    #[error("failed to deliver response: {0}")]
    Offload(#[from] BlobError),
}

impl AdapterError {
    pub fn status_code(&self) -> u16 {
        match self {
            AdapterError::AccessDenied => 429,
            AdapterError::Translation(_)
            | AdapterError::DownstreamUnavailable(_)
            | AdapterError::Compression(_)
            | AdapterError::Offload(_) => 503,
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AdapterError::AccessDenied => "denied",
            AdapterError::Translation(_) => "translation",
            AdapterError::DownstreamUnavailable(_) => "downstream",
            AdapterError::Compression(_) => "compression",
            AdapterError::Offload(_) => "offload",
        }
    }

    /// Uncompressed, non-base64 reply carrying the failure message.
    pub fn into_response(self) -> AdaptedResponse {
        AdaptedResponse::text(self.status_code(), self.to_string())
    }
}
