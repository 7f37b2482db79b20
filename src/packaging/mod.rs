//! Response packaging.
//!
//! # Data Flow
//! ```text
//! DownstreamResponse
//!     → status ≥ 400 ──────────────→ Passthrough (raw body, as text)
//!     → compression.rs (gzip stream)
//!         → len < inline limit ────→ Inline (Content-Encoding: gzip, base64)
//!         → len ≥ inline limit
//!             → BlobStore::put ────→ Redirect (302, Location: signed URL)
//! ```
//!
//! # Design Decisions
//! - The limit applies to the compressed length, never the original
//! - Error responses skip compression so callers can read them directly
//! - A failed upload is an error, never a partial redirect

pub mod compression;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

use crate::adapter::AdapterError;
use crate::blob::{BlobStore, StoredBlob, CONTENT_ENCODING_GZIP};
use crate::event::AdaptedResponse;
use crate::http::response::{find_header, DownstreamResponse};
use crate::observability::metrics;

pub use compression::{collect_body, gzip_body};

/// Content type recorded on offloaded objects when the backend sent none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Exactly one of these is produced per successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagedResult {
    /// Backend error, returned uncompressed with its original status.
    ///
    /// The reply body is a JSON string, so the bytes are decoded as lossy
    /// UTF-8: invalid sequences become U+FFFD and non-UTF-8 bodies are not
    /// byte-identical.
    Passthrough { status: StatusCode, body: Bytes },
    /// Gzip body small enough to return in the reply itself.
    Inline {
        status: StatusCode,
        headers: HashMap<String, String>,
        compressed: Vec<u8>,
    },
    /// Body offloaded to the blob store; the caller follows `Location`.
    Redirect {
        headers: HashMap<String, String>,
        blob: StoredBlob,
    },
}

impl PackagedResult {
    /// Label used for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            PackagedResult::Passthrough { .. } => "passthrough",
            PackagedResult::Inline { .. } => "inline",
            PackagedResult::Redirect { .. } => "redirect",
        }
    }
}

impl From<PackagedResult> for AdaptedResponse {
    fn from(result: PackagedResult) -> Self {
        match result {
            PackagedResult::Passthrough { status, body } => AdaptedResponse {
                status_code: status.as_u16(),
                headers: HashMap::new(),
                body: Some(String::from_utf8_lossy(&body).into_owned()),
                is_base64_encoded: false,
            },
            PackagedResult::Inline {
                status,
                headers,
                compressed,
            } => AdaptedResponse {
                status_code: status.as_u16(),
                headers,
                body: Some(STANDARD.encode(compressed)),
                is_base64_encoded: true,
            },
            PackagedResult::Redirect { headers, .. } => AdaptedResponse {
                status_code: StatusCode::FOUND.as_u16(),
                headers,
                body: None,
                is_base64_encoded: false,
            },
        }
    }
}

/// Chooses between passthrough, inline and offloaded delivery.
#[derive(Clone)]
pub struct Packager {
    inline_limit: usize,
    store: Arc<dyn BlobStore>,
}

impl Packager {
    pub fn new(inline_limit: usize, store: Arc<dyn BlobStore>) -> Self {
        Self {
            inline_limit,
            store,
        }
    }

    pub fn inline_limit(&self) -> usize {
        self.inline_limit
    }

    pub async fn package(&self, response: DownstreamResponse) -> Result<PackagedResult, AdapterError> {
        let DownstreamResponse {
            status,
            mut headers,
            body,
        } = response;

        if status.as_u16() >= 400 {
            let body = collect_body(body).await?;
            tracing::debug!(status = status.as_u16(), bytes = body.len(), "Passing backend error through");
            return Ok(PackagedResult::Passthrough { status, body });
        }

        let compressed = gzip_body(body).await?;
        metrics::record_compressed_size(compressed.len());

        if compressed.len() < self.inline_limit {
            tracing::debug!(bytes = compressed.len(), "Returning response inline");
            set_header(&mut headers, "Content-Encoding", CONTENT_ENCODING_GZIP);
            return Ok(PackagedResult::Inline {
                status,
                headers,
                compressed,
            });
        }

        let content_type = find_header(&headers, "content-type")
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        tracing::info!(
            bytes = compressed.len(),
            limit = self.inline_limit,
            "Payload exceeds inline limit, offloading"
        );

        let blob = match self.store.put(Bytes::from(compressed), &content_type).await {
            Ok(blob) => {
                metrics::record_offload(true);
                blob
            }
            Err(e) => {
                metrics::record_offload(false);
                tracing::error!(error = %e, "Offload failed");
                return Err(e.into());
            }
        };

        set_header(&mut headers, "Location", &blob.url);
        Ok(PackagedResult::Redirect { headers, blob })
    }
}

/// Insert `name`, replacing any existing entry that differs only in case.
fn set_header(headers: &mut HashMap<String, String>, name: &str, value: &str) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
}
