//! Adapter entry point.
//!
//! # Data Flow
//! ```text
//! InboundEvent
//!     → security/access_control.rs (denylist, may short-circuit with 429)
//!     → http/request.rs (allow-listed headers, OutboundRequest)
//!     → http/client.rs (backend call, streamed body)
//!     → packaging (passthrough | inline | redirect)
//!     → AdaptedResponse
//! ```
//!
//! # Design Decisions
//! - One `Adapter` per process, shared by reference across invocations
//! - Each stage returns `Result<_, AdapterError>`; a single match at the end
//!   turns failures into replies
//! - Nothing is retried and nothing outlives the invocation

pub mod error;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::Instrument;

use crate::blob::{self, BlobStore};
use crate::config::AdapterConfig;
use crate::event::{AdaptedResponse, InboundEvent};
use crate::http::client::DownstreamInvoker;
use crate::http::request::{forwarded_headers, RequestTranslator};
use crate::observability::metrics;
use crate::packaging::{PackagedResult, Packager};
use crate::security::Denylist;

pub use error::AdapterError;

/// Translates invocation events into backend calls and back.
///
/// Holds the two process-wide clients (backend HTTP, object store); both are
/// read-only after construction.
#[derive(Clone)]
pub struct Adapter {
    denylist: Denylist,
    translator: RequestTranslator,
    invoker: DownstreamInvoker,
    packager: Packager,
}

impl Adapter {
    pub fn new(config: &AdapterConfig, store: Arc<dyn BlobStore>) -> Self {
        Self {
            denylist: Denylist::from_csv(&config.access.denied_tokens),
            translator: RequestTranslator::new(config.backend.base_url.clone()),
            invoker: DownstreamInvoker::new(Duration::from_secs(config.backend.connect_timeout_secs)),
            packager: Packager::new(config.response.inline_limit_bytes, store),
        }
    }

    /// Build the adapter together with the configured object store.
    pub async fn from_config(config: &AdapterConfig) -> Self {
        let store = blob::from_config(&config.blob_store).await;
        let adapter = Self::new(config, store);

        tracing::info!(
            backend = %config.backend.base_url,
            inline_limit = adapter.packager.inline_limit(),
            denylist_entries = adapter.denylist.len(),
            "Adapter ready"
        );
        adapter
    }

    /// Handle one invocation. Never fails: errors become 429/503 replies.
    pub async fn handle(&self, event: InboundEvent) -> AdaptedResponse {
        let start = Instant::now();
        let span = tracing::info_span!(
            "invocation",
            request_id = %event.request_id().unwrap_or("-")
        );

        async move {
            match self.run(&event).await {
                Ok(result) => {
                    let outcome = result.outcome();
                    let response = AdaptedResponse::from(result);
                    tracing::info!(status = response.status_code, outcome, "Invocation complete");
                    metrics::record_invocation(outcome, start);
                    response
                }
                Err(err) => {
                    match err {
                        AdapterError::AccessDenied => {
                            tracing::warn!(status = err.status_code(), "Invocation rejected")
                        }
                        _ => tracing::error!(
                            status = err.status_code(),
                            kind = err.kind(),
                            error = %err,
                            "Invocation failed"
                        ),
                    }
                    metrics::record_invocation(err.kind(), start);
                    err.into_response()
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, event: &InboundEvent) -> Result<PackagedResult, AdapterError> {
        self.denylist.check(event)?;
        let headers = forwarded_headers(event)?;

        let request = self.translator.translate(event, headers)?;
        tracing::debug!(method = %request.method, url = %request.uri, "Forwarding to backend");

        let response = self.invoker.invoke(request).await?;
        tracing::debug!(status = response.status.as_u16(), "Backend responded");

        self.packager.package(response).await
    }
}
