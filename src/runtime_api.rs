//! Serverless runtime API poller.
//!
//! # Data Flow
//! ```text
//! GET  {api}/2018-06-01/runtime/invocation/next     → event + request id header
//!     → Adapter::handle
//! POST {api}/2018-06-01/runtime/invocation/{id}/response  ← AdaptedResponse JSON
//! POST {api}/2018-06-01/runtime/invocation/{id}/error     ← undecodable event
//! ```
//!
//! # Design Decisions
//! - `next` is a long poll, so the client carries no request timeout
//! - Shutdown is only observed between invocations; an in-flight one finishes
//! - A runtime API failure is fatal to the host, the runtime restarts it

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::adapter::Adapter;
use crate::event::{AdaptedResponse, InboundEvent};

/// Environment variable holding `host:port` of the runtime API.
pub const RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

const API_VERSION: &str = "2018-06-01";
const REQUEST_ID_HEADER: &str = "lambda-runtime-aws-request-id";
const ERROR_TYPE_HEADER: &str = "lambda-runtime-function-error-type";

#[derive(Debug, Error)]
pub enum FrontDoorError {
    #[error("AWS_LAMBDA_RUNTIME_API is not set")]
    NotConfigured,

    #[error("runtime API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("runtime API returned no request id header")]
    MissingRequestId,
}

/// One event pulled from the runtime API.
#[derive(Debug)]
pub struct Invocation {
    pub request_id: String,
    pub payload: Bytes,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorPayload<'a> {
    error_message: &'a str,
    error_type: &'a str,
}

pub struct RuntimeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl RuntimeApiClient {
    /// `address` is `host:port`, as found in [`RUNTIME_API_ENV`].
    pub fn new(address: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: format!("http://{}/{}/runtime", address, API_VERSION),
        }
    }

    pub fn from_env() -> Result<Self, FrontDoorError> {
        let address = std::env::var(RUNTIME_API_ENV).map_err(|_| FrontDoorError::NotConfigured)?;
        Ok(Self::new(&address))
    }

    pub async fn next_invocation(&self) -> Result<Invocation, FrontDoorError> {
        let response = self
            .http
            .get(format!("{}/invocation/next", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(FrontDoorError::MissingRequestId)?;

        Ok(Invocation {
            request_id,
            payload: response.bytes().await?,
        })
    }

    pub async fn post_response(
        &self,
        request_id: &str,
        response: &AdaptedResponse,
    ) -> Result<(), FrontDoorError> {
        self.http
            .post(format!("{}/invocation/{}/response", self.base_url, request_id))
            .json(response)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn post_error(
        &self,
        request_id: &str,
        error_type: &str,
        message: &str,
    ) -> Result<(), FrontDoorError> {
        self.http
            .post(format!("{}/invocation/{}/error", self.base_url, request_id))
            .header(ERROR_TYPE_HEADER, error_type)
            .json(&ErrorPayload {
                error_message: message,
                error_type,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Decode, adapt and answer one invocation.
    pub async fn process(&self, adapter: &Adapter, invocation: Invocation) -> Result<(), FrontDoorError> {
        match serde_json::from_slice::<InboundEvent>(&invocation.payload) {
            Ok(event) => {
                let event = event.with_default_request_id(invocation.request_id.clone());
                let response = adapter.handle(event).await;
                self.post_response(&invocation.request_id, &response).await
            }
            Err(e) => {
                tracing::error!(request_id = %invocation.request_id, error = %e, "Undecodable invocation event");
                self.post_error(&invocation.request_id, "InvalidEvent", &e.to_string())
                    .await
            }
        }
    }

    /// Poll until `shutdown` fires or the runtime API fails.
    pub async fn run(
        &self,
        adapter: Arc<Adapter>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), FrontDoorError> {
        tracing::info!(api = %self.base_url, "Runtime API poller starting");

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Runtime API poller stopping");
                    return Ok(());
                }
                next = self.next_invocation() => {
                    let invocation = next?;
                    self.process(&adapter, invocation).await?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_uses_api_version() {
        let client = RuntimeApiClient::new("127.0.0.1:9001");
        assert_eq!(client.base_url, "http://127.0.0.1:9001/2018-06-01/runtime");
    }

    #[test]
    fn error_payload_shape() {
        let json = serde_json::to_value(ErrorPayload {
            error_message: "bad",
            error_type: "InvalidEvent",
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"errorMessage": "bad", "errorType": "InvalidEvent"}));
    }
}
