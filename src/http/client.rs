//! Downstream invocation.
//!
//! # Responsibilities
//! - Own the process-wide HTTP client for the co-located backend
//! - Issue one outbound request per invocation
//! - Hand back a streamed response body
//!
//! # Design Decisions
//! - Connect timeout only; no read timeout and no size limit
//! - No retries; the front door owns retry policy
//! - Client is built once and shared read-only across invocations

use std::error::Error as StdError;
use std::time::Duration;

use axum::body::Body;
use axum::http::Response;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::adapter::AdapterError;
use crate::http::request::OutboundRequest;
use crate::http::response::DownstreamResponse;

/// HTTP/1.1 client bound to the local backend.
#[derive(Clone)]
pub struct DownstreamInvoker {
    client: Client<HttpConnector, Body>,
}

impl DownstreamInvoker {
    pub fn new(connect_timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(connect_timeout));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client }
    }

    /// Send the request and return as soon as response headers arrive.
    pub async fn invoke(&self, request: OutboundRequest) -> Result<DownstreamResponse, AdapterError> {
        let request = request.into_http_request()?;

        let response: Response<Incoming> = self
            .client
            .request(request)
            .await
            .map_err(|e| AdapterError::DownstreamUnavailable(error_chain(&e)))?;

        Ok(DownstreamResponse::from_http(response.map(Body::new)))
    }
}

/// Render an error with its sources, e.g. `client error (Connect): Connection refused`.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
