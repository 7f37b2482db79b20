//! Request translation.
//!
//! # Responsibilities
//! - Pick the forwarded headers out of the inbound event (allow-list)
//! - Resolve method, absolute backend URL and body
//! - Produce an `OutboundRequest` owned by the caller until it is sent
//!
//! # Design Decisions
//! - Pure function of the event plus the configured backend base
//! - Headers outside the allow-list are dropped, missing ones omitted
//! - GET never carries a body, whatever the event says

use axum::body::Body;
use axum::http::header::{HeaderName, ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, HeaderValue, Method, Request, Uri};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

use crate::adapter::AdapterError;
use crate::event::InboundEvent;

/// Inbound headers that reach the backend. Everything else is dropped.
pub const FORWARDED_HEADERS: [HeaderName; 4] = [ACCEPT, COOKIE, CONTENT_TYPE, AUTHORIZATION];

/// Extract the allow-listed headers from the event.
pub fn forwarded_headers(event: &InboundEvent) -> Result<HeaderMap, AdapterError> {
    let mut headers = HeaderMap::new();
    for name in FORWARDED_HEADERS {
        if let Some(value) = event.header(name.as_str()) {
            let value = HeaderValue::from_str(value).map_err(|e| {
                AdapterError::Translation(format!("header {}: {}", name, e))
            })?;
            headers.insert(name, value);
        }
    }
    Ok(headers)
}

/// A plain HTTP request bound for the backend.
#[derive(Debug)]
pub struct OutboundRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    /// `None` for GET.
    pub body: Option<Bytes>,
}

impl OutboundRequest {
    pub fn into_http_request(self) -> Result<Request<Body>, AdapterError> {
        let body = match self.body {
            Some(bytes) => Body::from(bytes),
            None => Body::empty(),
        };

        let mut request = Request::builder()
            .method(self.method)
            .uri(self.uri)
            .body(body)
            .map_err(|e| AdapterError::Translation(e.to_string()))?;
        *request.headers_mut() = self.headers;
        Ok(request)
    }
}

/// Builds outbound requests against a fixed backend base URL.
#[derive(Debug, Clone)]
pub struct RequestTranslator {
    base_url: String,
}

impl RequestTranslator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Target URL: base + raw path + `?query` when the query is non-empty.
    pub fn target_url(&self, event: &InboundEvent) -> String {
        match event.query() {
            Some(query) => format!("{}{}?{}", self.base_url, event.path(), query),
            None => format!("{}{}", self.base_url, event.path()),
        }
    }

    pub fn translate(
        &self,
        event: &InboundEvent,
        headers: HeaderMap,
    ) -> Result<OutboundRequest, AdapterError> {
        let method = Method::from_bytes(event.method().to_ascii_uppercase().as_bytes())
            .map_err(|e| AdapterError::Translation(format!("method: {}", e)))?;

        let url = self.target_url(event);
        let uri: Uri = url
            .parse()
            .map_err(|e| AdapterError::Translation(format!("url {}: {}", url, e)))?;

        let body = if method == Method::GET {
            None
        } else {
            Some(decode_body(event)?)
        };

        Ok(OutboundRequest {
            method,
            uri,
            headers,
            body,
        })
    }
}

fn decode_body(event: &InboundEvent) -> Result<Bytes, AdapterError> {
    let body = event.body.as_deref().unwrap_or("");
    if event.is_base64_encoded {
        STANDARD
            .decode(body)
            .map(Bytes::from)
            .map_err(|e| AdapterError::Translation(format!("body is not valid base64: {}", e)))
    } else {
        Ok(Bytes::copy_from_slice(body.as_bytes()))
    }
}
