//! Front-door event envelopes.
//!
//! The front door delivers an HTTP-shaped invocation event and expects an
//! event-shaped reply. Both follow the HTTP API v2 payload layout:
//!
//! ```text
//! InboundEvent    { rawPath, rawQueryString, headers, body, isBase64Encoded,
//!                   requestContext { requestId, http { method } } }
//! AdaptedResponse { statusCode, headers, body, isBase64Encoded }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Invocation event produced by the front door. Read-only to the adapter.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundEvent {
    pub raw_path: Option<String>,
    pub raw_query_string: Option<String>,
    /// Header names are lower-cased on the way in.
    #[serde(deserialize_with = "lowercase_headers")]
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpContext {
    pub method: Option<String>,
}

fn lowercase_headers<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, String>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v))
        .collect())
}

impl InboundEvent {
    /// HTTP method, `GET` when the event carries none.
    pub fn method(&self) -> &str {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.http.as_ref())
            .and_then(|http| http.method.as_deref())
            .unwrap_or("GET")
    }

    /// Raw path, `/` when absent.
    pub fn path(&self) -> &str {
        self.raw_path.as_deref().unwrap_or("/")
    }

    /// Raw query string, only when non-empty.
    pub fn query(&self) -> Option<&str> {
        self.raw_query_string.as_deref().filter(|q| !q.is_empty())
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| self.headers.get(&name.to_ascii_lowercase()))
            .map(String::as_str)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.request_id.as_deref())
    }

    /// Fill in the correlation id when the front door did not supply one.
    pub fn with_default_request_id(mut self, id: impl Into<String>) -> Self {
        if self.request_id().is_none() {
            self.request_context
                .get_or_insert_with(RequestContext::default)
                .request_id = Some(id.into());
        }
        self
    }
}

/// Reply handed back to the front door.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptedResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl AdaptedResponse {
    /// Plain-text reply with no headers.
    pub fn text(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
            body: Some(body.into()),
            is_base64_encoded: false,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_http_api_event() {
        let event: InboundEvent = serde_json::from_str(
            r#"{
                "version": "2.0",
                "rawPath": "/api/session",
                "rawQueryString": "a=1",
                "headers": {"Accept": "application/json", "X-Forwarded-For": "1.2.3.4"},
                "isBase64Encoded": false,
                "requestContext": {"requestId": "req-1", "http": {"method": "POST", "path": "/api/session"}}
            }"#,
        )
        .unwrap();

        assert_eq!(event.method(), "POST");
        assert_eq!(event.path(), "/api/session");
        assert_eq!(event.query(), Some("a=1"));
        assert_eq!(event.header("ACCEPT"), Some("application/json"));
        assert_eq!(event.request_id(), Some("req-1"));
        assert!(event.body.is_none());
    }

    #[test]
    fn minimal_event_uses_defaults() {
        let event: InboundEvent = serde_json::from_str(r#"{"headers": null, "rawQueryString": ""}"#).unwrap();
        assert_eq!(event.method(), "GET");
        assert_eq!(event.path(), "/");
        assert_eq!(event.query(), None);
        assert!(event.headers.is_empty());
    }

    #[test]
    fn default_request_id_does_not_override() {
        let event = InboundEvent::default().with_default_request_id("generated");
        assert_eq!(event.request_id(), Some("generated"));

        let event = event.with_default_request_id("other");
        assert_eq!(event.request_id(), Some("generated"));
    }

    #[test]
    fn adapted_response_omits_empty_fields() {
        let json = serde_json::to_value(AdaptedResponse {
            status_code: 302,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"statusCode": 302, "isBase64Encoded": false}));
    }
}
