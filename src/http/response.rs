//! Downstream response handling.
//!
//! # Responsibilities
//! - Collapse the backend's header multimap into one value per name
//! - Hold the body as a single-consume stream until the packager drains it
//!
//! # Design Decisions
//! - Multi-valued headers are joined with ", " before packaging
//! - Header names keep the casing the HTTP stack reports
//! - The body is moved out exactly once; dropping it releases the connection

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{HeaderMap, Response, StatusCode};

/// Backend response as seen by the packager.
#[derive(Debug)]
pub struct DownstreamResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: Body,
}

impl DownstreamResponse {
    pub fn from_http(response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: flatten_headers(&parts.headers),
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// One entry per header name, repeated values joined with ", ".
pub fn flatten_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_string(), joined)
        })
        .collect()
}

pub(crate) fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
    use axum::http::HeaderValue;

    #[test]
    fn repeated_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let flat = flatten_headers(&headers);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat["set-cookie"], "a=1, b=2");
        assert_eq!(flat["content-type"], "application/json");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = DownstreamResponse::from_http(
            Response::builder()
                .status(201)
                .header("Content-Type", "text/csv")
                .body(Body::empty())
                .unwrap(),
        );
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.header("CONTENT-TYPE"), Some("text/csv"));
        assert_eq!(response.header("location"), None);
    }
}
