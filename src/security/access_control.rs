//! Bearer token denylist.
//! Rejects denylisted credentials before anything reaches the backend.

use axum::http::header::AUTHORIZATION;

use crate::adapter::AdapterError;
use crate::event::InboundEvent;

const BEARER_PREFIX: &str = "Bearer ";

/// Configured token fragments. An empty denylist lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Denylist {
    fragments: Vec<String>,
}

impl Denylist {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments
                .into_iter()
                .map(Into::into)
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated list. Blank entries are discarded; an empty
    /// fragment would otherwise match every bearer token.
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(',').map(str::trim))
    }

    pub fn is_enabled(&self) -> bool {
        !self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// True when `authorization` starts with `Bearer <fragment>`.
    pub fn is_denied(&self, authorization: &str) -> bool {
        let Some(token) = authorization.strip_prefix(BEARER_PREFIX) else {
            return false;
        };
        self.fragments.iter().any(|f| token.starts_with(f.as_str()))
    }

    /// Check the raw event headers, before anything else looks at them.
    /// `AccessDenied` short-circuits the invocation.
    pub fn check(&self, event: &InboundEvent) -> Result<(), AdapterError> {
        if !self.is_enabled() {
            return Ok(());
        }

        tracing::debug!(
            headers = ?event.headers.keys().collect::<Vec<_>>(),
            "Checking event headers against denylist"
        );

        match event.header(AUTHORIZATION.as_str()) {
            Some(value) if self.is_denied(value) => {
                tracing::warn!("Denylisted bearer token rejected");
                Err(AdapterError::AccessDenied)
            }
            _ => Ok(()),
        }
    }
}
