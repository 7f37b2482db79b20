//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, payload ceiling)
//! - Check that the selected object store is usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AdapterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::{AdapterConfig, BlobBackend, MAX_INLINE_PAYLOAD_BYTES};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &AdapterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.backend.base_url) {
        Ok(url) => {
            if url.scheme() != "http" {
                errors.push(ValidationError::new(
                    "backend.base_url",
                    "only plain http backends are supported",
                ));
            }
            if url.path() != "/" || url.query().is_some() {
                errors.push(ValidationError::new(
                    "backend.base_url",
                    "must not contain a path or query",
                ));
            }
        }
        Err(e) => errors.push(ValidationError::new("backend.base_url", e.to_string())),
    }

    if config.backend.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "backend.connect_timeout_secs",
            "must be greater than zero",
        ));
    }

    let limit = config.response.inline_limit_bytes;
    if limit == 0 || limit > MAX_INLINE_PAYLOAD_BYTES {
        errors.push(ValidationError::new(
            "response.inline_limit_bytes",
            format!("must be between 1 and {}", MAX_INLINE_PAYLOAD_BYTES),
        ));
    }

    if config.blob_store.backend == BlobBackend::S3 && config.blob_store.bucket.trim().is_empty() {
        errors.push(ValidationError::new(
            "blob_store.bucket",
            "required when the s3 backend is selected",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
