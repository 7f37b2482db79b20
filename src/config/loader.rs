//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{AdapterConfig, BlobBackend};
use crate::config::validation::{validate_config, ValidationError};

/// Bucket receiving offloaded responses.
pub const ENV_BUCKET: &str = "S3_BUCKET_NAME";
/// Comma-separated bearer token fragments to reject.
pub const ENV_DENIED_TOKENS: &str = "BLACK_LISTED_TOKENS";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_BACKEND_BASE_URL: &str = "BACKEND_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<AdapterConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AdapterConfig::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment-provided values onto `config`.
///
/// `lookup` abstracts the environment so callers can supply their own source.
pub fn apply_env_overrides<F>(mut config: AdapterConfig, lookup: F) -> AdapterConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bucket) = lookup(ENV_BUCKET).filter(|b| !b.is_empty()) {
        config.blob_store.bucket = bucket;
        config.blob_store.backend = BlobBackend::S3;
    }
    if let Some(tokens) = lookup(ENV_DENIED_TOKENS) {
        config.access.denied_tokens = tokens;
    }
    if let Some(region) = lookup(ENV_REGION).filter(|r| !r.is_empty()) {
        config.blob_store.region = Some(region);
    }
    if let Some(base_url) = lookup(ENV_BACKEND_BASE_URL).filter(|u| !u.is_empty()) {
        config.backend.base_url = base_url.trim_end_matches('/').to_string();
    }
    config
}
