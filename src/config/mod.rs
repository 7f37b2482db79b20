//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → AdapterConfig (validated, immutable)
//!     → consumed once at start-up to build the shared clients
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AdapterConfig, BackendConfig, BlobBackend, BlobStoreConfig, LogFormat, ObservabilityConfig,
    MAX_INLINE_PAYLOAD_BYTES, SIGNED_URL_TTL_SECS,
};
