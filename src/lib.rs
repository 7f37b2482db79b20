//! Gateway adapter library.
//!
//! Turns front-door invocation events into plain HTTP calls against a
//! co-located backend, and packages the backend's reply so it fits the
//! front door's payload ceiling: inline gzip when small, a signed object
//! store URL when not.

pub mod adapter;
pub mod blob;
pub mod config;
pub mod event;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod packaging;
pub mod runtime_api;
pub mod security;

pub use adapter::{Adapter, AdapterError};
pub use config::AdapterConfig;
pub use event::{AdaptedResponse, InboundEvent};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
