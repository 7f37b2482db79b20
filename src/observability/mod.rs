//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Adapter, packager, blob store produce:
//!     → logging.rs (structured log events, request id in span)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, picked up by the hosting runtime)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
