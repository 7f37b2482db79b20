//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! InboundEvent
//!     → request.rs (allow-listed headers, OutboundRequest)
//!     → client.rs (HTTP/1.1 to the local backend)
//!     → response.rs (flattened headers, single-consume body)
//!     → [packaging decides delivery]
//!
//! server.rs accepts InboundEvents over HTTP for local runs.
//! ```

pub mod client;
pub mod request;
pub mod response;
pub mod server;

pub use client::DownstreamInvoker;
pub use request::{forwarded_headers, OutboundRequest, RequestTranslator, FORWARDED_HEADERS};
pub use response::DownstreamResponse;
pub use server::{HttpServer, INVOKE_PATH};
