//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound event:
//!     → access_control.rs (bearer denylist on raw headers, 429 on match)
//!     → http/request.rs (allow-list of forwarded headers)
//!     → Pass to translation
//! ```
//!
//! # Design Decisions
//! - Fail fast: a denied request never reaches the backend
//! - Credentials are never logged, only header names

pub mod access_control;

pub use access_control::Denylist;
