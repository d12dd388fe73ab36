//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → body limit (security.max_body_size)
//!     → handler
//! Outgoing response:
//!     → headers.rs (nosniff, frame deny, referrer policy)
//! ```
//!
//! # Design Decisions
//! - Secrets never reach a response: only `ClientConfig` is serializable
//! - Hardening headers are on by default

pub mod headers;

pub use headers::with_security_headers;
