//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → request spans carrying the request ID (http/server.rs)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for aggregation)
//! ```

pub mod logging;

pub use logging::init_logging;
