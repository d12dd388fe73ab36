//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (read once)
//!     → env.rs (RawEnv snapshot, per-variable rules)
//!     → resolve.rs (client schema, server schema = server-only ∪ client)
//!     → ClientConfig / ServerConfig (validated, immutable)
//!     → injected into startup context and handlers
//!
//! optional settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppSettings (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Secrets come from the environment only; the settings file holds
//!   non-secret operational knobs
//! - Every failing variable is reported, not just the first
//! - Nothing is reloaded; a changed environment requires a restart

pub mod env;
pub mod loader;
pub mod resolve;
pub mod schema;
pub mod validation;

pub use env::{ConfigValidationError, FieldIssue, IssueReason, RawEnv};
pub use loader::ConfigError;
pub use resolve::{resolve_client_config, resolve_server_config, ClientConfig, ServerConfig};
pub use schema::{AppSettings, ListenerConfig, LogFormat, ObservabilityConfig, SecurityConfig};
