//! Web application shell library.
//!
//! Environment validation, auth wiring and the page server, assembled by
//! the `app-shell` binary.

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::{resolve_client_config, resolve_server_config, ClientConfig, ServerConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
