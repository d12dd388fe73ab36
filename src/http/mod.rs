//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID set/propagated)
//!     → handlers.rs (session check via AuthProvider, redirects)
//!     → pages.rs (HTML)
//!     → error.rs (error boundary on handler error or panic)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod pages;
pub mod request;
pub mod server;

pub use error::AppError;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
