//! Authentication integration.
//!
//! # Data Flow
//! ```text
//! ServerConfig
//!     → options.rs (secret, base URL, database, social providers)
//!
//! Incoming request
//!     → session cookie (better-auth.session_token)
//!     → provider.rs (AuthProvider::get_session / sign_out)
//!     → types.rs (SessionData: user + session)
//! ```
//!
//! # Design Decisions
//! - The auth service is an external collaborator behind a trait
//! - Sign-in happens on the auth service; the shell only reads and ends sessions
//! - remote.rs talks to the auth service over HTTP; memory.rs is the
//!   in-process collaborator for development and tests

pub mod memory;
pub mod options;
pub mod provider;
pub mod remote;
pub mod types;

pub use memory::MemoryAuthProvider;
pub use options::{AuthOptions, SocialProvider, SESSION_COOKIE};
pub use provider::{AuthError, AuthProvider};
pub use remote::RemoteAuthProvider;
pub use types::{AuthSession, AuthUser, SessionData, SessionToken};
