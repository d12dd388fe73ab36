//! The seam to the external authentication service.

use async_trait::async_trait;

use crate::auth::types::{SessionData, SessionToken};

/// Failures talking to the auth service.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("auth service unavailable: {0}")]
    Unavailable(String),
    #[error("auth service returned malformed session data: {0}")]
    Malformed(String),
}

/// Session lookup and sign-out, keyed by the opaque session token.
///
/// The pages only ever need these two calls; sign-in itself happens on the
/// auth service, which sets the session cookie and redirects back.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve a token to its session. Unknown or expired tokens yield `None`.
    async fn get_session(&self, token: &SessionToken) -> Result<Option<SessionData>, AuthError>;

    /// Invalidate the session behind `token`. Unknown tokens are not an error.
    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthError>;
}
