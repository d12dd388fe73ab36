//! HTTP client for the external auth service.
//!
//! # Responsibilities
//! - Forward the session cookie to the auth service's session endpoint
//! - Map `null` / 401 responses to "no session"
//! - Forward sign-out requests
//!
//! # Design Decisions
//! - The token is sent back exactly as it arrived; it is opaque here
//! - Any transport failure or 5xx is `AuthError::Unavailable`, which renders
//!   the error page rather than silently logging the user out

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::StatusCode;

use crate::auth::options::AuthOptions;
use crate::auth::provider::{AuthError, AuthProvider};
use crate::auth::types::{SessionData, SessionToken};

const GET_SESSION_PATH: &str = "/api/auth/get-session";
const SIGN_OUT_PATH: &str = "/api/auth/sign-out";

/// Auth collaborator reached over HTTP at `BETTER_AUTH_URL`.
#[derive(Clone)]
pub struct RemoteAuthProvider {
    client: reqwest::Client,
    base_url: String,
    session_cookie: String,
}

impl RemoteAuthProvider {
    pub fn new(options: &AuthOptions, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: options.base_url().trim_end_matches('/').to_string(),
            session_cookie: options.session_cookie().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn cookie_header(&self, token: &SessionToken) -> Result<HeaderValue, AuthError> {
        HeaderValue::from_str(&format!("{}={}", self.session_cookie, token.as_str()))
            .map_err(|e| AuthError::Malformed(format!("session token is not a valid header: {}", e)))
    }
}

#[async_trait]
impl AuthProvider for RemoteAuthProvider {
    async fn get_session(&self, token: &SessionToken) -> Result<Option<SessionData>, AuthError> {
        let res = self
            .client
            .get(self.endpoint(GET_SESSION_PATH))
            .header(COOKIE, self.cookie_header(token)?)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!(status = %status, "Auth service rejected session lookup");
            return Err(AuthError::Unavailable(format!("session lookup returned {}", status)));
        }

        let data: Option<SessionData> = res
            .json()
            .await
            .map_err(|e| AuthError::Malformed(e.to_string()))?;

        Ok(data.filter(|d| d.session.is_active()))
    }

    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthError> {
        let res = self
            .client
            .post(self.endpoint(SIGN_OUT_PATH))
            .header(COOKIE, self.cookie_header(token)?)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let status = res.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(AuthError::Unavailable(format!("sign-out returned {}", status)))
        }
    }
}
