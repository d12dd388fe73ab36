//! Session data returned by the auth service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque session token carried in the session cookie.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([redacted])")
    }
}

/// A signed-in user, including the gateway token attached by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub image: Option<String>,
    pub gateway_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub user_id: String,
}

impl AuthSession {
    /// Check if the session is still valid at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}

/// A session together with its user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user: AuthUser,
    pub session: AuthSession,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn session(expires_at: DateTime<Utc>) -> AuthSession {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        AuthSession {
            id: "sess-1".into(),
            token: "tok".into(),
            expires_at,
            created_at: created,
            updated_at: created,
            ip_address: None,
            user_agent: None,
            user_id: "user-1".into(),
        }
    }

    #[test]
    fn test_session_expiry_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(session(now + Duration::seconds(1)).is_active_at(now));
        assert!(!session(now).is_active_at(now));
        assert!(!session(now - Duration::hours(1)).is_active_at(now));
    }

    #[test]
    fn test_session_json_uses_camel_case() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(session(now)).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert!(json.get("expiresAt").is_some());
        assert!(json["ipAddress"].is_null());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("abc123");
        assert_eq!(format!("{:?}", token), "SessionToken([redacted])");
        assert_eq!(token.as_str(), "abc123");
    }
}
