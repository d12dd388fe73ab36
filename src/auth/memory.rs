//! In-process auth collaborator for development and tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::auth::provider::{AuthError, AuthProvider};
use crate::auth::types::{SessionData, SessionToken};

/// A thread-safe session table keyed by session token.
#[derive(Clone, Default)]
pub struct MemoryAuthProvider {
    sessions: Arc<DashMap<String, SessionData>>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under its own token.
    pub fn insert_session(&self, data: SessionData) -> SessionToken {
        let token = SessionToken::new(data.session.token.clone());
        self.sessions.insert(data.session.token.clone(), data);
        token
    }

    /// Number of stored sessions, expired ones included.
    pub fn count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn get_session(&self, token: &SessionToken) -> Result<Option<SessionData>, AuthError> {
        let now = Utc::now();
        Ok(self
            .sessions
            .get(token.as_str())
            .filter(|entry| entry.value().session.is_active_at(now))
            .map(|entry| entry.value().clone()))
    }

    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthError> {
        if let Some((_, data)) = self.sessions.remove(token.as_str()) {
            tracing::info!(user_id = %data.user.id, "Session signed out");
        }
        Ok(())
    }
}
