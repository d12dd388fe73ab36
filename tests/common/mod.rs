//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use app_shell::auth::{AuthProvider, AuthSession, AuthUser, SessionData};
use app_shell::config::{AppSettings, RawEnv};
use app_shell::http::HttpServer;
use app_shell::lifecycle::{bootstrap, Shutdown};
use axum::Router;
use chrono::Utc;
use tokio::net::TcpListener;

pub const AUTH_SECRET: &str = "super-secret-value";
pub const GOOGLE_SECRET: &str = "google-client-secret";

/// A complete, valid environment with the given auth base URL.
pub fn env_with_auth_url(auth_url: &str) -> RawEnv {
    [
        ("BETTER_AUTH_SECRET", AUTH_SECRET),
        ("BETTER_AUTH_URL", auth_url),
        ("DATABASE_URL", "postgresql://app:pw@db.internal:5432/app"),
        ("GOOGLE_CLIENT_ID", "google-client-id"),
        ("GOOGLE_CLIENT_SECRET", GOOGLE_SECRET),
        ("PATH", "/usr/bin"),
    ]
    .into_iter()
    .collect()
}

pub fn valid_env() -> RawEnv {
    env_with_auth_url("http://localhost:3000")
}

/// Session data for `token`, expiring `expires_in` from now.
pub fn session(token: &str, expires_in: chrono::Duration) -> SessionData {
    let now = Utc::now();
    SessionData {
        user: AuthUser {
            id: "user-1".into(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            email_verified: true,
            created_at: now,
            updated_at: now,
            image: None,
            gateway_token: "gw-token".into(),
        },
        session: AuthSession {
            id: format!("session-{token}"),
            token: token.into(),
            expires_at: now + expires_in,
            created_at: now,
            updated_at: now,
            ip_address: Some("127.0.0.1".into()),
            user_agent: None,
            user_id: "user-1".into(),
        },
    }
}

/// Start the app server on an ephemeral port.
pub async fn spawn_app(env: &RawEnv, auth: Arc<dyn AuthProvider>) -> (SocketAddr, Shutdown) {
    let context = bootstrap(env, test_settings()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&context, auth);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Settings used by the in-process tests.
pub fn test_settings() -> AppSettings {
    let mut settings = AppSettings::default();
    settings.listener.bind_address = "127.0.0.1:0".into();
    settings.timeouts.request_secs = 5;
    settings
}

/// Build the app router in-process, for `oneshot` tests.
pub fn app_router(env: &RawEnv, auth: Arc<dyn AuthProvider>, settings: AppSettings) -> Router {
    let context = bootstrap(env, settings).unwrap();
    HttpServer::new(&context, auth).router()
}

/// Serve an arbitrary router on an ephemeral port.
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// HTTP client that does not follow redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(5))
        .no_proxy()
        .build()
        .unwrap()
}
