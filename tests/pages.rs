//! End-to-end tests for the shell's pages.

use std::sync::Arc;

use app_shell::auth::{AuthError, AuthProvider, MemoryAuthProvider, SessionData, SessionToken};
use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Duration;
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};

mod common;

fn cookie(token: &str) -> String {
    format!("better-auth.session_token={}", token)
}

#[tokio::test]
async fn test_app_requires_session() {
    let (addr, shutdown) =
        common::spawn_app(&common::valid_env(), Arc::new(MemoryAuthProvider::new())).await;

    let res = common::client()
        .get(format!("http://{}/app", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/auth/login");
    shutdown.trigger();
}

#[tokio::test]
async fn test_app_renders_for_signed_in_user() {
    let auth = MemoryAuthProvider::new();
    auth.insert_session(common::session("valid", Duration::hours(1)));
    let (addr, shutdown) = common::spawn_app(&common::valid_env(), Arc::new(auth)).await;

    let res = common::client()
        .get(format!("http://{}/app", addr))
        .header(COOKIE, cookie("valid"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("Welcome to the App Page"));
    assert!(body.contains("ada@example.com"));
    assert!(body.contains("<script id=\"client-env\" type=\"application/json\">{}</script>"));
    assert!(!body.contains(common::AUTH_SECRET));
    assert!(!body.contains(common::GOOGLE_SECRET));
    shutdown.trigger();
}

#[tokio::test]
async fn test_expired_session_redirects_to_login() {
    let auth = MemoryAuthProvider::new();
    auth.insert_session(common::session("stale", Duration::minutes(-1)));
    let (addr, shutdown) = common::spawn_app(&common::valid_env(), Arc::new(auth)).await;

    let res = common::client()
        .get(format!("http://{}/app", addr))
        .header(COOKIE, cookie("stale"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/auth/login");
    shutdown.trigger();
}

#[tokio::test]
async fn test_login_page_offers_google() {
    let (addr, shutdown) =
        common::spawn_app(&common::valid_env(), Arc::new(MemoryAuthProvider::new())).await;

    let res = common::client()
        .get(format!("http://{}/auth/login", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("Welcome back"));
    assert!(body.contains("Login with your Google account"));
    assert!(body.contains("action=\"http://localhost:3000/api/auth/sign-in/social\""));
    assert!(body.contains("name=\"provider\" value=\"google\""));
    assert!(body.contains("name=\"callbackURL\" value=\"/app\""));
    assert!(!body.contains(common::GOOGLE_SECRET));
    shutdown.trigger();
}

#[tokio::test]
async fn test_logout_signs_out_and_clears_cookie() {
    let auth = MemoryAuthProvider::new();
    auth.insert_session(common::session("valid", Duration::hours(1)));
    let (addr, shutdown) = common::spawn_app(&common::valid_env(), Arc::new(auth.clone())).await;

    let res = common::client()
        .get(format!("http://{}/auth/logout", addr))
        .header(COOKIE, cookie("valid"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/auth/login");
    let set_cookie = res.headers()[SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("better-auth.session_token="));
    assert_eq!(auth.count(), 0);
    shutdown.trigger();
}

#[tokio::test]
async fn test_logout_without_session_still_redirects() {
    let (addr, shutdown) =
        common::spawn_app(&common::valid_env(), Arc::new(MemoryAuthProvider::new())).await;

    let res = common::client()
        .get(format!("http://{}/auth/logout", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/auth/login");
    shutdown.trigger();
}

#[tokio::test]
async fn test_root_redirects_to_app() {
    let (addr, shutdown) =
        common::spawn_app(&common::valid_env(), Arc::new(MemoryAuthProvider::new())).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/app");
    shutdown.trigger();
}

#[tokio::test]
async fn test_health_and_common_headers() {
    let (addr, shutdown) =
        common::spawn_app(&common::valid_env(), Arc::new(MemoryAuthProvider::new())).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/healthz", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert_eq!(res.headers()["x-frame-options"], "DENY");
    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json["status"], "operational");

    let res = client
        .get(format!("http://{}/healthz", addr))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "req-123");

    let res = client
        .get(format!("http://{}/nope", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    shutdown.trigger();
}

struct FailingAuth;

#[async_trait]
impl AuthProvider for FailingAuth {
    async fn get_session(&self, _token: &SessionToken) -> Result<Option<SessionData>, AuthError> {
        Err(AuthError::Unavailable("connection refused".into()))
    }

    async fn sign_out(&self, _token: &SessionToken) -> Result<(), AuthError> {
        Err(AuthError::Unavailable("connection refused".into()))
    }
}

struct PanickingAuth;

#[async_trait]
impl AuthProvider for PanickingAuth {
    async fn get_session(&self, _token: &SessionToken) -> Result<Option<SessionData>, AuthError> {
        panic!("session store corrupted");
    }

    async fn sign_out(&self, _token: &SessionToken) -> Result<(), AuthError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_auth_failure_renders_error_boundary() {
    let (addr, shutdown) = common::spawn_app(&common::valid_env(), Arc::new(FailingAuth)).await;

    let res = common::client()
        .get(format!("http://{}/app", addr))
        .header(COOKIE, cookie("any"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(body.contains("Something went wrong!"));
    assert!(body.contains("href=\"/auth/login\""));
    shutdown.trigger();
}

#[tokio::test]
async fn test_panic_renders_error_boundary() {
    let (addr, shutdown) = common::spawn_app(&common::valid_env(), Arc::new(PanickingAuth)).await;

    let res = common::client()
        .get(format!("http://{}/app", addr))
        .header(COOKIE, cookie("any"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.text().await.unwrap().contains("Go to Sign In"));
    shutdown.trigger();
}
