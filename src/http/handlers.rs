//! Page handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;

use crate::auth::SessionToken;
use crate::http::error::AppError;
use crate::http::pages::{self, APP_PATH, LOGIN_PATH};
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

fn session_token(jar: &CookieJar, name: &str) -> Option<SessionToken> {
    jar.get(name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .map(SessionToken::new)
}

pub async fn index() -> Redirect {
    Redirect::to(APP_PATH)
}

/// Landing page; requires a session.
pub async fn app_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(token) = session_token(&jar, state.auth_options.session_cookie()) else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    match state.auth.get_session(&token).await? {
        Some(data) => {
            tracing::debug!(user_id = %data.user.id, "Rendering app page");
            let html = pages::app_page(&data, &state.client_config)?;
            Ok(Html(html).into_response())
        }
        None => Ok(Redirect::to(LOGIN_PATH).into_response()),
    }
}

pub async fn login_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::login_page(&state.auth_options))
}

/// Ends the session if there is one, then always goes to the login page.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let options = &state.auth_options;
    if let Some(token) = session_token(&jar, options.session_cookie()) {
        if state.auth.get_session(&token).await?.is_some() {
            state.auth.sign_out(&token).await?;
        }
    }

    let jar = jar.remove(
        Cookie::build((options.session_cookie().to_string(), ""))
            .path("/")
            .secure(options.secure_cookies()),
    );
    Ok((jar, Redirect::to(LOGIN_PATH)))
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page()))
}
