//! Error boundary.
//!
//! Handler errors and panics end up here; both are logged and rendered as
//! the same "Something went wrong!" page.

use std::any::Any;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::auth::AuthError;
use crate::http::pages;

/// Errors a page handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("failed to render page: {0}")]
    Render(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "An error occurred");
        error_response()
    }
}

fn error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::error_page())).into_response()
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    let mut response = Response::new(Body::from(pages::error_page()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}
