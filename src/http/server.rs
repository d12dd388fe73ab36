//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all page handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit,
//!   panic catching, security headers)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer,
    map_response_body::MapResponseBodyLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::auth::{AuthOptions, AuthProvider};
use crate::config::{AppSettings, ClientConfig};
use crate::http::error::handle_panic;
use crate::http::handlers::{app_page, get_status, index, login_page, logout, not_found};
use crate::http::pages::{APP_PATH, LOGIN_PATH, LOGOUT_PATH};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::lifecycle::startup::AppContext;
use crate::security::with_security_headers;

/// Application state injected into handlers.
///
/// Holds the client-visible configuration and the auth wiring; the full
/// `ServerConfig` stays in the startup context.
#[derive(Clone)]
pub struct AppState {
    pub client_config: Arc<ClientConfig>,
    pub auth_options: Arc<AuthOptions>,
    pub auth: Arc<dyn AuthProvider>,
}

/// HTTP server for the application shell.
pub struct HttpServer {
    router: Router,
    settings: AppSettings,
}

impl HttpServer {
    /// Create a new HTTP server from the startup context.
    pub fn new(context: &AppContext, auth: Arc<dyn AuthProvider>) -> Self {
        let state = AppState {
            client_config: context.client.clone(),
            auth_options: context.auth_options.clone(),
            auth,
        };

        let router = Self::build_router(&context.settings, state);
        Self {
            router,
            settings: context.settings.clone(),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(settings: &AppSettings, state: AppState) -> Router {
        let router = Router::new()
            .route("/", get(index))
            .route(APP_PATH, get(app_page))
            .route(LOGIN_PATH, get(login_page))
            .route(LOGOUT_PATH, get(logout))
            .route("/healthz", get(get_status))
            .fallback(not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            path = %req.uri().path(),
                            request_id = %req.headers().request_id(),
                        )
                    }))
                    .layer(propagate_request_id_layer())
                    .layer(CatchPanicLayer::custom(handle_panic))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        settings.timeouts.request_secs,
                    )))
                    .layer(MapResponseBodyLayer::new(Body::new))
                    .layer(RequestBodyLimitLayer::new(settings.security.max_body_size)),
            );

        // Outermost, so error pages from the panic and timeout layers get them too.
        if settings.security.enable_headers {
            with_security_headers(router)
        } else {
            router
        }
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.settings.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the settings.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }
}
