//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the server and client configuration from the environment
//! - Derive the auth wiring from the server configuration
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is served
//! - The server schema is resolved first so the error lists every bad
//!   variable, client ones included
//! - The resolved values are returned, never stored in globals

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::auth::AuthOptions;
use crate::config::{
    resolve_client_config, resolve_server_config, AppSettings, ClientConfig, ConfigError,
    ConfigValidationError, RawEnv, ServerConfig,
};

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Environment(#[from] ConfigValidationError),
    #[error("invalid settings: {0}")]
    Settings(#[from] ConfigError),
    #[error("failed to initialize auth client: {0}")]
    Auth(#[from] crate::auth::AuthError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Everything resolved at startup, shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: AppSettings,
    pub client: Arc<ClientConfig>,
    pub server: Arc<ServerConfig>,
    pub auth_options: Arc<AuthOptions>,
}

/// Validate the environment and assemble the startup context.
pub fn bootstrap(env: &RawEnv, settings: AppSettings) -> Result<AppContext, StartupError> {
    let server = resolve_server_config(env)?;
    let client = resolve_client_config(env)?;
    let auth_options = AuthOptions::from_server_config(&server);

    tracing::info!(
        auth_url = %server.better_auth_url(),
        database_scheme = %server.database_scheme(),
        database_host = server.database_host().unwrap_or("-"),
        social_providers = auth_options.social_providers().len(),
        "Environment validated"
    );

    Ok(AppContext {
        settings,
        client: Arc::new(client),
        server: Arc::new(server),
        auth_options: Arc::new(auth_options),
    })
}

/// Bind the configured listener address.
pub async fn bind(settings: &AppSettings) -> Result<TcpListener, StartupError> {
    let address = settings.listener.bind_address.clone();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}
