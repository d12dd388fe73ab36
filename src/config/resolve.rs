//! Typed client and server configuration resolved from the environment.
//!
//! [`ClientConfig`] holds only variables that are safe to hand to an
//! untrusted rendering context and is the only one of the two that
//! implements `Serialize`. [`ServerConfig`] embeds a `ClientConfig`, so the
//! server side always sees every client field and validates it too.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::config::env::{ConfigValidationError, EnvValidator, RawEnv};

/// Variables readable only on the server.
pub const SERVER_ONLY_FIELDS: &[&str] = &[
    "BETTER_AUTH_SECRET",
    "BETTER_AUTH_URL",
    "DATABASE_URL",
    "GOOGLE_CLIENT_ID",
    "GOOGLE_CLIENT_SECRET",
];

/// Client-visible configuration.
///
/// New public variables are added here as fields, to [`ClientConfig::FIELDS`]
/// and to [`ClientConfig::collect`]; the server schema picks them up through
/// composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ClientConfig {}

impl ClientConfig {
    /// Variables declared safe for untrusted rendering contexts.
    pub const FIELDS: &'static [&'static str] = &[];

    /// Read the client fields, recording issues on the shared validator.
    pub(crate) fn collect(_validator: &mut EnvValidator<'_>) -> Option<Self> {
        Some(Self {})
    }
}

/// Server configuration: server-only secrets plus every client field.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    better_auth_secret: String,
    better_auth_url: String,
    database_url: String,
    database: Url,
    google_client_id: String,
    google_client_secret: String,
    client: ClientConfig,
}

impl ServerConfig {
    /// Every variable this schema reads, server-only fields first.
    pub fn field_names() -> Vec<&'static str> {
        SERVER_ONLY_FIELDS
            .iter()
            .chain(ClientConfig::FIELDS)
            .copied()
            .collect()
    }

    pub fn better_auth_secret(&self) -> &str {
        &self.better_auth_secret
    }

    pub fn better_auth_url(&self) -> &str {
        &self.better_auth_url
    }

    /// Connection URL exactly as it was set.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Host part of the database URL, safe to log.
    pub fn database_host(&self) -> Option<&str> {
        self.database.host_str()
    }

    pub fn database_scheme(&self) -> &str {
        self.database.scheme()
    }

    pub fn google_client_id(&self) -> &str {
        &self.google_client_id
    }

    pub fn google_client_secret(&self) -> &str {
        &self.google_client_secret
    }

    /// The client-visible subset.
    pub fn client(&self) -> &ClientConfig {
        &self.client
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("better_auth_secret", &"[redacted]")
            .field("better_auth_url", &self.better_auth_url)
            .field("database_host", &self.database_host())
            .field("google_client_id", &self.google_client_id)
            .field("google_client_secret", &"[redacted]")
            .field("client", &self.client)
            .finish()
    }
}

/// Validate the client schema against `env`.
pub fn resolve_client_config(env: &RawEnv) -> Result<ClientConfig, ConfigValidationError> {
    let mut validator = EnvValidator::new(env);
    let client = ClientConfig::collect(&mut validator);

    match client {
        Some(client) if validator.is_clean() => Ok(client),
        _ => Err(validator.into_error()),
    }
}

/// Validate the composed server schema (server-only fields and all client
/// fields) against `env`.
pub fn resolve_server_config(env: &RawEnv) -> Result<ServerConfig, ConfigValidationError> {
    let mut validator = EnvValidator::new(env);

    let better_auth_secret = validator.non_empty_string("BETTER_AUTH_SECRET");
    let better_auth_url = validator.non_empty_string("BETTER_AUTH_URL");
    let database = validator.url("DATABASE_URL");
    let google_client_id = validator.non_empty_string("GOOGLE_CLIENT_ID");
    let google_client_secret = validator.non_empty_string("GOOGLE_CLIENT_SECRET");
    let client = ClientConfig::collect(&mut validator);

    let (
        Some(better_auth_secret),
        Some(better_auth_url),
        Some((database_url, database)),
        Some(google_client_id),
        Some(google_client_secret),
        Some(client),
    ) = (
        better_auth_secret,
        better_auth_url,
        database,
        google_client_id,
        google_client_secret,
        client,
    )
    else {
        return Err(validator.into_error());
    };

    if !validator.is_clean() {
        return Err(validator.into_error());
    }

    Ok(ServerConfig {
        better_auth_secret,
        better_auth_url,
        database_url,
        database,
        google_client_id,
        google_client_secret,
        client,
    })
}
