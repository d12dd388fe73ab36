//! Wiring between the resolved server configuration and the auth service.

use std::fmt;

use crate::config::ServerConfig;

/// Cookie the auth service stores the session token in.
pub const SESSION_COOKIE: &str = "better-auth.session_token";

/// Prefix the auth service puts on cookie names when served over https.
pub const SECURE_COOKIE_PREFIX: &str = "__Secure-";

/// Path on the auth service that starts a social sign-in.
const SOCIAL_SIGN_IN_PATH: &str = "/api/auth/sign-in/social";

/// Database backing the auth service.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseOptions {
    pub url: String,
    pub dialect: DatabaseDialect,
    pub ssl: bool,
    /// Where schema migrations are generated.
    pub migrations_dir: &'static str,
}

impl fmt::Debug for DatabaseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseOptions")
            .field("url", &"[redacted]")
            .field("dialect", &self.dialect)
            .field("ssl", &self.ssl)
            .field("migrations_dir", &self.migrations_dir)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseDialect {
    Postgresql,
}

impl DatabaseDialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseDialect::Postgresql => "postgresql",
        }
    }
}

/// An identity provider offered on the login page.
#[derive(Clone, PartialEq, Eq)]
pub enum SocialProvider {
    Google {
        client_id: String,
        client_secret: String,
    },
}

impl SocialProvider {
    /// Provider id understood by the auth service.
    pub fn id(&self) -> &'static str {
        match self {
            SocialProvider::Google { .. } => "google",
        }
    }

    /// Human readable name for buttons.
    pub fn display_name(&self) -> &'static str {
        match self {
            SocialProvider::Google { .. } => "Google",
        }
    }
}

impl fmt::Debug for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocialProvider::Google { client_id, .. } => f
                .debug_struct("Google")
                .field("client_id", client_id)
                .field("client_secret", &"[redacted]")
                .finish(),
        }
    }
}

/// Everything the auth service integration needs, derived once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthOptions {
    secret: String,
    base_url: String,
    database: DatabaseOptions,
    social_providers: Vec<SocialProvider>,
    secure_cookies: bool,
    session_cookie: String,
}

impl AuthOptions {
    pub fn from_server_config(config: &ServerConfig) -> Self {
        let base_url = config.better_auth_url();
        let secure_cookies = base_url
            .get(..8)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"));
        let session_cookie = if secure_cookies {
            format!("{}{}", SECURE_COOKIE_PREFIX, SESSION_COOKIE)
        } else {
            SESSION_COOKIE.to_string()
        };

        Self {
            secret: config.better_auth_secret().to_string(),
            base_url: base_url.to_string(),
            database: DatabaseOptions {
                url: config.database_url().to_string(),
                dialect: DatabaseDialect::Postgresql,
                ssl: false,
                migrations_dir: "./drizzle",
            },
            social_providers: vec![SocialProvider::Google {
                client_id: config.google_client_id().to_string(),
                client_secret: config.google_client_secret().to_string(),
            }],
            secure_cookies,
            session_cookie,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn database(&self) -> &DatabaseOptions {
        &self.database
    }

    pub fn social_providers(&self) -> &[SocialProvider] {
        &self.social_providers
    }

    /// Form target for starting a social sign-in on the auth service.
    pub fn social_sign_in_action(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            SOCIAL_SIGN_IN_PATH
        )
    }

    /// Name of the session cookie, `__Secure-` prefixed for an https base URL.
    pub fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    /// Whether auth cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }
}

impl fmt::Debug for AuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthOptions")
            .field("secret", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("database", &self.database)
            .field("social_providers", &self.social_providers)
            .field("session_cookie", &self.session_cookie)
            .finish()
    }
}
