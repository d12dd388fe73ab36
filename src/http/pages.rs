//! HTML for the shell's pages.
//!
//! Plain string rendering; there is no template engine. Every value that
//! is not a literal goes through [`escape_html`].

use crate::auth::{AuthOptions, SessionData};
use crate::config::ClientConfig;

/// Path of the signed-in landing page.
pub const APP_PATH: &str = "/app";
/// Path of the login page.
pub const LOGIN_PATH: &str = "/auth/login";
/// Path that ends the session.
pub const LOGOUT_PATH: &str = "/auth/logout";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// Escape text for use in HTML content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize the client configuration for embedding in a `<script>` block.
///
/// Only [`ClientConfig`] can be passed here; server secrets have no
/// `Serialize` impl.
pub fn client_env_json(client: &ClientConfig) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(client)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

pub fn app_page(data: &SessionData, client: &ClientConfig) -> Result<String, serde_json::Error> {
    let body = format!(
        "<main class=\"app\">\n\
         <h1>Welcome to the App Page</h1>\n\
         <p>This is the main application page.</p>\n\
         <p class=\"signed-in\">Signed in as {}</p>\n\
         <a href=\"{}\">Sign out</a>\n\
         </main>\n\
         <script id=\"client-env\" type=\"application/json\">{}</script>",
        escape_html(&data.user.email),
        LOGOUT_PATH,
        client_env_json(client)?
    );
    Ok(layout("App", &body))
}

pub fn login_page(options: &AuthOptions) -> String {
    let action = escape_html(&options.social_sign_in_action());
    let buttons: String = options
        .social_providers()
        .iter()
        .map(|provider| {
            format!(
                "<form method=\"post\" action=\"{}\">\n\
                 <input type=\"hidden\" name=\"provider\" value=\"{}\">\n\
                 <input type=\"hidden\" name=\"callbackURL\" value=\"{}\">\n\
                 <button type=\"submit\">Login with {}</button>\n\
                 </form>\n",
                action,
                escape_html(provider.id()),
                APP_PATH,
                escape_html(provider.display_name())
            )
        })
        .collect();

    let body = format!(
        "<main class=\"login\">\n<div class=\"card\">\n\
         <h1>Welcome back</h1>\n\
         <p>Login with your Google account</p>\n\
         <div class=\"providers\">\n{}</div>\n\
         </div>\n</main>",
        buttons
    );
    layout("Sign in", &body)
}

/// The error boundary page.
pub fn error_page() -> String {
    let body = format!(
        "<main class=\"error\">\n\
         <h1>Something went wrong!</h1>\n\
         <p>An unexpected error occurred. Please try again or sign in.</p>\n\
         <a href=\"{}\">Go to Sign In</a>\n\
         </main>",
        LOGIN_PATH
    );
    layout("Error", &body)
}

pub fn not_found_page() -> String {
    let body = format!(
        "<main class=\"not-found\">\n<h1>Page not found</h1>\n<a href=\"{}\">Go to the app</a>\n</main>",
        APP_PATH
    );
    layout("Not found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_error_page_links_to_login() {
        let html = error_page();
        assert!(html.contains("Something went wrong!"));
        assert!(html.contains("href=\"/auth/login\""));
        assert!(html.contains("Go to Sign In"));
    }

    #[test]
    fn test_empty_client_env_embeds_empty_object() {
        assert_eq!(client_env_json(&ClientConfig::default()).unwrap(), "{}");
    }
}
