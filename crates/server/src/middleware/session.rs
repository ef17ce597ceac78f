//! Session middleware configuration.
//!
//! Sets up cookie sessions using tower-sessions with the in-memory store.
//! Sessions default to browser-session lifetime; the login handler extends
//! them for "remember me".

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "cc_session";

/// "Remember me" session expiry in seconds (7 days of inactivity).
pub const REMEMBER_ME_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// The expiry applied by the login handler when "remember me" is set.
#[must_use]
pub fn remember_me_expiry() -> Expiry {
    Expiry::OnInactivity(tower_sessions::cookie::time::Duration::seconds(
        REMEMBER_ME_EXPIRY_SECONDS,
    ))
}

/// Create the session layer with the in-memory store.
#[must_use]
pub fn create_session_layer(config: &ServerConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Secure cookies when served over HTTPS
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
