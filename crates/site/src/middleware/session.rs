//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. Sessions
//! carry only transient UI state (flash messages); authentication itself
//! rides in the JWT cookie.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::SiteConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "cm_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The session cookie is signed with a key derived from `SESSION_SECRET`,
/// so tampered session IDs are rejected before hitting the store.
///
/// # Arguments
///
/// * `pool` - `PostgreSQL` connection pool
/// * `config` - Site configuration (session secret, Secure cookie flag)
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &SiteConfig,
) -> SessionManagerLayer<PostgresStore, SignedCookie> {
    // The session table is created by the site migrations
    let store = PostgresStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(&config.session_secret))
}

/// Derive the cookie signing key from the configured session secret.
///
/// `Key::derive_from` requires at least 32 bytes of input; config
/// validation enforces that minimum before this is reached.
fn signing_key(secret: &SecretString) -> Key {
    Key::derive_from(secret.expose_secret().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_derivation() {
        let secret = SecretString::from("kJ8mN2pQ7rS4tU9vW3xY6zA1bC5dE0fG");
        let key = signing_key(&secret);
        assert!(!key.signing().is_empty());
    }

    #[test]
    fn test_different_secrets_yield_different_keys() {
        let a = signing_key(&SecretString::from("kJ8mN2pQ7rS4tU9vW3xY6zA1bC5dE0fG"));
        let b = signing_key(&SecretString::from("zY9xW8vU7tS6rQ5pN4mK3jH2gF1eD0cB"));
        assert_ne!(a.signing(), b.signing());
    }
}
