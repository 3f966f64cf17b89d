//! Integration tests for Cedar Motors.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p cedar-motors-cli -- migrate
//! cargo run -p cedar-motors-cli -- seed
//!
//! # Start the site
//! cargo run -p cedar-motors-site
//!
//! # Run the ignored integration tests
//! cargo test -p cedar-motors-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running site over HTTP with a cookie-holding reqwest
//! client, so redirects and flash messages behave like a browser session.

use reqwest::Client;

/// Base URL for the site (configurable via environment).
#[must_use]
pub fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create a browser-like client: cookie store on, redirects followed.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn browser_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Create a client that does NOT follow redirects, for asserting on
/// `Location` headers directly.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn raw_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique test email so runs don't collide.
#[must_use]
pub fn unique_email() -> String {
    format!("test-{}@example.com", uuid::Uuid::new_v4())
}

/// A password that satisfies the site's strength rules.
pub const STRONG_PASSWORD: &str = "Int3gration!Pass";
