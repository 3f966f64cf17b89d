//! Integration tests for the favorites feature.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations and seed data
//! - The site running (cargo run -p cedar-motors-site)
//!
//! Run with: cargo test -p cedar-motors-integration-tests -- --ignored

use reqwest::StatusCode;

use cedar_motors_integration_tests::{
    STRONG_PASSWORD, browser_client, raw_client, site_base_url, unique_email,
};

/// Register and log in a fresh account, returning a cookie-holding client.
async fn logged_in_client() -> reqwest::Client {
    let client = browser_client();
    let base_url = site_base_url();
    let email = unique_email();

    client
        .post(format!("{base_url}/account/register"))
        .form(&[
            ("first_name", "Fav"),
            ("last_name", "Tester"),
            ("email", &email),
            ("password", STRONG_PASSWORD),
        ])
        .send()
        .await
        .expect("Failed to register");

    client
        .post(format!("{base_url}/account/login"))
        .form(&[("email", email.as_str()), ("password", STRONG_PASSWORD)])
        .send()
        .await
        .expect("Failed to login");

    client
}

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_favorites_require_login() {
    let client = raw_client();
    let base_url = site_base_url();

    let resp = client
        .get(format!("{base_url}/account/favorites"))
        .send()
        .await
        .expect("Failed to request favorites page");
    assert!(resp.status().is_redirection());

    let resp = client
        .post(format!("{base_url}/account/favorites/add/1"))
        .send()
        .await
        .expect("Failed to post favorite");
    assert!(resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires running site and seeded database"]
async fn test_add_and_remove_favorite() {
    let client = logged_in_client().await;
    let base_url = site_base_url();

    // Add a seeded vehicle to favorites; lands back on the detail page
    let resp = client
        .post(format!("{base_url}/account/favorites/add/1"))
        .send()
        .await
        .expect("Failed to add favorite");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("added to your favorites"));

    // The favorites page lists it
    let resp = client
        .get(format!("{base_url}/account/favorites"))
        .send()
        .await
        .expect("Failed to load favorites");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("/inv/detail/1"));

    // Remove it again
    let resp = client
        .post(format!("{base_url}/account/favorites/remove/1"))
        .send()
        .await
        .expect("Failed to remove favorite");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("removed from your favorites"));
}

#[tokio::test]
#[ignore = "Requires running site and seeded database"]
async fn test_duplicate_favorite_is_noop() {
    let client = logged_in_client().await;
    let base_url = site_base_url();

    let resp = client
        .post(format!("{base_url}/account/favorites/add/1"))
        .send()
        .await
        .expect("Failed to add favorite");
    assert_eq!(resp.status(), StatusCode::OK);

    // Adding again reports the duplicate instead of inserting a second row
    let resp = client
        .post(format!("{base_url}/account/favorites/add/1"))
        .send()
        .await
        .expect("Failed to add duplicate favorite");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("already in your favorites"));

    // And the list shows it exactly once
    let resp = client
        .get(format!("{base_url}/account/favorites"))
        .send()
        .await
        .expect("Failed to load favorites");
    let body = resp.text().await.expect("Failed to read body");
    assert_eq!(body.matches("/inv/detail/1\"").count(), 1);
}

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_favoriting_unknown_vehicle_is_404() {
    let client = logged_in_client().await;
    let base_url = site_base_url();

    let resp = client
        .post(format!("{base_url}/account/favorites/add/999999"))
        .send()
        .await
        .expect("Failed to post favorite");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
