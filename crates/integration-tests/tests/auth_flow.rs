//! Integration tests for registration and login.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The site running (cargo run -p cedar-motors-site)
//!
//! Run with: cargo test -p cedar-motors-integration-tests -- --ignored

use reqwest::StatusCode;

use cedar_motors_integration_tests::{
    STRONG_PASSWORD, browser_client, raw_client, site_base_url, unique_email,
};

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_health_endpoints() {
    let client = browser_client();
    let base_url = site_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach health endpoint");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to reach readiness endpoint");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_register_then_login() {
    let client = browser_client();
    let base_url = site_base_url();
    let email = unique_email();

    // Register; success redirects to the login page with a flash message
    let resp = client
        .post(format!("{base_url}/account/register"))
        .form(&[
            ("first_name", "Test"),
            ("last_name", "Person"),
            ("email", &email),
            ("password", STRONG_PASSWORD),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);
    // The apostrophe in the flash text is HTML-escaped, so match around it
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("registered Test. Please log in."));

    // Login lands on the account management page
    let resp = client
        .post(format!("{base_url}/account/login"))
        .form(&[("email", email.as_str()), ("password", STRONG_PASSWORD)])
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Account Management"));
    assert!(body.contains("Welcome Test"));
}

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_duplicate_registration_rejected() {
    let client = browser_client();
    let base_url = site_base_url();
    let email = unique_email();

    let form = [
        ("first_name", "Dup"),
        ("last_name", "Licate"),
        ("email", &email),
        ("password", STRONG_PASSWORD),
    ];

    let resp = client
        .post(format!("{base_url}/account/register"))
        .form(&form)
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);

    // Second registration with the same email re-renders the form
    let resp = client
        .post(format!("{base_url}/account/register"))
        .form(&form)
        .send()
        .await
        .expect("Failed to send duplicate registration");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("already exists"));
}

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_login_wrong_password_sticky_email() {
    let client = browser_client();
    let base_url = site_base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base_url}/account/register"))
        .form(&[
            ("first_name", "Wrong"),
            ("last_name", "Password"),
            ("email", &email),
            ("password", STRONG_PASSWORD),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base_url}/account/login"))
        .form(&[("email", email.as_str()), ("password", "Wrong!Password1")])
        .send()
        .await
        .expect("Failed to send login");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");

    // The form re-renders with the notice and the email still filled in
    assert!(body.contains("Please check your credentials"));
    assert!(body.contains(&email));
}

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_weak_password_rejected() {
    let client = browser_client();
    let base_url = site_base_url();

    let resp = client
        .post(format!("{base_url}/account/register"))
        .form(&[
            ("first_name", "Weak"),
            ("last_name", "Password"),
            ("email", unique_email().as_str()),
            ("password", "tooshort"),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("at least 12 characters"));
}

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_account_management_requires_login() {
    let client = raw_client();
    let base_url = site_base_url();

    let resp = client
        .get(format!("{base_url}/account/"))
        .send()
        .await
        .expect("Failed to request account page");

    // Anonymous visitors get bounced to login
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/account/login");
}

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_logout_clears_session() {
    let client = browser_client();
    let base_url = site_base_url();
    let email = unique_email();

    client
        .post(format!("{base_url}/account/register"))
        .form(&[
            ("first_name", "Log"),
            ("last_name", "Out"),
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

    let resp = client
        .get(format!("{base_url}/account/logout"))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), StatusCode::OK);

    // Auth pages are gated again
    let raw = raw_client();
    let resp = raw
        .get(format!("{base_url}/account/"))
        .send()
        .await
        .expect("Failed to request account page");
    assert!(resp.status().is_redirection());
}
