//! Integration tests for the inventory catalog and role-gated management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations and seed data
//! - The site running (cargo run -p cedar-motors-site)
//!
//! The staff tests additionally need an employee account created via:
//! cm-cli account create -e staff@example.com -f Staff -l Member -r employee
//!
//! Run with: cargo test -p cedar-motors-integration-tests -- --ignored

use reqwest::StatusCode;

use cedar_motors_integration_tests::{
    STRONG_PASSWORD, browser_client, raw_client, site_base_url, unique_email,
};

#[tokio::test]
#[ignore = "Requires running site and seeded database"]
async fn test_home_page_lists_classifications() {
    let client = browser_client();
    let base_url = site_base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to load home page");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Cedar Motors"));
    // Seeded classifications appear in the nav
    assert!(body.contains("/inv/type/"));
}

#[tokio::test]
#[ignore = "Requires running site and seeded database"]
async fn test_classification_page_and_detail() {
    let client = browser_client();
    let base_url = site_base_url();

    let resp = client
        .get(format!("{base_url}/inv/type/1"))
        .send()
        .await
        .expect("Failed to load classification page");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/inv/detail/1"))
        .send()
        .await
        .expect("Failed to load detail page");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Price:"));
    assert!(body.contains("Miles:"));
}

#[tokio::test]
#[ignore = "Requires running site and seeded database"]
async fn test_unknown_vehicle_is_404() {
    let client = browser_client();
    let base_url = site_base_url();

    let resp = client
        .get(format!("{base_url}/inv/detail/999999"))
        .send()
        .await
        .expect("Failed to request unknown vehicle");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running site and database"]
async fn test_management_requires_staff() {
    let base_url = site_base_url();

    // Anonymous: redirected to login
    let raw = raw_client();
    let resp = raw
        .get(format!("{base_url}/inv/"))
        .send()
        .await
        .expect("Failed to request management page");
    assert!(resp.status().is_redirection());

    // Client-role account: also redirected, not authorized
    let client = raw_client();
    let email = unique_email();
    client
        .post(format!("{base_url}/account/register"))
        .form(&[
            ("first_name", "Plain"),
            ("last_name", "Client"),
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
        .get(format!("{base_url}/inv/"))
        .send()
        .await
        .expect("Failed to request management page");
    assert!(resp.status().is_redirection());

    // The JSON endpoint is gated the same way
    let resp = client
        .get(format!("{base_url}/inv/inventory/1"))
        .send()
        .await
        .expect("Failed to request inventory JSON");
    assert!(resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires running site, seeded database, and a staff account"]
async fn test_staff_can_manage_inventory() {
    let base_url = site_base_url();
    let staff_email =
        std::env::var("STAFF_EMAIL").unwrap_or_else(|_| "staff@example.com".to_string());
    let staff_password =
        std::env::var("STAFF_PASSWORD").unwrap_or_else(|_| STRONG_PASSWORD.to_string());

    let client = browser_client();
    client
        .post(format!("{base_url}/account/login"))
        .form(&[
            ("email", staff_email.as_str()),
            ("password", staff_password.as_str()),
        ])
        .send()
        .await
        .expect("Failed to login as staff");

    // Management dashboard renders
    let resp = client
        .get(format!("{base_url}/inv/"))
        .send()
        .await
        .expect("Failed to load management page");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Inventory Management"));

    // JSON endpoint returns an array of vehicles
    let resp = client
        .get(format!("{base_url}/inv/inventory/1"))
        .send()
        .await
        .expect("Failed to load inventory JSON");
    assert_eq!(resp.status(), StatusCode::OK);
    let vehicles: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert!(vehicles.is_array());

    // Vehicle validation failures re-render the form with every problem
    let resp = client
        .post(format!("{base_url}/inv/add-inventory"))
        .form(&[
            ("classification_id", "1"),
            ("make", "X"),
            ("model", "Y"),
            ("description", ""),
            ("image", "/img.jpg"),
            ("thumbnail", "/img-tn.jpg"),
            ("price", "-1"),
            ("year", "1800"),
            ("miles", "-5"),
            ("color", "Red"),
        ])
        .send()
        .await
        .expect("Failed to submit invalid vehicle");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Make must be at least 3 characters"));
    assert!(body.contains("Price must be a positive number"));
}
