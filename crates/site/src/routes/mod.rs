//! HTTP route handlers for the dealership site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings Postgres)
//!
//! # Inventory (public)
//! GET  /inv/type/{classification_id} - Vehicles in a classification
//! GET  /inv/detail/{inv_id}          - Vehicle detail page
//!
//! # Inventory management (employee/admin)
//! GET  /inv/                    - Management dashboard
//! GET  /inv/add-classification  - New classification form
//! POST /inv/add-classification  - Create classification
//! GET  /inv/add-inventory       - New vehicle form
//! POST /inv/add-inventory       - Create vehicle
//! GET  /inv/edit/{inv_id}       - Edit vehicle form
//! POST /inv/update              - Update vehicle
//! GET  /inv/delete/{inv_id}     - Delete confirmation
//! POST /inv/delete              - Delete vehicle
//! GET  /inv/inventory/{classification_id} - Vehicles as JSON (management UI)
//!
//! # Account
//! GET  /account/login           - Login page
//! POST /account/login           - Login action
//! GET  /account/register        - Register page
//! POST /account/register        - Register action
//! GET  /account/                - Account management (requires auth)
//! GET  /account/update/{account_id} - Update form (own account or admin)
//! POST /account/update          - Update name/email
//! POST /account/update-password - Change password
//! GET  /account/logout          - Logout
//!
//! # Favorites (requires auth)
//! GET  /account/favorites               - Saved vehicles
//! POST /account/favorites/add/{inv_id}  - Save a vehicle
//! POST /account/favorites/remove/{inv_id} - Remove a saved vehicle
//! ```

pub mod account;
pub mod favorites;
pub mod home;
pub mod inventory;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::db::inventory::InventoryRepository;
use crate::error::Result;
use crate::middleware::rate_limit::RateLimiterLayer;
use crate::middleware::{FlashMessage, take_flash};
use crate::models::session::CurrentAccount;
use crate::models::vehicle::Classification;
use crate::state::AppState;

/// Data every rendered page needs: the classification nav, any pending
/// flash messages, and the logged-in account for the header.
pub struct Shell {
    pub nav: Vec<Classification>,
    pub flash: Vec<FlashMessage>,
    pub account: Option<CurrentAccount>,
}

impl Shell {
    /// Load the shell, draining flash messages from the session.
    pub async fn load(
        state: &AppState,
        session: &Session,
        account: Option<CurrentAccount>,
    ) -> Result<Self> {
        let nav = InventoryRepository::new(state.pool())
            .list_classifications()
            .await?;
        let flash = take_flash(session).await;
        Ok(Self {
            nav,
            flash,
            account,
        })
    }
}

/// Create the account routes router.
///
/// Login and registration POSTs sit behind the per-IP auth rate limiter.
pub fn account_routes(auth_limiter: RateLimiterLayer) -> Router<AppState> {
    Router::new()
        .route("/login", get(account::login_page))
        .route("/register", get(account::register_page))
        .route("/login", post(account::login).layer(auth_limiter.clone()))
        .route("/register", post(account::register).layer(auth_limiter))
        .route("/", get(account::management))
        .route("/update/{account_id}", get(account::update_page))
        .route("/update", post(account::update))
        .route("/update-password", post(account::update_password))
        .route("/logout", get(account::logout))
        .route("/favorites", get(favorites::index))
        .route("/favorites/add/{inv_id}", post(favorites::add))
        .route("/favorites/remove/{inv_id}", post(favorites::remove))
}

/// Create the inventory routes router.
pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        // Public catalog
        .route("/type/{classification_id}", get(inventory::classification))
        .route("/detail/{inv_id}", get(inventory::detail))
        // Staff management
        .route("/", get(inventory::management))
        .route(
            "/add-classification",
            get(inventory::add_classification_page).post(inventory::add_classification),
        )
        .route(
            "/add-inventory",
            get(inventory::add_vehicle_page).post(inventory::add_vehicle),
        )
        .route("/edit/{inv_id}", get(inventory::edit_page))
        .route("/update", post(inventory::update))
        .route("/delete/{inv_id}", get(inventory::delete_page))
        .route("/delete", post(inventory::delete))
        .route(
            "/inventory/{classification_id}",
            get(inventory::classification_json),
        )
}

/// Create all routes for the site.
pub fn routes(auth_limiter: RateLimiterLayer) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/inv", inventory_routes())
        .nest("/account", account_routes(auth_limiter))
}
