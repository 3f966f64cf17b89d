//! Favorites route handlers.
//!
//! Logged-in accounts can save vehicles to a favorites list. Adding the
//! same vehicle twice is a no-op reported via flash, not an error.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use cedar_motors_core::VehicleId;

use crate::db::favorites::FavoriteRepository;
use crate::db::inventory::InventoryRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{FlashLevel, RequireAuth, flash};
use crate::models::favorite::FavoriteVehicle;
use crate::routes::Shell;
use crate::state::AppState;

/// Favorites listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/favorites.html")]
pub struct FavoritesTemplate {
    pub shell: Shell,
    pub favorites: Vec<FavoriteVehicle>,
}

/// Display the account's saved vehicles, most recently saved first.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
) -> Result<Response> {
    let favorites = FavoriteRepository::new(state.pool())
        .list_for_account(current.id)
        .await?;

    let shell = Shell::load(&state, &session, Some(current)).await?;
    Ok(FavoritesTemplate { shell, favorites }.into_response())
}

/// Save a vehicle to the account's favorites.
///
/// Redirects back to the vehicle's detail page either way.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    Path(inv_id): Path<i32>,
) -> Result<Response> {
    let vehicle_id = VehicleId::new(inv_id);

    // Make sure the vehicle exists so a bad id gets a 404, not a
    // foreign key error.
    let vehicle = InventoryRepository::new(state.pool())
        .get_vehicle(vehicle_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vehicle {inv_id}")))?;

    let added = FavoriteRepository::new(state.pool())
        .add(current.id, vehicle_id)
        .await?;

    if added {
        tracing::info!(account_id = %current.id, vehicle_id = %vehicle_id, "Favorite added");
        flash(
            &session,
            FlashLevel::Success,
            format!(
                "The {} {} was added to your favorites.",
                vehicle.make, vehicle.model
            ),
        )
        .await;
    } else {
        flash(
            &session,
            FlashLevel::Notice,
            "This vehicle is already in your favorites.",
        )
        .await;
    }

    Ok(Redirect::to(&format!("/inv/detail/{inv_id}")).into_response())
}

/// Remove a vehicle from the account's favorites.
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    Path(inv_id): Path<i32>,
) -> Result<Response> {
    let removed = FavoriteRepository::new(state.pool())
        .remove(current.id, VehicleId::new(inv_id))
        .await?;

    if removed {
        tracing::info!(account_id = %current.id, vehicle_id = inv_id, "Favorite removed");
        flash(
            &session,
            FlashLevel::Success,
            "The vehicle was removed from your favorites.",
        )
        .await;
    } else {
        flash(
            &session,
            FlashLevel::Notice,
            "That vehicle was not in your favorites.",
        )
        .await;
    }

    Ok(Redirect::to("/account/favorites").into_response())
}
