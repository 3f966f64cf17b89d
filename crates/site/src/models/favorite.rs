//! Favorites domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use cedar_motors_core::VehicleId;

/// A favorited vehicle as shown on the favorites page.
///
/// Joined with the inventory table so the list can render without extra
/// queries.
#[derive(Debug, Clone)]
pub struct FavoriteVehicle {
    pub vehicle_id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub image: String,
    /// When the vehicle was added to favorites.
    pub added_at: DateTime<Utc>,
}
