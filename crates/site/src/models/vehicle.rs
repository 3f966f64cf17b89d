//! Inventory domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use cedar_motors_core::{ClassificationId, VehicleId};

/// A vehicle classification (e.g., SUV, Sedan).
///
/// Classifications drive the site navigation and group inventory.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub id: ClassificationId,
    pub name: String,
}

/// A vehicle listing (domain type).
///
/// Serialized directly for the inventory management JSON endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub classification_id: ClassificationId,
    /// Name of the classification this vehicle belongs to.
    pub classification_name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub description: String,
    /// Path to the full-size image.
    pub image: String,
    /// Path to the thumbnail image.
    pub thumbnail: String,
    pub price: Decimal,
    pub miles: i32,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a vehicle listing.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub classification_id: ClassificationId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub description: String,
    pub image: String,
    pub thumbnail: String,
    pub price: Decimal,
    pub miles: i32,
    pub color: String,
}

/// Validated input for updating an existing vehicle listing.
#[derive(Debug, Clone)]
pub struct VehicleUpdate {
    pub id: VehicleId,
    pub fields: NewVehicle,
}
