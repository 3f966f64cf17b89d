//! Inventory repository for classification and vehicle operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedar_motors_core::{ClassificationId, VehicleId};

use super::{RepositoryError, map_unique_violation};
use crate::models::vehicle::{Classification, NewVehicle, Vehicle, VehicleUpdate};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ClassificationRow {
    id: i32,
    name: String,
}

impl From<ClassificationRow> for Classification {
    fn from(row: ClassificationRow) -> Self {
        Self {
            id: ClassificationId::new(row.id),
            name: row.name,
        }
    }
}

/// Internal row type for vehicle queries (joined with classification).
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i32,
    classification_id: i32,
    classification_name: String,
    make: String,
    model: String,
    year: i32,
    description: String,
    image: String,
    thumbnail: String,
    price: Decimal,
    miles: i32,
    color: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: VehicleId::new(row.id),
            classification_id: ClassificationId::new(row.classification_id),
            classification_name: row.classification_name,
            make: row.make,
            model: row.model,
            year: row.year,
            description: row.description,
            image: row.image,
            thumbnail: row.thumbnail,
            price: row.price,
            miles: row.miles,
            color: row.color,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const VEHICLE_SELECT: &str = "SELECT i.id, i.classification_id, c.name AS classification_name,
            i.make, i.model, i.year, i.description, i.image, i.thumbnail,
            i.price, i.miles, i.color, i.created_at, i.updated_at
     FROM inventory i
     JOIN classification c ON c.id = i.classification_id";

// =============================================================================
// Repository
// =============================================================================

/// Repository for classification and vehicle database operations.
pub struct InventoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InventoryRepository<'a> {
    /// Create a new inventory repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Classifications
    // =========================================================================

    /// List all classifications ordered by name.
    ///
    /// Used on every page to build the navigation bar.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_classifications(&self) -> Result<Vec<Classification>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClassificationRow>(
            "SELECT id, name FROM classification ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a classification by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_classification(
        &self,
        id: ClassificationId,
    ) -> Result<Option<Classification>, RepositoryError> {
        let row = sqlx::query_as::<_, ClassificationRow>(
            "SELECT id, name FROM classification WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Add a new classification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_classification(
        &self,
        name: &str,
    ) -> Result<Classification, RepositoryError> {
        let row = sqlx::query_as::<_, ClassificationRow>(
            "INSERT INTO classification (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "classification"))?;

        Ok(row.into())
    }

    // =========================================================================
    // Vehicles
    // =========================================================================

    /// Get a vehicle by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        let sql = format!("{VEHICLE_SELECT} WHERE i.id = $1");
        let row = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List all vehicles in a classification, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_classification(
        &self,
        classification_id: ClassificationId,
    ) -> Result<Vec<Vehicle>, RepositoryError> {
        let sql = format!(
            "{VEHICLE_SELECT} WHERE i.classification_id = $1 ORDER BY i.created_at DESC"
        );
        let rows = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(classification_id.as_i32())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a new vehicle listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including
    /// foreign key violations for a bad classification ID).
    pub async fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle, RepositoryError> {
        let row: (i32,) = sqlx::query_as(
            "INSERT INTO inventory (classification_id, make, model, year, description,
                                    image, thumbnail, price, miles, color)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING id",
        )
        .bind(vehicle.classification_id.as_i32())
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.description)
        .bind(&vehicle.image)
        .bind(&vehicle.thumbnail)
        .bind(vehicle.price)
        .bind(vehicle.miles)
        .bind(&vehicle.color)
        .fetch_one(self.pool)
        .await?;

        self.get_vehicle(VehicleId::new(row.0))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Update an existing vehicle listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the vehicle doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_vehicle(&self, update: &VehicleUpdate) -> Result<Vehicle, RepositoryError> {
        let fields = &update.fields;
        let result = sqlx::query(
            "UPDATE inventory
             SET classification_id = $1, make = $2, model = $3, year = $4,
                 description = $5, image = $6, thumbnail = $7, price = $8,
                 miles = $9, color = $10, updated_at = now()
             WHERE id = $11",
        )
        .bind(fields.classification_id.as_i32())
        .bind(&fields.make)
        .bind(&fields.model)
        .bind(fields.year)
        .bind(&fields.description)
        .bind(&fields.image)
        .bind(&fields.thumbnail)
        .bind(fields.price)
        .bind(fields.miles)
        .bind(&fields.color)
        .bind(update.id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_vehicle(update.id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a vehicle listing.
    ///
    /// Returns `true` if a row was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_vehicle(&self, id: VehicleId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
