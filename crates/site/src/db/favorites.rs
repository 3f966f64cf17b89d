//! Favorites repository.
//!
//! The `favorite` table's primary key is the (account, vehicle) pair, so a
//! vehicle can never be favorited twice; inserts use `ON CONFLICT DO
//! NOTHING` and report whether a row was actually added.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedar_motors_core::{AccountId, VehicleId};

use super::RepositoryError;
use crate::models::favorite::FavoriteVehicle;

/// Internal row type for the favorites list (joined with inventory).
#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    vehicle_id: i32,
    make: String,
    model: String,
    year: i32,
    price: Decimal,
    image: String,
    added_at: DateTime<Utc>,
}

impl From<FavoriteRow> for FavoriteVehicle {
    fn from(row: FavoriteRow) -> Self {
        Self {
            vehicle_id: VehicleId::new(row.vehicle_id),
            make: row.make,
            model: row.model,
            year: row.year,
            price: row.price,
            image: row.image,
            added_at: row.added_at,
        }
    }
}

/// Repository for per-account favorites.
pub struct FavoriteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorites repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List an account's favorites, most recently added first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<FavoriteVehicle>, RepositoryError> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            "SELECT i.id AS vehicle_id, i.make, i.model, i.year, i.price, i.image,
                    f.created_at AS added_at
             FROM favorite f
             JOIN inventory i ON i.id = f.inventory_id
             WHERE f.account_id = $1
             ORDER BY f.created_at DESC",
        )
        .bind(account_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Add a vehicle to an account's favorites.
    ///
    /// Returns `true` if the favorite was added, `false` if it already
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including
    /// foreign key violations for a missing vehicle).
    pub async fn add(
        &self,
        account_id: AccountId,
        vehicle_id: VehicleId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO favorite (account_id, inventory_id)
             VALUES ($1, $2)
             ON CONFLICT (account_id, inventory_id) DO NOTHING",
        )
        .bind(account_id.as_i32())
        .bind(vehicle_id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a vehicle from an account's favorites.
    ///
    /// Returns `true` if a row was removed, `false` if it wasn't favorited.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(
        &self,
        account_id: AccountId,
        vehicle_id: VehicleId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM favorite WHERE account_id = $1 AND inventory_id = $2")
                .bind(account_id.as_i32())
                .bind(vehicle_id.as_i32())
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
