//! Account repository for database operations.
//!
//! Queries run at runtime via `query_as` with explicit row types; row to
//! domain conversion goes through `TryFrom` so invalid database contents
//! surface as `DataCorruption` instead of panics.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedar_motors_core::{AccountId, AccountRole, Email};

use super::{RepositoryError, map_unique_violation};
use crate::models::account::Account;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for account queries.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let role: AccountRole = row.role.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        Ok(Self {
            id: AccountId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for login queries (account plus password hash).
#[derive(Debug, sqlx::FromRow)]
struct AccountWithPasswordRow {
    #[sqlx(flatten)]
    account: AccountRow,
    password_hash: String,
}

const ACCOUNT_COLUMNS: &str =
    "id, first_name, last_name, email, role, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an account by its email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE email = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new account with a pre-hashed password.
    ///
    /// New accounts always start with the `client` role; staff roles are
    /// assigned through the CLI.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<Account, RepositoryError> {
        self.create_with_role(first_name, last_name, email, password_hash, AccountRole::Client)
            .await
    }

    /// Create a new account with an explicit role (CLI staff provisioning).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_role(
        &self,
        first_name: &str,
        last_name: &str,
        email: &Email,
        password_hash: &str,
        role: AccountRole,
    ) -> Result<Account, RepositoryError> {
        let sql = format!(
            "INSERT INTO account (first_name, last_name, email, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ACCOUNT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(first_name)
            .bind(last_name)
            .bind(email.as_str())
            .bind(password_hash)
            .bind(role.as_str())
            .fetch_one(self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "email"))?;

        row.try_into()
    }

    /// Get an account together with its password hash, by email.
    ///
    /// Returns `None` if no account has this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Account, String)>, RepositoryError> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS}, password_hash FROM account WHERE email = $1"
        );
        let row = sqlx::query_as::<_, AccountWithPasswordRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let account: Account = r.account.try_into()?;
        Ok(Some((account, r.password_hash)))
    }

    /// Update an account's name and email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new email is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_info(
        &self,
        id: AccountId,
        first_name: &str,
        last_name: &str,
        email: &Email,
    ) -> Result<Account, RepositoryError> {
        let sql = format!(
            "UPDATE account
             SET first_name = $1, last_name = $2, email = $3, updated_at = now()
             WHERE id = $4
             RETURNING {ACCOUNT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(first_name)
            .bind(last_name)
            .bind(email.as_str())
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "email"))?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Replace an account's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE account SET password_hash = $1, updated_at = now() WHERE id = $2",
        )
        .bind(password_hash)
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Check whether an email address is already registered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM account WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(self.pool)
                .await?;

        Ok(exists.0)
    }
}
