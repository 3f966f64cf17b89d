//! CLI command implementations.

pub mod account;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Connect to the site database using the same environment variables as
/// the site binary.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "SITE_DATABASE_URL or DATABASE_URL must be set")?;

    let pool = cedar_motors_site::db::create_pool(&database_url).await?;
    Ok(pool)
}
