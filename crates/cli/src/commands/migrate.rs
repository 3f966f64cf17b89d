//! Database migration command.
//!
//! Applies the site's migrations. The migration files live in
//! `crates/site/migrations/` and are embedded at compile time.

use tracing::info;

/// Run the site database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Running site migrations...");
    sqlx::migrate!("../site/migrations").run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
