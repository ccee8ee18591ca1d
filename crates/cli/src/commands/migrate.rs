//! Database migration command.

use barback_server::config::ServerConfig;
use barback_server::db;

use super::CommandError;

/// Run the server's pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if configuration is missing or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
