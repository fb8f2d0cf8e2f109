use crate::config::{init_database, migrate_database, Settings};

/// Run database migrations for the audit database
///
/// Connects and applies all pending migrations without starting the
/// recorder or the HTTP server.
pub async fn run_migrations(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = init_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
