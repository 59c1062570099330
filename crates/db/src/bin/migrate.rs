//! Connect to the database, verify it is reachable, and apply pending
//! migrations.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boardcat_db::config::{DbConfig, DbConfigError};

#[derive(Debug, thiserror::Error)]
enum MigrateError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] DbConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boardcat_db=debug,boardcat_migrate=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Migration run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), MigrateError> {
    // --- Configuration ---
    let config = DbConfig::from_env()?;
    tracing::info!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Loaded database configuration"
    );

    // --- Database ---
    let pool = boardcat_db::create_pool(&config).await?;
    tracing::info!("Database connection pool created");

    boardcat_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    boardcat_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    pool.close().await;
    Ok(())
}
