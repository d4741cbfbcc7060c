use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{info, instrument};

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Connects with the default pool from [`PostgresConfig::new`].
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(PostgresConfig::new(database_url)).await
}

pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Connects with exponential backoff.
///
/// Useful at startup when the database container may come up after the
/// service. `None` uses [`RetryConfig::default`].
///
/// ```ignore
/// let retry = RetryConfig::new().with_max_retries(5);
/// let db = connect_from_config_with_retry(PostgresConfig::from_env()?, Some(retry)).await?;
/// ```
#[instrument(skip_all, fields(max_connections = config.max_connections))]
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    let retry_config = retry_config.unwrap_or_default();
    let attempts = retry_config.max_retries + 1;
    let options = config.into_connect_options();

    retry_with_backoff(|| connect_with_options(options.clone()), retry_config)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed {
            attempts,
            reason: e.to_string(),
        })
}

/// Applies every pending migration of `M`.
///
/// `app_name` only labels the log lines.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!("Running {} database migrations", app_name);
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    info!("Migrations completed for {}", app_name);
    Ok(())
}
