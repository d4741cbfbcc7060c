/// Failures of the operational layer around the pool: connecting, probing and
/// migrating. Query errors stay `sea_orm::DbErr` and are mapped by the stores.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection failed after {attempts} attempts: {reason}")]
    ConnectionFailed { attempts: u32, reason: String },

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
