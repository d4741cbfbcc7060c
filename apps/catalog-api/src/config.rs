use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::RetryConfig;
use database::postgres::PostgresConfig;
use std::fmt;
use std::str::FromStr;

pub use core_config::Environment;

/// Backing store for the catalog, selected by `CATALOG_STORE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    /// Volatile, lost on restart
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" | "in-memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown store '{other}', expected 'postgres' or 'memory'")),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Postgres => f.write_str("postgres"),
            StoreKind::Memory => f.write_str("memory"),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: StoreKind,
    /// Present only for [`StoreKind::Postgres`]
    pub database: Option<PostgresConfig>,
    pub retry: RetryConfig,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self::load()?)
    }

    fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080
        let store: StoreKind = env_parse("CATALOG_STORE", "postgres")?;

        let database = match store {
            StoreKind::Postgres => Some(PostgresConfig::from_env()?), // DATABASE_URL is required
            StoreKind::Memory => None,
        };

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            store,
            database,
            retry: RetryConfig::from_env()?,
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
        })
    }
}
