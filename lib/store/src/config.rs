//! Store configuration, loaded from environment variables.

use serde::Deserialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// PostgreSQL connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl StoreConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Opens a connection pool against the configured database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await
    }
}

/// Applies pending migrations from the crate's `migrations/` directory.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_connections_defaults_when_absent() {
        let config: StoreConfig = serde_json::from_str(
            r#"{"database_url": "postgres://localhost/courier"}"#,
        )
        .expect("deserialize");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn explicit_max_connections_wins() {
        let config: StoreConfig = serde_json::from_str(
            r#"{"database_url": "postgres://localhost/courier", "max_connections": 20}"#,
        )
        .expect("deserialize");
        assert_eq!(config.max_connections, 20);
    }
}
