//! Connection settings read from the environment.

use crate::CmsError;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Where and how to connect.
///
/// | variable                   | default          |
/// |----------------------------|------------------|
/// | `DATABASE_URL`             | `sqlite::memory:`|
/// | `DATABASE_MAX_CONNECTIONS` | driver default   |
/// | `DATABASE_SQLX_LOGGING`    | `false`          |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_owned(),
            max_connections: None,
            sqlx_logging: false,
        }
    }
}

impl DatabaseConfig {
    /// Read the settings, loading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self, CmsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, CmsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("DATABASE_URL") {
            config.url = url;
        }
        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS") {
            let max = max.trim().parse().map_err(|_| {
                CmsError::Config(format!("DATABASE_MAX_CONNECTIONS is not a number: {max:?}"))
            })?;
            config.max_connections = Some(max);
        }
        if let Some(flag) = lookup("DATABASE_SQLX_LOGGING") {
            config.sqlx_logging = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(CmsError::Config(format!(
                        "DATABASE_SQLX_LOGGING is not a boolean: {flag:?}"
                    )))
                }
            };
        }
        Ok(config)
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.as_str());
        if let Some(max) = self.max_connections {
            opt.max_connections(max);
        }
        opt.sqlx_logging(self.sqlx_logging);
        opt
    }

    /// Open a connection pool.
    pub async fn connect(&self) -> Result<DatabaseConnection, CmsError> {
        let db = Database::connect(self.connect_options()).await?;
        info!(backend = ?db.get_database_backend(), "connected");
        Ok(db)
    }
}
