//! Database connection settings.
//!
//! Settings come from a JSON file (`database_settings.json` by default) or,
//! when `DATABASE_URL` is set, from that URL alone.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;

use gurgle_core::defaults::{DB_POOL_SIZE_MIN, DB_PORT};
use gurgle_core::{Error, Result};

use crate::pool::PoolConfig;

/// Connection settings for the clip database.
#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Full connection URL; overrides the individual fields when present.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub use_pool: bool,
    #[serde(default)]
    pub pool_size: Option<u32>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    DB_PORT
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("use_pool", &self.use_pool)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

impl DatabaseSettings {
    /// Settings backed by a single connection URL, pooled.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            host: default_host(),
            port: default_port(),
            user: None,
            password: None,
            database: None,
            use_pool: true,
            pool_size: None,
        }
    }

    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid database settings: {}", e)))
    }

    /// Read settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Cannot read database settings {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    /// `DATABASE_URL` if set, otherwise the settings file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Ok(Self::from_url(url)),
            _ => Self::from_file(path),
        }
    }

    /// Driver connection options.
    pub fn connect_options(&self) -> Result<MySqlConnectOptions> {
        if let Some(url) = &self.url {
            return MySqlConnectOptions::from_str(url)
                .map_err(|e| Error::Config(format!("Invalid DATABASE_URL: {}", e)));
        }

        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port);
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        Ok(options)
    }

    /// Pool sizing: at least [`DB_POOL_SIZE_MIN`] when pooling, else one connection.
    pub fn pool_config(&self) -> PoolConfig {
        if self.use_pool {
            let size = self.pool_size.unwrap_or(DB_POOL_SIZE_MIN).max(DB_POOL_SIZE_MIN);
            PoolConfig::new().max_connections(size)
        } else {
            PoolConfig::single()
        }
    }
}
