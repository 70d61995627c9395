//! Server configuration.
//!
//! Application settings come from a JSON file (`GURGLE_APP_SETTINGS`,
//! default `app_settings.json`); listener and rate-limit settings come from
//! the environment.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use gurgle_core::defaults::{
    APP_SETTINGS_PATH, DATABASE_SETTINGS_PATH, MAX_QUERY_LENGTH_CEILING, RATE_LIMIT_PERIOD_SECS,
    RATE_LIMIT_REQUESTS, RESULTS_PER_PAGE, SERVER_PORT, STATIC_DIR,
};
use gurgle_core::{Error, Result};
use gurgle_search::SearchModeFlags;

/// Settings file as written by operators.
#[derive(Debug, Deserialize)]
struct RawAppSettings {
    max_query_length: i64,
    enable_query_expansion_mode: bool,
    #[serde(default)]
    results_per_page: Option<i64>,
    #[serde(default)]
    site_url: Option<String>,
    #[serde(default)]
    audio_url_prefix: Option<String>,
    #[serde(default)]
    block_ai_scrapers: bool,
    #[serde(default)]
    static_dir: Option<PathBuf>,
}

/// Validated application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Queries are truncated to this many characters; always in `1..=120`.
    pub max_query_length: usize,
    pub enable_query_expansion_mode: bool,
    /// Always positive.
    pub results_per_page: i64,
    pub site_url: String,
    pub audio_url_prefix: Option<String>,
    pub block_ai_scrapers: bool,
    pub static_dir: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            max_query_length: MAX_QUERY_LENGTH_CEILING,
            enable_query_expansion_mode: false,
            results_per_page: RESULTS_PER_PAGE,
            site_url: String::new(),
            audio_url_prefix: None,
            block_ai_scrapers: false,
            static_dir: PathBuf::from(STATIC_DIR),
        }
    }
}

impl From<RawAppSettings> for AppSettings {
    fn from(raw: RawAppSettings) -> Self {
        let max_query_length = raw
            .max_query_length
            .clamp(1, MAX_QUERY_LENGTH_CEILING as i64) as usize;
        let results_per_page = match raw.results_per_page {
            Some(n) if n >= 1 => n,
            _ => RESULTS_PER_PAGE,
        };

        Self {
            max_query_length,
            enable_query_expansion_mode: raw.enable_query_expansion_mode,
            results_per_page,
            site_url: raw
                .site_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            audio_url_prefix: raw.audio_url_prefix,
            block_ai_scrapers: raw.block_ai_scrapers,
            static_dir: raw.static_dir.unwrap_or_else(|| PathBuf::from(STATIC_DIR)),
        }
    }
}

impl AppSettings {
    /// Parse and validate settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawAppSettings = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid application settings: {}", e)))?;
        Ok(raw.into())
    }

    /// Read settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Cannot read application settings {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Search-mode flags, with environment overrides applied.
    pub fn mode_flags(&self) -> SearchModeFlags {
        SearchModeFlags::new(self.enable_query_expansion_mode).with_env_overrides()
    }
}

/// Path of the application settings file.
pub fn app_settings_path() -> PathBuf {
    std::env::var("GURGLE_APP_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(APP_SETTINGS_PATH))
}

/// Path of the database settings file.
pub fn database_settings_path() -> PathBuf {
    std::env::var("GURGLE_DATABASE_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DATABASE_SETTINGS_PATH))
}

/// Listener address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(SERVER_PORT),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Global request rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests: u32,
    pub period_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            requests: RATE_LIMIT_REQUESTS,
            period_secs: RATE_LIMIT_PERIOD_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.enabled),
            requests: std::env::var("RATE_LIMIT_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.requests),
            period_secs: std::env::var("RATE_LIMIT_PERIOD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.period_secs),
        }
    }
}
