//! Centralized default constants for gurgle.
//!
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// SEARCH
// =============================================================================

/// Default number of search results per page.
pub const RESULTS_PER_PAGE: i64 = 15;

/// Upper bound for the configured maximum search query length (characters).
pub const MAX_QUERY_LENGTH_CEILING: usize = 120;

/// Maximum accepted clip key length (characters).
pub const CLIP_KEY_MAX_LENGTH: usize = 254;

// =============================================================================
// DATABASE
// =============================================================================

/// Minimum pool size when pooling is enabled.
pub const DB_POOL_SIZE_MIN: u32 = 10;

/// Default connection timeout in seconds.
pub const DB_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout in seconds.
pub const DB_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default MySQL port.
pub const DB_PORT: u16 = 3306;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5000;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u32 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Default app settings file.
pub const APP_SETTINGS_PATH: &str = "app_settings.json";

/// Default database settings file.
pub const DATABASE_SETTINGS_PATH: &str = "database_settings.json";

/// Default directory for static assets (robots.txt override, favicon).
pub const STATIC_DIR: &str = "static";
