//! # gurgle-db
//!
//! MySQL storage layer for the gurgle clip search.
//!
//! This crate provides:
//! - Connection settings and pool management
//! - [`MySqlClipStore`], the MySQL implementation of [`ClipStore`]
//! - [`ClipRepository`] for clip detail lookups
//!
//! ## Example
//!
//! ```rust,ignore
//! use gurgle_db::{Database, DatabaseSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = DatabaseSettings::load("database_settings.json")?;
//!     let db = Database::connect(&settings).await?;
//!
//!     if let Some(clip) = db.clips.retrieve("audio/heygurgle").await? {
//!         println!("{:?}", clip.mp3_path);
//!     }
//!     Ok(())
//! }
//! ```

pub mod clips;
pub mod pool;
pub mod settings;
pub mod sql;
pub mod store;

// Test fixtures for integration tests
// Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

use std::sync::Arc;

use sqlx::mysql::MySqlPool;

// Re-export core types
pub use gurgle_core::*;

pub use clips::ClipRepository;
pub use pool::{create_pool, log_pool_metrics, PoolConfig};
pub use settings::DatabaseSettings;
pub use store::MySqlClipStore;

/// Combined database context.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: MySqlPool,
    /// Statement executor shared by search and lookups.
    pub store: Arc<MySqlClipStore>,
    /// Clip detail lookups.
    pub clips: ClipRepository,
}

impl Database {
    /// Connect using the given settings.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let pool = create_pool(settings.connect_options()?, settings.pool_config()).await?;
        Ok(Self::new(pool))
    }

    /// Wrap an existing pool.
    pub fn new(pool: MySqlPool) -> Self {
        let store = Arc::new(MySqlClipStore::new(pool.clone()));
        let clips = ClipRepository::new(store.clone());
        Self { pool, store, clips }
    }

    /// The store as a trait object, for handing to the search engine.
    pub fn clip_store(&self) -> Arc<dyn ClipStore> {
        self.store.clone()
    }

    /// Apply the bundled schema migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::StorageUnavailable(format!("Migration failed: {}", e)))
    }

    /// Close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
