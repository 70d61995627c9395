//! # gurgle-search
//!
//! Paged full-text search over audio clips.
//!
//! This crate provides:
//! - Count and fetch statements for each [`SearchMode`]
//! - The [`ClipSearchEngine`] that runs them against a [`ClipStore`]
//! - Feature flags gating the query-expansion mode
//! - Helpers turning raw request parameters into engine inputs
//!
//! ## Example
//!
//! ```ignore
//! use gurgle_search::{ClipSearchEngine, SearchMode, SearchRequest};
//! use gurgle_db::{Database, DatabaseSettings};
//!
//! let db = Database::connect(&DatabaseSettings::from_url("mysql://...")).await?;
//! let engine = ClipSearchEngine::new(db.clip_store());
//!
//! let page = SearchRequest::new("andrew")
//!     .with_mode(SearchMode::Boolean)
//!     .with_page(2)
//!     .execute(&engine)
//!     .await?;
//! ```

pub mod engine;
pub mod mode_flags;
pub mod request;
pub mod statements;

// Re-export core types
pub use gurgle_core::*;

pub use engine::{ClipSearch, ClipSearchEngine};
pub use mode_flags::{resolve_mode, ResolvedMode, SearchModeFlags};
pub use request::{parse_page, prepare_query, SearchRequest};
pub use statements::{mode_query, ModeQuery, Ordering, MODE_TABLE};
