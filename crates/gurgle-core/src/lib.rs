//! # gurgle-core
//!
//! Core types, traits, and abstractions for the gurgle audio clip search.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other gurgle crates depend on:
//! - Clip records and their normalization from storage rows
//! - Search modes and search results
//! - The pagination planner used to build navigation slots
//! - The [`ClipStore`] storage abstraction

pub mod defaults;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod models;
pub mod normalize;
pub mod pagination;
pub mod slug;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use normalize::normalize;
pub use pagination::{page_offset, plan, total_pages, PageSlot, PaginationPlan};
pub use slug::slugify;
pub use traits::*;
