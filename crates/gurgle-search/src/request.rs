//! Caller-side request preparation.
//!
//! The engine requires a trimmed, length-limited query and a non-negative
//! offset. These helpers turn raw request parameters into those values.

use gurgle_core::{page_offset, Result, SearchMode, SearchResult};

use crate::engine::ClipSearch;

/// Trim `raw` and truncate it to `max_length` characters.
///
/// Returns `None` when nothing is left after trimming.
pub fn prepare_query(raw: &str, max_length: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max_length).collect())
}

/// Parse the `page` parameter: missing or unparseable values are page 1,
/// and anything below 1 is clamped to 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Builder for a single page of clip search.
///
/// ```ignore
/// let result = SearchRequest::new("andrew")
///     .with_mode(SearchMode::Boolean)
///     .with_page(2)
///     .with_page_size(15)
///     .execute(&engine)
///     .await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub mode: SearchMode,
    pub page: i64,
    pub page_size: i64,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            mode: SearchMode::Natural,
            page: 1,
            page_size: gurgle_core::defaults::RESULTS_PER_PAGE,
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the 1-based page; values below 1 become 1.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Row offset of this page.
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }

    pub async fn execute(&self, engine: &dyn ClipSearch) -> Result<SearchResult> {
        engine
            .search(&self.query, self.mode, self.page_size, self.offset())
            .await
    }
}
