//! Paged full-text clip search.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use gurgle_core::{ClipStore, Error, Result, SearchMode, SearchResult};

use crate::statements::mode_query;

/// Paged clip search over a full-text index.
#[async_trait]
pub trait ClipSearch: Send + Sync {
    /// Return one page of clips matching `query`.
    ///
    /// `query` must be non-blank, `page_size` positive and `offset`
    /// non-negative; violations are rejected with [`Error::InvalidInput`]
    /// before any statement is issued.
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        page_size: i64,
        offset: i64,
    ) -> Result<SearchResult>;
}

/// Search engine issuing a count then a paged fetch against a [`ClipStore`].
#[derive(Clone)]
pub struct ClipSearchEngine {
    store: Arc<dyn ClipStore>,
}

impl ClipSearchEngine {
    pub fn new(store: Arc<dyn ClipStore>) -> Self {
        Self { store }
    }

    fn validate(query: &str, page_size: i64, offset: i64) -> Result<()> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("search query must not be empty".into()));
        }
        if page_size <= 0 {
            return Err(Error::InvalidInput(format!(
                "page size must be positive, got {}",
                page_size
            )));
        }
        if offset < 0 {
            return Err(Error::InvalidInput(format!(
                "offset must not be negative, got {}",
                offset
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClipSearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipSearchEngine").finish_non_exhaustive()
    }
}

#[async_trait]
impl ClipSearch for ClipSearchEngine {
    #[instrument(skip(self), fields(
        subsystem = "search",
        component = "clip_search",
        op = "search",
        query = %query,
        search_mode = %mode,
    ))]
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        page_size: i64,
        offset: i64,
    ) -> Result<SearchResult> {
        Self::validate(query, page_size, offset)?;

        let start = Instant::now();
        let recipe = mode_query(mode);

        let total_count = match self.store.count(&recipe.count_statement(query)).await? {
            Some(total) if total > 0 => total,
            total => {
                debug!(?total, "No matches, skipping fetch");
                return Ok(SearchResult::empty());
            }
        };

        let rows = self
            .store
            .fetch(&recipe.fetch_statement(query, page_size, offset))
            .await?;

        // An offset past the last match yields no rows; report that as an
        // empty result rather than a count with nothing behind it.
        let result = if rows.is_empty() {
            SearchResult::empty()
        } else {
            let clips = rows.iter().map(gurgle_core::normalize).collect();
            SearchResult::from_clips(total_count, clips)
        };

        info!(
            total_count = result.total_count,
            result_count = result.returned_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Clip search completed"
        );

        Ok(result)
    }
}
