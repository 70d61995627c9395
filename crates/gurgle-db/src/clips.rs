//! Clip detail lookup by key.

use std::sync::Arc;

use tracing::debug;

use gurgle_core::{normalize, Clip, ClipStore, Result, Statement};

use crate::sql::{CLIP_COLUMNS, CLIP_SOURCE};

/// Repository for single-clip lookups.
#[derive(Clone)]
pub struct ClipRepository {
    store: Arc<dyn ClipStore>,
}

impl ClipRepository {
    pub fn new(store: Arc<dyn ClipStore>) -> Self {
        Self { store }
    }

    /// Statement selecting the clip with the given key.
    pub fn lookup_statement(key: &str) -> Statement {
        Statement::new(format!(
            "SELECT {} {} WHERE c.key = ? LIMIT 1",
            CLIP_COLUMNS, CLIP_SOURCE
        ))
        .bind_text(key)
    }

    /// Retrieve clip information for a key.
    ///
    /// An empty key returns `Ok(None)` without querying storage.
    pub async fn retrieve(&self, key: &str) -> Result<Option<Clip>> {
        if key.is_empty() {
            return Ok(None);
        }

        let rows = self.store.fetch(&Self::lookup_statement(key)).await?;
        let clip = rows.first().map(normalize);

        debug!(
            subsystem = "database",
            component = "clip_repository",
            op = "retrieve",
            clip_key = key,
            found = clip.is_some(),
            "Clip lookup complete"
        );
        Ok(clip)
    }
}
