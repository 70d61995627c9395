//! Storage abstraction consumed by the search engine and clip lookup.
//!
//! The core never talks to a database directly. It builds parameterized
//! [`Statement`]s and hands them to a [`ClipStore`], which makes the engine
//! testable against an in-memory store.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ClipRow;

// =============================================================================
// STATEMENTS
// =============================================================================

/// Type-safe parameter binding for SQL statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    /// Text parameter (search query, clip key).
    Text(String),
    /// Integer parameter (limit, offset).
    Int(i64),
}

/// A parameterized SQL statement with `?` placeholders bound in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append a text parameter.
    pub fn bind_text(mut self, value: impl Into<String>) -> Self {
        self.params.push(QueryParam::Text(value.into()));
        self
    }

    /// Append an integer parameter.
    pub fn bind_int(mut self, value: i64) -> Self {
        self.params.push(QueryParam::Int(value));
        self
    }

    /// Number of `?` placeholders in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

// =============================================================================
// CLIP STORE
// =============================================================================

/// Executes clip statements against a full-text indexed clip/tag relation.
///
/// Implementations classify failures into [`Error::QuerySyntax`] and
/// [`Error::StorageUnavailable`] and never surface raw driver errors.
///
/// [`Error::QuerySyntax`]: crate::Error::QuerySyntax
/// [`Error::StorageUnavailable`]: crate::Error::StorageUnavailable
#[async_trait]
pub trait ClipStore: Send + Sync {
    /// Run a statement projecting a single `total_count` column.
    ///
    /// Returns `None` if the statement produced no row.
    async fn count(&self, statement: &Statement) -> Result<Option<i64>>;

    /// Run a statement projecting clip and tag columns, preserving row order.
    async fn fetch(&self, statement: &Statement) -> Result<Vec<ClipRow>>;
}
