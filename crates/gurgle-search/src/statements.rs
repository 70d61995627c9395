//! Mode-keyed full-text statements.
//!
//! Each [`SearchMode`] maps to one row of [`MODE_TABLE`]: the `AGAINST`
//! modifier shared by its count and fetch statements, and whether the fetch
//! ranks rows by relevance. Only boolean mode ranks explicitly; natural and
//! expanded modes return rows in index order.

use gurgle_core::{SearchMode, Statement};
use gurgle_db::sql::{CLIP_COLUMNS, CLIP_SOURCE, FULLTEXT_COLUMNS};

/// Ordering applied to the paged fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    /// No ORDER BY; rows come back in index-native order.
    Storage,
    /// Project the match score and sort by it descending.
    ScoreDesc,
}

/// Statement recipe for one search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeQuery {
    pub mode: SearchMode,
    /// Text following the bound query inside `AGAINST (? ...)`.
    pub modifier: &'static str,
    pub ordering: Ordering,
}

/// One entry per mode, in code order.
pub const MODE_TABLE: [ModeQuery; 3] = [
    ModeQuery {
        mode: SearchMode::Natural,
        modifier: "IN NATURAL LANGUAGE MODE",
        ordering: Ordering::Storage,
    },
    ModeQuery {
        mode: SearchMode::Boolean,
        modifier: "IN BOOLEAN MODE",
        ordering: Ordering::ScoreDesc,
    },
    ModeQuery {
        mode: SearchMode::Expanded,
        modifier: "WITH QUERY EXPANSION",
        ordering: Ordering::Storage,
    },
];

/// Table entry for a mode.
pub fn mode_query(mode: SearchMode) -> &'static ModeQuery {
    match mode {
        SearchMode::Natural => &MODE_TABLE[0],
        SearchMode::Boolean => &MODE_TABLE[1],
        SearchMode::Expanded => &MODE_TABLE[2],
    }
}

impl ModeQuery {
    /// `MATCH (...) AGAINST (? <modifier>)`, one placeholder.
    pub fn predicate(&self) -> String {
        format!("MATCH ({}) AGAINST (? {})", FULLTEXT_COLUMNS, self.modifier)
    }

    /// Statement counting every match for `query`.
    pub fn count_statement(&self, query: &str) -> Statement {
        Statement::new(format!(
            "SELECT COUNT(c.id) AS total_count {} WHERE {}",
            CLIP_SOURCE,
            self.predicate()
        ))
        .bind_text(query)
    }

    /// Statement fetching one page of matches for `query`.
    pub fn fetch_statement(&self, query: &str, page_size: i64, offset: i64) -> Statement {
        let predicate = self.predicate();
        let statement = match self.ordering {
            Ordering::Storage => Statement::new(format!(
                "SELECT {} {} WHERE {} LIMIT ? OFFSET ?",
                CLIP_COLUMNS, CLIP_SOURCE, predicate
            ))
            .bind_text(query),
            Ordering::ScoreDesc => Statement::new(format!(
                "SELECT {}, {} AS score {} WHERE {} ORDER BY score DESC LIMIT ? OFFSET ?",
                CLIP_COLUMNS, predicate, CLIP_SOURCE, predicate
            ))
            .bind_text(query)
            .bind_text(query),
        };
        statement.bind_int(page_size).bind_int(offset)
    }
}
