//! In-memory [`ClipStore`] for tests.
//!
//! Returns canned counts and rows and records every statement it receives,
//! so tests can assert on the SQL that was issued and how often.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::ClipRow;
use crate::traits::{ClipStore, Statement};

/// Failure the mock should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    QuerySyntax,
    StorageUnavailable,
}

impl MockFailure {
    fn to_error(self) -> Error {
        match self {
            MockFailure::QuerySyntax => Error::QuerySyntax(
                "syntax error, unexpected '+' near '+)' (mock)".to_string(),
            ),
            MockFailure::StorageUnavailable => {
                Error::StorageUnavailable("Can't connect to MySQL server (mock)".to_string())
            }
        }
    }
}

/// Which operation a recorded statement went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    Count,
    Fetch,
}

/// Recording clip store with canned responses.
#[derive(Debug, Default)]
pub struct MockClipStore {
    total_count: Option<i64>,
    rows: Vec<ClipRow>,
    count_failure: Option<MockFailure>,
    fetch_failure: Option<MockFailure>,
    calls: Mutex<Vec<(MockCall, Statement)>>,
}

impl MockClipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value returned from `count`; `None` simulates a statement with no row.
    pub fn with_count(mut self, total_count: Option<i64>) -> Self {
        self.total_count = total_count;
        self
    }

    /// Rows returned from `fetch`.
    pub fn with_rows(mut self, rows: Vec<ClipRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn failing_count(mut self, failure: MockFailure) -> Self {
        self.count_failure = Some(failure);
        self
    }

    pub fn failing_fetch(mut self, failure: MockFailure) -> Self {
        self.fetch_failure = Some(failure);
        self
    }

    /// Every statement received, in order.
    pub fn calls(&self) -> Vec<(MockCall, Statement)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// Statements received through `fetch`.
    pub fn fetch_statements(&self) -> Vec<Statement> {
        self.calls()
            .into_iter()
            .filter(|(call, _)| *call == MockCall::Fetch)
            .map(|(_, stmt)| stmt)
            .collect()
    }

    fn record(&self, call: MockCall, statement: &Statement) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((call, statement.clone()));
        }
    }
}

#[async_trait]
impl ClipStore for MockClipStore {
    async fn count(&self, statement: &Statement) -> Result<Option<i64>> {
        self.record(MockCall::Count, statement);
        match self.count_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self.total_count),
        }
    }

    async fn fetch(&self, statement: &Statement) -> Result<Vec<ClipRow>> {
        self.record(MockCall::Fetch, statement);
        match self.fetch_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self.rows.clone()),
        }
    }
}

/// Build `n` clip rows with keys `audio/Clip-{i}`.
pub fn sample_rows(n: usize) -> Vec<ClipRow> {
    (0..n)
        .map(|i| ClipRow {
            id: i as i64 + 1,
            key: format!("audio/Clip-{}", i),
            mp3: true,
            m4a: i % 2 == 0,
            m4r: false,
            artist: Some("Andrew".to_string()),
            album: None,
            title: Some(format!("Gurgle {}", i)),
            year: None,
        })
        .collect()
}
