//! Domain models for clips and search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// =============================================================================
// SEARCH MODE
// =============================================================================

/// Full-text matching strategy applied to the tag corpus (title, album, artist).
///
/// The numeric codes are the values accepted on the wire (`mode=1|2|3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Plain natural-language relevance matching.
    #[default]
    Natural,
    /// Explicit boolean operators (`+`, `-`, `"..."`, `*`), ranked by score.
    Boolean,
    /// Natural-language matching with blind query expansion.
    Expanded,
}

impl SearchMode {
    /// All modes in code order.
    pub const ALL: [SearchMode; 3] = [
        SearchMode::Natural,
        SearchMode::Boolean,
        SearchMode::Expanded,
    ];

    /// Wire code for this mode.
    pub fn code(self) -> u8 {
        match self {
            SearchMode::Natural => 1,
            SearchMode::Boolean => 2,
            SearchMode::Expanded => 3,
        }
    }

    /// Look up a mode by its wire code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(SearchMode::Natural),
            2 => Some(SearchMode::Boolean),
            3 => Some(SearchMode::Expanded),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Natural => "natural",
            SearchMode::Boolean => "boolean",
            SearchMode::Expanded => "expanded",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = Error;

    /// Accepts the wire code (`"1"`) or the lowercase name (`"natural"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return SearchMode::from_code(code)
                .ok_or_else(|| Error::InvalidInput(format!("Unknown search mode code: {}", code)));
        }
        SearchMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown search mode: {}", s)))
    }
}

// =============================================================================
// CLIPS
// =============================================================================

/// Audio encodings a clip may be published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    /// MPEG-1 Audio Layer III.
    Mp3,
    /// AAC in an MPEG-4 container.
    M4a,
    /// AAC in an iPhone ringtone container.
    M4r,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 3] = [AudioFormat::Mp3, AudioFormat::M4a, AudioFormat::M4r];

    /// File extension, also the storage column holding the presence flag.
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::M4r => "m4r",
        }
    }
}

/// Raw clip row as projected from `clips` joined with `tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRow {
    pub id: i64,
    pub key: String,
    pub mp3: bool,
    pub m4a: bool,
    pub m4r: bool,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
}

impl ClipRow {
    /// Presence flag for the given format.
    pub fn has_format(&self, format: AudioFormat) -> bool {
        match format {
            AudioFormat::Mp3 => self.mp3,
            AudioFormat::M4a => self.m4a,
            AudioFormat::M4r => self.m4r,
        }
    }
}

/// Display-ready clip record.
///
/// Each `*_path` is `Some("{key}.{ext}")` exactly when the matching format
/// flag was set on the source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub id: i64,
    pub key: String,
    pub key_slug: String,
    pub mp3_path: Option<String>,
    pub m4a_path: Option<String>,
    pub m4r_path: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
}

impl Clip {
    /// Path for the given format, if the clip is available in it.
    pub fn path(&self, format: AudioFormat) -> Option<&str> {
        match format {
            AudioFormat::Mp3 => self.mp3_path.as_deref(),
            AudioFormat::M4a => self.m4a_path.as_deref(),
            AudioFormat::M4r => self.m4r_path.as_deref(),
        }
    }
}

// =============================================================================
// SEARCH RESULT
// =============================================================================

/// Aggregate result of a paged clip search.
///
/// `returned_count` always equals `results.len()`; `total_count` is the full
/// match count independent of the page window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_count: i64,
    pub returned_count: usize,
    pub results: Vec<Clip>,
}

impl SearchResult {
    /// Result for a query with no matches, or a page window past the last
    /// match.
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            returned_count: 0,
            results: Vec::new(),
        }
    }

    /// Build a result from normalized clips, deriving `returned_count`.
    pub fn from_clips(total_count: i64, results: Vec<Clip>) -> Self {
        Self {
            total_count,
            returned_count: results.len(),
            results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
