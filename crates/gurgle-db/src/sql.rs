//! Shared SQL fragments for the `clips`/`tags` schema.

/// Clip and tag columns projected by every clip-returning statement.
pub const CLIP_COLUMNS: &str =
    "c.id, c.key, c.mp3, c.m4a, c.m4r, t.artist, t.album, t.title, t.year";

/// Clip relation joined with its tag metadata.
pub const CLIP_SOURCE: &str = "FROM clips c JOIN tags t ON t.clip_id = c.id";

/// Columns covered by the full-text index.
pub const FULLTEXT_COLUMNS: &str = "t.title, t.album, t.artist";
