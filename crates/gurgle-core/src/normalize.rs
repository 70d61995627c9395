//! Clip normalization: storage rows to display-ready clips.

use crate::models::{AudioFormat, Clip, ClipRow};
use crate::slug::slugify;

/// Map a raw clip row into a display-ready [`Clip`].
///
/// Pure; emits `"{key}.{ext}"` for exactly the formats flagged on the row
/// and derives `key_slug` from the key.
pub fn normalize(row: &ClipRow) -> Clip {
    let path = |format: AudioFormat| {
        row.has_format(format)
            .then(|| format!("{}.{}", row.key, format.extension()))
    };

    Clip {
        id: row.id,
        key: row.key.clone(),
        key_slug: slugify(&row.key),
        mp3_path: path(AudioFormat::Mp3),
        m4a_path: path(AudioFormat::M4a),
        m4r_path: path(AudioFormat::M4r),
        artist: row.artist.clone(),
        album: row.album.clone(),
        title: row.title.clone(),
        year: row.year,
    }
}

impl From<&ClipRow> for Clip {
    fn from(row: &ClipRow) -> Self {
        normalize(row)
    }
}

impl From<ClipRow> for Clip {
    fn from(row: ClipRow) -> Self {
        normalize(&row)
    }
}
