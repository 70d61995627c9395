//! `GET /clip`.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use gurgle_core::defaults::CLIP_KEY_MAX_LENGTH;
use gurgle_core::Clip;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ClipParams {
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClipResponse {
    pub clip_key: String,
    pub audio_url_prefix: Option<String>,
    pub clip: Clip,
}

/// Trimmed key limited to [`CLIP_KEY_MAX_LENGTH`] characters, or `None` if blank.
pub fn prepare_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(CLIP_KEY_MAX_LENGTH).collect())
}

pub async fn clip_info(
    State(state): State<AppState>,
    Query(params): Query<ClipParams>,
) -> Result<Json<ClipResponse>, ApiError> {
    let key = params
        .key
        .as_deref()
        .and_then(prepare_key)
        .ok_or_else(|| ApiError::BadRequest("No clip key was provided".to_string()))?;

    let clip = state
        .clips
        .retrieve(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Clip not found: {}", key)))?;

    Ok(Json(ClipResponse {
        clip_key: key,
        audio_url_prefix: state.settings.audio_url_prefix.clone(),
        clip,
    }))
}
