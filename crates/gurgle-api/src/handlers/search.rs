//! `GET /search`.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{header::HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use gurgle_core::{plan, total_pages, Clip, PageSlot};
use gurgle_search::{parse_page, prepare_query, resolve_mode, SearchRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// Search results must stay out of crawler indexes.
pub const X_ROBOTS_TAG: HeaderName = HeaderName::from_static("x-robots-tag");
pub const NOINDEX_NOFOLLOW: HeaderValue = HeaderValue::from_static("noindex, nofollow");

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub mode: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_query: String,
    /// Numeric mode code actually used.
    pub search_mode: u8,
    pub valid_search_mode: bool,
    pub current_page: i64,
    pub results_per_page: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub returned_count: usize,
    /// Navigation slots, gaps as `null`; `null` when there are no pages.
    pub pagination: Option<Vec<PageSlot>>,
    pub audio_url_prefix: Option<String>,
    pub results: Vec<Clip>,
}

pub async fn search_clips(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let mut response = match run_search(&state, params).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => err.into_response(),
    };
    response.headers_mut().insert(X_ROBOTS_TAG, NOINDEX_NOFOLLOW);
    response
}

async fn run_search(state: &AppState, params: SearchParams) -> Result<SearchResponse, ApiError> {
    let start = Instant::now();
    let settings = &state.settings;

    let query = params
        .query
        .as_deref()
        .and_then(|q| prepare_query(q, settings.max_query_length))
        .ok_or_else(|| ApiError::BadRequest("No search query was provided".to_string()))?;
    let page = parse_page(params.page.as_deref());
    let resolved = resolve_mode(params.mode.as_deref(), &state.mode_flags);

    let request = SearchRequest::new(query.as_str())
        .with_mode(resolved.mode)
        .with_page(page)
        .with_page_size(settings.results_per_page);
    let result = request.execute(state.search.as_ref()).await?;

    let pages = total_pages(result.total_count, settings.results_per_page);
    info!(
        subsystem = "api",
        component = "search",
        op = "search",
        query = %query,
        search_mode = %resolved.mode,
        page,
        total_count = result.total_count,
        result_count = result.returned_count,
        duration_ms = start.elapsed().as_millis() as u64,
        "Search request served"
    );

    Ok(SearchResponse {
        search_query: query,
        search_mode: resolved.mode.code(),
        valid_search_mode: resolved.valid,
        current_page: page,
        results_per_page: settings.results_per_page,
        total_count: result.total_count,
        total_pages: pages,
        returned_count: result.returned_count,
        pagination: plan(page, pages),
        audio_url_prefix: settings.audio_url_prefix.clone(),
        results: result.results,
    })
}
