//! # gurgle-api
//!
//! HTTP surface for the gurgle clip search: paged full-text search, clip
//! lookups by key, and the site plumbing routes (robots.txt, sitemap,
//! favicon, health).

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use config::{AppSettings, RateLimitConfig, ServerConfig};
pub use error::ApiError;
pub use state::AppState;

use handlers::{clip, search, site};
use middleware::{handle_panic, rate_limit_middleware, MakeRequestUuidV7};

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search::search_clips))
        .route("/clip", get(clip::clip_info))
        .route("/robots.txt", get(site::robots_txt))
        .route("/sitemap.xml", get(site::sitemap_xml))
        .route("/favicon.ico", get(site::favicon))
        .route("/health", get(site::health_check))
        .fallback(site::not_found)
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .with_state(state)
}
