//! Site plumbing: robots.txt, sitemap, favicon redirect, health, fallback.

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::state::AppState;

/// Crawlers that collect training data for AI models.
pub const AI_CRAWLERS: &[&str] = &[
    "AI2Bot",
    "Amazonbot",
    "anthropic-ai",
    "Applebot-Extended",
    "Bytespider",
    "CCBot",
    "ChatGPT-User",
    "ClaudeBot",
    "Claude-Web",
    "cohere-ai",
    "Diffbot",
    "FacebookBot",
    "Google-Extended",
    "GPTBot",
    "meta-externalagent",
    "OAI-SearchBot",
    "PerplexityBot",
    "YouBot",
];

/// Public pages listed in the sitemap.
pub const SITEMAP_PAGES: &[&str] = &["/", "/about", "/help"];

/// Generated robots.txt body.
pub fn robots_body(block_ai_scrapers: bool) -> String {
    let mut body = String::new();
    if block_ai_scrapers {
        for agent in AI_CRAWLERS {
            body.push_str(&format!("User-agent: {}\nDisallow: /\n\n", agent));
        }
    }
    body.push_str("User-agent: *\nDisallow: /search\n");
    body
}

pub async fn robots_txt(State(state): State<AppState>) -> Response {
    let static_robots = state.settings.static_dir.join("robots.txt");
    let body = match tokio::fs::read_to_string(&static_robots).await {
        Ok(contents) => contents,
        Err(_) => robots_body(state.settings.block_ai_scrapers),
    };
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// Sitemap urlset for the public pages under `site_url`.
pub fn sitemap_body(site_url: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for page in SITEMAP_PAGES {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}{}</loc>\n    <changefreq>monthly</changefreq>\n  </url>\n",
            site_url, page
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

pub async fn sitemap_xml(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
        sitemap_body(&state.settings.site_url),
    )
        .into_response()
}

/// Redirect to `location` with headers that keep browsers from caching it.
pub fn redirect_no_cache(location: &str, status: StatusCode) -> Response {
    let mut response = status.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    if let Ok(value) = HeaderValue::from_str(location) {
        headers.insert(header::LOCATION, value);
    }
    response
}

pub async fn favicon() -> Response {
    redirect_no_cache("/static/favicon.ico", StatusCode::MOVED_PERMANENTLY)
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not_found" })),
    )
}
