//! Router tests driven in-process against the mock clip store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use gurgle_api::{build_router, AppSettings, AppState, RateLimitConfig};
use gurgle_core::mock::{sample_rows, MockCall, MockClipStore, MockFailure};
use gurgle_core::{ClipRow, QueryParam};
use gurgle_db::ClipRepository;
use gurgle_search::ClipSearchEngine;

fn settings() -> AppSettings {
    AppSettings {
        max_query_length: 20,
        site_url: "https://search.marsupialgurgle.com".to_string(),
        static_dir: "/nonexistent/static".into(),
        ..AppSettings::default()
    }
}

fn state_with(store: MockClipStore, settings: AppSettings) -> (AppState, Arc<MockClipStore>) {
    let store = Arc::new(store);
    let search = Arc::new(ClipSearchEngine::new(store.clone()));
    let clips = ClipRepository::new(store.clone());
    (AppState::new(search, clips, settings), store)
}

fn app(store: MockClipStore) -> (Router, Arc<MockClipStore>) {
    let (state, store) = state_with(store, settings());
    (build_router(state), store)
}

async fn get(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let (status, headers, body) = get(router, uri).await;
    (status, headers, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_search_first_page() {
    let (router, store) = app(
        MockClipStore::new()
            .with_count(Some(42))
            .with_rows(sample_rows(15)),
    );

    let (status, headers, body) = get_json(router, "/search?query=andrew").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-robots-tag"], "noindex, nofollow");
    assert_eq!(body["search_query"], "andrew");
    assert_eq!(body["search_mode"], 1);
    assert_eq!(body["valid_search_mode"], true);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["results_per_page"], 15);
    assert_eq!(body["total_count"], 42);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["returned_count"], 15);
    assert_eq!(body["pagination"], serde_json::json!([1, 2, 3]));
    assert_eq!(body["results"].as_array().unwrap().len(), 15);
    assert_eq!(body["results"][0]["key_slug"], "audio-clip-0");
    assert_eq!(body["results"][0]["mp3_path"], "audio/Clip-0.mp3");

    assert_eq!(store.call_count(), 2);
}

#[tokio::test]
async fn test_search_page_offset_and_gaps() {
    let (router, store) = app(
        MockClipStore::new()
            .with_count(Some(300))
            .with_rows(sample_rows(15)),
    );

    let (status, _, body) = get_json(router, "/search?query=andrew&page=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], 5);
    assert_eq!(body["total_pages"], 20);
    assert_eq!(
        body["pagination"],
        serde_json::json!([1, 2, null, 5, null, 19, 20])
    );

    let fetch = &store.fetch_statements()[0];
    assert_eq!(fetch.params[fetch.params.len() - 1], QueryParam::Int(60));
}

#[tokio::test]
async fn test_search_page_far_past_end() {
    let (router, store) = app(MockClipStore::new().with_count(Some(42)));

    let (status, _, body) =
        get_json(router, "/search?query=andrew&page=9223372036854775807").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], i64::MAX);
    assert_eq!(body["total_count"], 0);
    assert_eq!(body["total_pages"], 0);
    assert_eq!(body["returned_count"], 0);
    assert_eq!(body["pagination"], Value::Null);
    assert_eq!(body["results"], serde_json::json!([]));

    let fetch = &store.fetch_statements()[0];
    assert_eq!(fetch.params[fetch.params.len() - 1], QueryParam::Int(i64::MAX));
}

#[tokio::test]
async fn test_search_trims_and_truncates_query() {
    let (router, store) = app(MockClipStore::new().with_count(Some(0)));

    let (status, _, body) =
        get_json(router, "/search?query=%20%20abcdefghijklmnopqrstuvwxyz%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_query"], "abcdefghijklmnopqrst");
    assert_eq!(body["total_count"], 0);
    assert_eq!(body["pagination"], Value::Null);

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, MockCall::Count);
    assert_eq!(
        calls[0].1.params,
        vec![QueryParam::Text("abcdefghijklmnopqrst".to_string())]
    );
}

#[tokio::test]
async fn test_search_missing_query() {
    for uri in ["/search", "/search?query=", "/search?query=%20%20"] {
        let (router, store) = app(MockClipStore::new());
        let (status, headers, body) = get_json(router, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "No search query was provided");
        assert_eq!(headers["x-robots-tag"], "noindex, nofollow");
        assert_eq!(store.call_count(), 0);
    }
}

#[tokio::test]
async fn test_search_invalid_mode_and_page() {
    let (router, store) = app(MockClipStore::new().with_count(Some(0)));

    let (status, _, body) = get_json(router, "/search?query=andrew&mode=9&page=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_mode"], 1);
    assert_eq!(body["valid_search_mode"], false);
    assert_eq!(body["current_page"], 1);
    assert!(store.calls()[0].1.sql.contains("IN NATURAL LANGUAGE MODE"));
}

#[tokio::test]
async fn test_search_boolean_mode() {
    let (router, store) = app(
        MockClipStore::new()
            .with_count(Some(1))
            .with_rows(sample_rows(1)),
    );

    let (status, _, body) = get_json(router, "/search?query=%2Bluke%20-chris&mode=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_mode"], 2);
    assert_eq!(body["search_query"], "+luke -chris");
    assert!(store.fetch_statements()[0].sql.contains("ORDER BY score DESC"));
}

#[tokio::test]
async fn test_search_expanded_mode_gated() {
    let (router, store) = app(MockClipStore::new().with_count(Some(0)));
    let (_, _, body) = get_json(router, "/search?query=gobble&mode=3").await;
    assert_eq!(body["search_mode"], 1);
    assert_eq!(body["valid_search_mode"], false);
    assert!(store.calls()[0].1.sql.contains("IN NATURAL LANGUAGE MODE"));

    let enabled = AppSettings {
        enable_query_expansion_mode: true,
        ..settings()
    };
    let (state, store) = state_with(MockClipStore::new().with_count(Some(0)), enabled);
    let (_, _, body) = get_json(build_router(state), "/search?query=gobble&mode=3").await;
    assert_eq!(body["search_mode"], 3);
    assert_eq!(body["valid_search_mode"], true);
    assert!(store.calls()[0].1.sql.contains("WITH QUERY EXPANSION"));
}

#[tokio::test]
async fn test_search_failures() {
    let (router, _) = app(MockClipStore::new().failing_count(MockFailure::QuerySyntax));
    let (status, _, body) = get_json(router, "/search?query=%2B(&mode=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "search_error");
    assert_eq!(body["code"], "query_syntax_error");

    let (router, _) = app(
        MockClipStore::new()
            .with_count(Some(3))
            .failing_fetch(MockFailure::StorageUnavailable),
    );
    let (status, headers, body) = get_json(router, "/search?query=andrew").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "storage_unavailable");
    assert_eq!(headers["x-robots-tag"], "noindex, nofollow");
}

#[tokio::test]
async fn test_clip_found() {
    let row = ClipRow {
        id: 7,
        key: "audio/lukeandrewheygorgle-3171".to_string(),
        mp3: true,
        m4a: true,
        m4r: false,
        artist: Some("Luke Andrew".to_string()),
        title: Some("Hey Gorgle".to_string()),
        ..ClipRow::default()
    };
    let (router, store) = app(MockClipStore::new().with_rows(vec![row]));

    let (status, _, body) =
        get_json(router, "/clip?key=%20audio/lukeandrewheygorgle-3171%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clip_key"], "audio/lukeandrewheygorgle-3171");
    assert_eq!(body["clip"]["key_slug"], "audio-lukeandrewheygorgle-3171");
    assert_eq!(body["clip"]["m4a_path"], "audio/lukeandrewheygorgle-3171.m4a");
    assert_eq!(body["clip"]["m4r_path"], Value::Null);
    assert_eq!(
        store.fetch_statements()[0].params,
        vec![QueryParam::Text("audio/lukeandrewheygorgle-3171".to_string())]
    );
}

#[tokio::test]
async fn test_clip_missing_and_unknown() {
    let (router, store) = app(MockClipStore::new());
    let (status, _, _) = get_json(router, "/clip").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.call_count(), 0);

    let (router, _) = app(MockClipStore::new());
    let (status, _, body) = get_json(router, "/clip?key=audio/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("audio/nope"));
}

#[tokio::test]
async fn test_clip_storage_failure() {
    let (router, _) = app(MockClipStore::new().failing_fetch(MockFailure::StorageUnavailable));
    let (status, _, body) = get_json(router, "/clip?key=audio/heygurgle").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "storage_unavailable");
}

#[tokio::test]
async fn test_robots_generated() {
    let (router, _) = app(MockClipStore::new());
    let (status, headers, body) = get(router, "/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("Disallow: /search"));
    assert!(!body.contains("GPTBot"));

    let blocking = AppSettings {
        block_ai_scrapers: true,
        ..settings()
    };
    let (state, _) = state_with(MockClipStore::new(), blocking);
    let (_, _, body) = get(build_router(state), "/robots.txt").await;
    assert!(String::from_utf8(body).unwrap().contains("User-agent: GPTBot"));
}

#[tokio::test]
async fn test_robots_static_file_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("robots.txt"), "User-agent: *\nAllow: /\n").unwrap();
    let static_settings = AppSettings {
        static_dir: dir.path().to_path_buf(),
        ..settings()
    };
    let (state, _) = state_with(MockClipStore::new(), static_settings);

    let (status, _, body) = get(build_router(state), "/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "User-agent: *\nAllow: /\n");
}

#[tokio::test]
async fn test_sitemap() {
    let (router, _) = app(MockClipStore::new());
    let (status, headers, body) = get(router, "/sitemap.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/xml; charset=utf-8");
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("?xml"));
    assert!(body.contains("urlset"));
    assert!(body.contains("changefreq"));
    assert!(body.contains("<loc>https://search.marsupialgurgle.com/</loc>"));
}

#[tokio::test]
async fn test_favicon_redirect() {
    let (router, _) = app(MockClipStore::new());
    let (status, headers, _) = get(router, "/favicon.ico").await;
    assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(headers[header::LOCATION], "/static/favicon.ico");
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers[header::EXPIRES], "0");
}

#[tokio::test]
async fn test_health_and_request_id() {
    let (router, _) = app(MockClipStore::new());
    let (status, headers, body) = get_json(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route() {
    let (router, _) = app(MockClipStore::new());
    let (status, _, body) = get_json(router, "/bad-url").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_rate_limit() {
    let (state, _) = state_with(MockClipStore::new(), settings());
    let state = state.with_rate_limit(&RateLimitConfig {
        enabled: true,
        requests: 1,
        period_secs: 3600,
    });
    let router = build_router(state);

    let (status, _, _) = get(router.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, body) = get_json(router, "/health").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "rate_limit_exceeded");
}
