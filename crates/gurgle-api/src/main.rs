//! gurgle-api - HTTP API server for the gurgle clip search

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use gurgle_api::config::{app_settings_path, database_settings_path};
use gurgle_api::telemetry::{self, LogConfig};
use gurgle_api::{build_router, AppSettings, AppState, RateLimitConfig, ServerConfig};
use gurgle_db::{log_pool_metrics, Database, DatabaseSettings};
use gurgle_search::ClipSearchEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_config = LogConfig::from_env();
    let _file_guard = telemetry::init(&log_config);
    info!(
        log_json = log_config.json,
        log_file = log_config.file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let settings = AppSettings::from_file(app_settings_path())?;
    info!(
        max_query_length = settings.max_query_length,
        results_per_page = settings.results_per_page,
        enable_query_expansion_mode = settings.enable_query_expansion_mode,
        "Application settings loaded"
    );

    let db_settings = DatabaseSettings::load(database_settings_path())?;
    let db = Database::connect(&db_settings).await?;
    log_pool_metrics(&db.pool);

    let rate_limit = RateLimitConfig::from_env();
    if rate_limit.enabled {
        info!(
            requests = rate_limit.requests,
            period_secs = rate_limit.period_secs,
            "Rate limiting enabled"
        );
    }

    let search = Arc::new(ClipSearchEngine::new(db.clip_store()));
    let state = AppState::new(search, db.clips.clone(), settings).with_rate_limit(&rate_limit);
    let app = build_router(state);

    // Start server
    let server = ServerConfig::from_env();
    let addr: SocketAddr = server.addr().parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
