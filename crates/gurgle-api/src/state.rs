//! Shared application state.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{Quota, RateLimiter};

use gurgle_db::ClipRepository;
use gurgle_search::{ClipSearch, SearchModeFlags};

use crate::config::{AppSettings, RateLimitConfig};

/// Global rate limiter type (direct quota, no per-client bucketing).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<dyn ClipSearch>,
    pub clips: ClipRepository,
    pub settings: Arc<AppSettings>,
    pub mode_flags: SearchModeFlags,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    pub fn new(search: Arc<dyn ClipSearch>, clips: ClipRepository, settings: AppSettings) -> Self {
        let mode_flags = settings.mode_flags();
        Self {
            search,
            clips,
            settings: Arc::new(settings),
            mode_flags,
            rate_limiter: None,
        }
    }

    pub fn with_rate_limit(mut self, config: &RateLimitConfig) -> Self {
        self.rate_limiter = build_rate_limiter(config);
        self
    }
}

/// Limiter for `config`, or `None` when disabled or configured with zeros.
pub fn build_rate_limiter(config: &RateLimitConfig) -> Option<Arc<GlobalRateLimiter>> {
    if !config.enabled {
        return None;
    }
    let burst = NonZeroU32::new(config.requests)?;
    let quota = Quota::with_period(Duration::from_secs(config.period_secs))?.allow_burst(burst);
    Some(Arc::new(RateLimiter::direct(quota)))
}
