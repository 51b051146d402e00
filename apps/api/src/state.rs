use std::sync::Arc;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::rate_limit::SlidingWindow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Cache store behind the capability trait: Redis in production,
    /// in-memory when no REDIS_URL is configured and in tests.
    pub cache: Arc<dyn CacheStore>,
    pub llm: LlmClient,
    pub limiter: Arc<SlidingWindow>,
    pub config: Config,
}
