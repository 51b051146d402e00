mod cache;
mod config;
mod errors;
mod interview;
mod llm_client;
mod rate_limit;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{HeaderValue, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::{memory::MemoryCache, redis::RedisCache, CacheStore};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::rate_limit::SlidingWindow;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", default_log_target(), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the cache store: Redis when configured, in-memory otherwise
    let cache: Arc<dyn CacheStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Redis cache store initialized");
            Arc::new(RedisCache::new(client))
        }
        None => {
            info!("REDIS_URL not set, using in-process cache store");
            Arc::new(MemoryCache::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize rate limiter
    let limiter = Arc::new(SlidingWindow::new(
        config.rate_limit_max,
        config.rate_limit_window,
    ));
    info!(
        "Rate limit: {} requests per {:?} per client",
        config.rate_limit_max, config.rate_limit_window
    );

    // Build app state
    let state = AppState {
        cache,
        llm,
        limiter,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Default filter directive target. Tracing targets in this binary are rooted
/// at the bin crate name, which can differ from the package name.
fn default_log_target() -> String {
    env!("CARGO_BIN_NAME").replace('-', "_")
}

/// Builds the CORS layer from the configured origin allowlist.
/// An empty allowlist means permissive, which suits local development.
fn build_cors_layer(config: &Config) -> Result<CorsLayer> {
    if config.allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_target_matches_crate_root() {
        // Every tracing target in this binary starts with this crate root;
        // the default directive must address it or nothing is logged.
        let crate_root = module_path!().split("::").next().unwrap();
        assert_eq!(default_log_target(), crate_root);
    }
}
