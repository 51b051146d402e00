//! Caching layer — the Cache Store capability and the cached dispatcher.
//!
//! The dispatcher depends only on the `CacheStore` trait so an in-memory
//! implementation can substitute for Redis in tests and cache-less deployments.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;

pub mod key;
pub mod memory;
pub mod redis;

/// Opaque key-value store with per-key expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()>;
}

/// Looks up `key`; on a hit returns the cached value without running `compute`.
/// On a miss runs `compute`, stores the successful result under `key` with
/// `ttl`, and returns it. A failed `compute` propagates and is never cached.
///
/// Cache-store failures are fail-open: logged at `warn`, then treated as a
/// miss (on read) or dropped (on write). The provider result still reaches
/// the caller when Redis is down.
pub async fn get_or_compute<T, F, Fut>(
    store: &dyn CacheStore,
    key: &str,
    ttl: Duration,
    compute: F,
) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    match store.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!(key, "cache hit");
                return Ok(value);
            }
            // Stale schema from an older deploy; recompute and overwrite.
            Err(e) => warn!(key, "discarding undecodable cache entry: {e}"),
        },
        Ok(None) => debug!(key, "cache miss"),
        Err(e) => warn!(key, "cache store unavailable, falling through to provider: {e}"),
    }

    let value = compute().await?;

    match serde_json::to_string(&value) {
        Ok(raw) => {
            if let Err(e) = store.set(key, &raw, ttl).await {
                warn!(key, "failed to write cache entry: {e}");
            }
        }
        Err(e) => warn!(key, "failed to serialize value for caching: {e}"),
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::memory::MemoryCache;
    use super::*;

    const TTL: Duration = Duration::from_secs(3600);

    /// A store whose every operation fails, standing in for an unreachable Redis.
    struct DownStore;

    #[async_trait]
    impl CacheStore for DownStore {
        async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            anyhow::bail!("connection refused")
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn test_miss_computes_and_populates() {
        let store = MemoryCache::new();
        let calls = AtomicUsize::new(0);

        let value: Vec<String> = get_or_compute(&store, "questions:abc", TTL, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["Explain ACID properties".to_string()])
        })
        .await
        .unwrap();

        assert_eq!(value, vec!["Explain ACID properties"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(store.get("questions:abc").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_hit_skips_compute() {
        let store = MemoryCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let _: Vec<String> = get_or_compute(&store, "questions:abc", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["What is connection pooling?".to_string()])
            })
            .await
            .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_compute_is_never_cached() {
        let store = MemoryCache::new();

        let result: Result<Vec<String>, AppError> =
            get_or_compute(&store, "questions:bad", TTL, || async {
                Err(AppError::Provider("upstream down".into()))
            })
            .await;

        assert!(result.is_err());
        assert!(store.get("questions:bad").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_open() {
        let store = DownStore;
        let calls = AtomicUsize::new(0);

        // Every call must reach the compute fn and still return its value.
        for _ in 0..2 {
            let value: String = get_or_compute(&store, "analysis:xyz", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("feedback".to_string())
            })
            .await
            .unwrap();
            assert_eq!(value, "feedback");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_recomputed() {
        let store = MemoryCache::new();
        store
            .set("questions:abc", "not json at all", TTL)
            .await
            .unwrap();

        let calls = AtomicUsize::new(0);
        let value: Vec<String> = get_or_compute(&store, "questions:abc", TTL, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["fresh".to_string()])
        })
        .await
        .unwrap();

        assert_eq!(value, vec!["fresh"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
