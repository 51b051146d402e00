//! In-process cache store. Used by tests and by deployments without Redis.
//! Expired entries are dropped lazily on read.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;

use super::CacheStore;

struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .insert(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let cache = MemoryCache::new();
        cache
            .set("questions:k", "[\"q1\"]", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            cache.get("questions:k").await.unwrap().as_deref(),
            Some("[\"q1\"]")
        );
    }

    #[tokio::test]
    async fn test_expired_entry_is_ignored() {
        let cache = MemoryCache::new();
        cache
            .set("questions:k", "[\"q1\"]", Duration::ZERO)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(cache.get("questions:k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite_is_last_write_wins() {
        let cache = MemoryCache::new();
        cache
            .set("k", "old", Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .set("k", "new", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("new"));
    }
}
