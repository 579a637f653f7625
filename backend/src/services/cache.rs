//! In-memory response cache with a fixed time-to-live

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// Keyed store of sanitized upstream responses
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Cached value for `key`, evicting it if expired
    pub async fn get(&self, key: &str) -> Option<Value> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(key);
        }
        None
    }

    pub async fn insert(&self, key: impl Into<String>, value: Value) {
        let expires_at = Instant::now() + self.ttl;
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Remove every expired entry, returning how many were dropped
    pub async fn prune_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_then_get() {
        tokio_test::block_on(async {
            let cache = ResponseCache::new(Duration::from_secs(60));
            cache.insert("stations", json!({"stations": []})).await;
            assert_eq!(cache.get("stations").await, Some(json!({"stations": []})));
            assert_eq!(cache.get("sensors").await, None);
        });
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        tokio_test::block_on(async {
            let cache = ResponseCache::new(Duration::ZERO);
            cache.insert("current:1", json!({"ok": true})).await;
            assert_eq!(cache.get("current:1").await, None);
            assert_eq!(cache.len().await, 0);
        });
    }

    #[test]
    fn test_prune_expired() {
        tokio_test::block_on(async {
            let cache = ResponseCache::new(Duration::ZERO);
            cache.insert("a", json!(1)).await;
            cache.insert("b", json!(2)).await;
            assert_eq!(cache.prune_expired().await, 2);
            assert_eq!(cache.len().await, 0);
        });
    }

    #[test]
    fn test_insert_overwrites() {
        tokio_test::block_on(async {
            let cache = ResponseCache::new(Duration::from_secs(60));
            cache.insert("k", json!(1)).await;
            cache.insert("k", json!(2)).await;
            assert_eq!(cache.get("k").await, Some(json!(2)));
            assert_eq!(cache.len().await, 1);
        });
    }
}
