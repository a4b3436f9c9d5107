//! Short-lived in-memory cache for provider fragments.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<F> {
    fragment: F,
    stored_at: Instant,
}

/// Fragments for one provider slot keyed by normalized location.
///
/// Entries younger than `fresh_ttl` replace a fetch outright. Entries younger
/// than `stale_ttl` are only served after a fetch failed.
#[derive(Debug, Clone)]
pub struct SignalCache<F> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<F>>>>,
    fresh_ttl: Duration,
    stale_ttl: Duration,
}

impl<F: Clone> SignalCache<F> {
    pub fn new(fresh_ttl: Duration, stale_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            fresh_ttl,
            stale_ttl: stale_ttl.max(fresh_ttl),
        }
    }

    fn is_disabled(&self) -> bool {
        self.stale_ttl == Duration::ZERO
    }

    pub async fn fresh(&self, key: &str) -> Option<F> {
        self.younger_than(key, self.fresh_ttl).await
    }

    pub async fn stale(&self, key: &str) -> Option<F> {
        self.younger_than(key, self.stale_ttl).await
    }

    /// Stores `fragment` and drops every entry past the stale window.
    pub async fn put(&self, key: impl Into<String>, fragment: F) {
        if self.is_disabled() {
            return;
        }
        let stale_ttl = self.stale_ttl;
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < stale_ttl);
        entries.insert(key.into(), CacheEntry { fragment, stored_at: Instant::now() });
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn younger_than(&self, key: &str, ttl: Duration) -> Option<F> {
        if ttl == Duration::ZERO {
            return None;
        }
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < ttl)
            .map(|entry| entry.fragment.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SignalCache;

    #[tokio::test(start_paused = true)]
    async fn fresh_entries_turn_stale_then_expire() {
        let cache = SignalCache::new(Duration::from_secs(300), Duration::from_secs(1800));
        cache.put("pune", 31.5_f64).await;

        assert_eq!(cache.fresh("pune").await, Some(31.5));

        tokio::time::advance(Duration::from_secs(301)).await;
        assert_eq!(cache.fresh("pune").await, None);
        assert_eq!(cache.stale("pune").await, Some(31.5));

        tokio::time::advance(Duration::from_secs(1500)).await;
        assert_eq!(cache.stale("pune").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn put_evicts_entries_past_the_stale_window() {
        let cache = SignalCache::new(Duration::from_secs(300), Duration::from_secs(1800));
        for district in ["pune", "nashik", "nagpur"] {
            cache.put(district, 1_u8).await;
        }
        assert_eq!(cache.len().await, 3);

        tokio::time::advance(Duration::from_secs(1801)).await;
        cache.put("indore", 2_u8).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.fresh("indore").await, Some(2));
        assert_eq!(cache.stale("pune").await, None);
    }

    #[tokio::test]
    async fn zero_ttl_cache_stores_nothing() {
        let cache = SignalCache::new(Duration::ZERO, Duration::ZERO);
        cache.put("pune", 1_u8).await;

        assert_eq!(cache.len().await, 0);
        assert_eq!(cache.stale("pune").await, None);
    }

    #[tokio::test]
    async fn overwrite_replaces_fragment() {
        let cache = SignalCache::new(Duration::from_secs(60), Duration::from_secs(120));
        cache.put("nashik", "first").await;
        cache.put("nashik", "second").await;

        assert_eq!(cache.fresh("nashik").await, Some("second"));
        assert_eq!(cache.fresh("nagpur").await, None);
    }
}
