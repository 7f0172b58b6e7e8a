use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::InternalError;

const DEFAULT_CAPACITY: usize = 256;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub entries: usize,
}

/// Read-through cache of rendered view payloads
///
/// Entries are stored as serialized JSON keyed by resource path. Mutations
/// invalidate affected paths synchronously, before their response is sent,
/// so a reader never sees a page older than the last completed write.
///
/// Every invalidation bumps a generation counter under the entries lock. A
/// load that started before an invalidation is returned to its caller but
/// never stored.
pub struct PageCache {
    entries: RwLock<LruCache<String, String>>,
    generation: AtomicU64,
    stats: RwLock<CacheStats>,
}

impl PageCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            generation: AtomicU64::new(0),
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// Cached value for `key`, if present and decodable
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        // LruCache::get updates recency, so even reads take the write lock
        let cached = self.entries.write().get(key).cloned();

        let value = cached.and_then(|json| match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Dropping undecodable cache entry");
                self.entries.write().pop(key);
                None
            }
        });

        let mut stats = self.stats.write();
        if value.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        value
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                self.entries.write().put(key.to_string(), json);
            }
            Err(e) => tracing::warn!(key, error = %e, "Value not cached"),
        }
    }

    /// Store `value` only if no invalidation happened since `generation`
    fn put_if_current<T: Serialize>(&self, key: &str, value: &T, generation: u64) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "Value not cached");
                return;
            }
        };

        let mut entries = self.entries.write();
        if self.generation.load(Ordering::Acquire) != generation {
            tracing::debug!(key, "Invalidated during load, not cached");
            return;
        }
        entries.put(key.to_string(), json);
    }

    /// Return the cached value or load, cache and return a fresh one
    pub async fn get_or_load<T, F, Fut>(&self, key: &str, load: F) -> Result<T, InternalError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, InternalError>>,
    {
        if let Some(value) = self.get(key) {
            tracing::trace!(key, "Page cache hit");
            return Ok(value);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let value = load().await?;
        self.put_if_current(key, &value, generation);
        Ok(value)
    }

    pub fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        let removed = entries.pop(key).is_some();
        drop(entries);

        if removed {
            self.stats.write().invalidations += 1;
            tracing::debug!(key, "Page cache entry invalidated");
        }
    }

    /// Drop every entry whose key starts with `prefix`
    pub fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        let stale: Vec<String> = entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            entries.pop(key);
        }
        drop(entries);

        if !stale.is_empty() {
            self.stats.write().invalidations += stale.len() as u64;
            tracing::debug!(prefix, removed = stale.len(), "Page cache prefix invalidated");
        }
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        entries.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains(key)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.read().len(),
            ..*self.stats.read()
        }
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_load_caches_value() {
        let cache = PageCache::default();

        let first: Vec<String> = cache
            .get_or_load("/dashboard/registros", || async {
                Ok::<_, InternalError>(vec!["Ana".to_string()])
            })
            .await
            .unwrap();
        let second: Vec<String> = cache
            .get_or_load("/dashboard/registros", || async {
                Ok::<_, InternalError>(vec!["should not load".to_string()])
            })
            .await
            .unwrap();

        assert_eq!(first, second);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = PageCache::default();

        let result: Result<u32, _> = cache
            .get_or_load("/dashboard", || async {
                Err::<u32, _>(InternalError::parse("test", "boom"))
            })
            .await;

        assert!(result.is_err());
        assert!(!cache.contains("/dashboard"));
    }

    #[tokio::test]
    async fn test_invalidation_during_load_is_not_overwritten() {
        let cache = PageCache::default();
        let key = "/dashboard/registros";

        let first: u32 = cache
            .get_or_load(key, || async {
                cache.invalidate(key);
                Ok::<_, InternalError>(1)
            })
            .await
            .unwrap();
        assert_eq!(first, 1);
        assert!(!cache.contains(key));

        let second: u32 = cache
            .get_or_load(key, || async { Ok::<_, InternalError>(2) })
            .await
            .unwrap();
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_prefix_invalidation_during_load_is_not_overwritten() {
        let cache = PageCache::default();
        let key = "/dashboard/reportes?status=&priority=";

        let _: u32 = cache
            .get_or_load(key, || async {
                cache.invalidate_prefix("/dashboard/reportes");
                Ok::<_, InternalError>(1)
            })
            .await
            .unwrap();

        assert!(!cache.contains(key));
    }

    #[test]
    fn test_invalidate_exact_key() {
        let cache = PageCache::default();
        cache.put("/dashboard/registros", &1u32);
        cache.put("/dashboard/registros/abc", &2u32);

        cache.invalidate("/dashboard/registros");

        assert!(!cache.contains("/dashboard/registros"));
        assert!(cache.contains("/dashboard/registros/abc"));
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_invalidate_prefix() {
        let cache = PageCache::default();
        cache.put("/dashboard/reportes?status=&priority=", &1u32);
        cache.put("/dashboard/reportes?status=Pendiente&priority=", &2u32);
        cache.put("/dashboard", &3u32);

        cache.invalidate_prefix("/dashboard/reportes");

        assert_eq!(cache.stats().entries, 1);
        assert!(cache.contains("/dashboard"));
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache = PageCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("a", &1u32);
        cache.put("b", &2u32);
        let _: Option<u32> = cache.get("a");
        cache.put("c", &3u32);

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_type_mismatch_counts_as_miss() {
        let cache = PageCache::default();
        cache.put("/dashboard", &"text");

        let value: Option<u32> = cache.get("/dashboard");
        assert!(value.is_none());
        assert!(!cache.contains("/dashboard"));
    }
}
