// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;

use kton_sdk_config::CacheConfig;

use super::clock::{Clock, SystemClock};
use super::precision;
use super::store::KeyValueStore;
use super::CacheError;

/// One persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Milliseconds since the epoch.
    pub created_at: u64,
    /// Lifetime in milliseconds.
    pub ttl: u64,
    /// Value encoded with [`precision::encode`].
    pub payload: String,
}

impl CacheEntry {
    /// Fresh while strictly less than `ttl` milliseconds old.
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at) < self.ttl
    }
}

/// Namespaced TTL cache.
///
/// Concurrent misses on the same key are not coalesced: each caller runs its
/// own computation and the last write wins.
pub struct TtlCache<K, C = SystemClock> {
    store: K,
    clock: C,
    prefix: String,
    default_ttl_ms: u64,
}

impl<K: KeyValueStore> TtlCache<K, SystemClock> {
    pub fn new(store: K, config: &CacheConfig) -> Self {
        Self::with_clock(store, SystemClock, &config.prefix, config.ttl_ms)
    }
}

impl<K: KeyValueStore, C: Clock> TtlCache<K, C> {
    pub fn with_clock(store: K, clock: C, prefix: &str, default_ttl_ms: u64) -> Self {
        Self {
            store,
            clock,
            prefix: prefix.to_string(),
            default_ttl_ms,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn default_ttl_ms(&self) -> u64 {
        self.default_ttl_ms
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// The prefix followed by the first `-` segment of the logical key:
    /// `network-cache-payouts-EQabc` → `network-cache-payouts`.
    pub fn key_group(&self, full_key: &str) -> String {
        let logical = full_key.strip_prefix(&self.prefix).unwrap_or(full_key);
        let head = logical.split('-').next().unwrap_or_default();
        self.full_key(head)
    }

    /// Read a raw entry. Unparsable records count as absent.
    fn entry(&self, full_key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let Some(text) = self.store.get(full_key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(key = %full_key, error = %e, "Ignoring corrupt cache entry");
                Ok(None)
            }
        }
    }

    fn fresh_value<T: DeserializeOwned>(&self, full_key: &str) -> Result<Option<T>, CacheError> {
        let Some(entry) = self.entry(full_key)? else {
            return Ok(None);
        };
        if !entry.is_fresh(self.clock.now_ms()) {
            return Ok(None);
        }
        match precision::decode(&entry.payload) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key = %full_key, error = %e, "Ignoring undecodable cache payload");
                Ok(None)
            }
        }
    }

    fn save<T: Serialize>(
        &self,
        full_key: &str,
        value: &T,
        ttl_ms: Option<u64>,
    ) -> Result<(), CacheError> {
        let entry = CacheEntry {
            created_at: self.clock.now_ms(),
            ttl: ttl_ms.unwrap_or(self.default_ttl_ms),
            payload: precision::encode(value)?,
        };
        self.store.set(full_key, &serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Return the cached value for `key` while it is fresh, otherwise run
    /// `compute`, store its result for `ttl_ms` (or the default) and return
    /// it. A failed computation stores nothing.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        ttl_ms: Option<u64>,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let full_key = self.full_key(key);
        if let Some(value) = self.fresh_value(&full_key)? {
            tracing::debug!(key = %full_key, "Cache hit");
            return Ok(value);
        }
        tracing::debug!(key = %full_key, "Cache miss");
        let value = compute().await?;
        self.save(&full_key, &value, ttl_ms)?;
        Ok(value)
    }

    /// Run `compute` regardless of any cached value and store the result.
    pub async fn refresh<T, E, F, Fut>(
        &self,
        key: &str,
        ttl_ms: Option<u64>,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let full_key = self.full_key(key);
        let value = compute().await?;
        self.save(&full_key, &value, ttl_ms)?;
        tracing::debug!(key = %full_key, "Cache refreshed");
        Ok(value)
    }

    /// Store `value` under `key` directly.
    pub fn insert<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_ms: Option<u64>,
    ) -> Result<(), CacheError> {
        self.save(&self.full_key(key), value, ttl_ms)
    }

    /// Whether `key` has no fresh entry.
    pub fn needs_update(&self, key: &str) -> Result<bool, CacheError> {
        let now = self.clock.now_ms();
        Ok(!self
            .entry(&self.full_key(key))?
            .is_some_and(|entry| entry.is_fresh(now)))
    }

    /// Decode the stored value for `key` without checking freshness.
    pub fn retrieve<T: DeserializeOwned>(&self, key: &str) -> Result<T, CacheError> {
        let full_key = self.full_key(key);
        let entry = self
            .entry(&full_key)?
            .ok_or_else(|| CacheError::NotFound(full_key.clone()))?;
        precision::decode(&entry.payload).map_err(|e| {
            tracing::warn!(key = %full_key, error = %e, "Ignoring undecodable cache payload");
            CacheError::NotFound(full_key)
        })
    }

    /// Remove `key` and return the value it held, if any.
    pub fn invalidate<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let full_key = self.full_key(key);
        let previous = self
            .entry(&full_key)?
            .and_then(|entry| precision::decode(&entry.payload).ok());
        self.store.remove(&full_key)?;
        Ok(previous)
    }

    fn namespaced_keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(&self.prefix))
            .collect())
    }

    /// Delete entries under the namespace. With `groups`, only entries whose
    /// [`key_group`](Self::key_group) equals one of them are deleted.
    /// Returns the number of entries removed.
    pub fn clear(&self, groups: Option<&[&str]>) -> Result<usize, CacheError> {
        let mut removed = 0;
        for key in self.namespaced_keys()? {
            let selected = match groups {
                None => true,
                Some(groups) => {
                    let group = self.key_group(&key);
                    groups.iter().any(|g| *g == group)
                }
            };
            if selected {
                self.store.remove(&key)?;
                removed += 1;
            }
        }
        tracing::debug!(prefix = %self.prefix, removed, "Cache cleared");
        Ok(removed)
    }

    /// Evict stale and unreadable entries. Returns the number evicted.
    pub fn sweep_expired(&self) -> Result<usize, CacheError> {
        let now = self.clock.now_ms();
        let mut evicted = 0;
        for key in self.namespaced_keys()? {
            let stale = match self.entry(&key)? {
                Some(entry) => !entry.is_fresh(now),
                None => true,
            };
            if stale {
                self.store.remove(&key)?;
                evicted += 1;
            }
        }
        if evicted > 0 {
            tracing::debug!(prefix = %self.prefix, evicted, "Evicted expired cache entries");
        }
        Ok(evicted)
    }

    /// Number of entries under the namespace, fresh or not.
    pub fn count(&self) -> Result<usize, CacheError> {
        Ok(self.namespaced_keys()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::{MemoryStore, StoreError};
    use crate::cache::ManualClock;
    use num_bigint::BigInt;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PREFIX: &str = "network-cache-";

    fn cache() -> (TtlCache<Arc<MemoryStore>, ManualClock>, Arc<MemoryStore>, ManualClock) {
        let store = Arc::new(MemoryStore::new());
        let clock = ManualClock::new(1_000_000);
        let cache = TtlCache::with_clock(Arc::clone(&store), clock.clone(), PREFIX, 30_000);
        (cache, store, clock)
    }

    async fn fill(
        cache: &TtlCache<Arc<MemoryStore>, ManualClock>,
        key: &str,
        value: u64,
        ttl: Option<u64>,
    ) -> u64 {
        cache
            .get_or_compute(key, ttl, || async move { Ok::<_, CacheError>(value) })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_hit_returns_cached_value() {
        let (cache, _, _) = cache();
        assert_eq!(fill(&cache, "poolInfo", 1, None).await, 1);
        assert_eq!(fill(&cache, "poolInfo", 2, None).await, 1);
    }

    #[tokio::test]
    async fn test_ttl_boundary() {
        let (cache, _, clock) = cache();
        fill(&cache, "k", 1, Some(100)).await;
        clock.advance(99);
        assert_eq!(fill(&cache, "k", 2, Some(100)).await, 1);
        clock.advance(1);
        assert_eq!(fill(&cache, "k", 3, Some(100)).await, 3);
    }

    #[tokio::test]
    async fn test_default_ttl_is_recorded() {
        let (cache, store, _) = cache();
        fill(&cache, "k", 1, None).await;
        let raw = store.get("network-cache-k").unwrap().unwrap();
        let entry: CacheEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry.ttl, 30_000);
        assert_eq!(entry.created_at, 1_000_000);
        assert_eq!(entry.payload, "1");
        assert!(raw.contains("\"createdAt\""));
    }

    #[tokio::test]
    async fn test_failed_compute_stores_nothing() {
        let (cache, store, _) = cache();
        let result: Result<u64, CacheError> = cache
            .get_or_compute("k", None, || async move { Err(CacheError::NotFound("upstream".into())) })
            .await;
        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_entry_triggers_recompute() {
        let (cache, store, _) = cache();
        store.set("network-cache-k", "{not json").unwrap();
        assert_eq!(fill(&cache, "k", 5, None).await, 5);

        let entry = CacheEntry {
            created_at: 1_000_000,
            ttl: 30_000,
            payload: "\"text\"".into(),
        };
        store
            .set("network-cache-j", &serde_json::to_string(&entry).unwrap())
            .unwrap();
        assert_eq!(fill(&cache, "j", 6, None).await, 6);
    }

    #[tokio::test]
    async fn test_concurrent_misses_each_compute() {
        let (cache, _, _) = cache();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let compute = |value: u64| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                Ok::<_, CacheError>(value)
            }
        };
        let (a, b) = futures::join!(
            cache.get_or_compute("k", None, compute(1)),
            cache.get_or_compute("k", None, compute(2)),
        );
        assert_eq!((a.unwrap(), b.unwrap()), (1, 2));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        // Last write wins.
        assert_eq!(cache.retrieve::<u64>("k").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_big_integers_survive_the_store() {
        let (cache, store, _) = cache();
        let mut value = BTreeMap::new();
        value.insert(
            "supply".to_string(),
            precision::Value::BigInt("123456789012345678901234567890".parse::<BigInt>().unwrap()),
        );
        let value = precision::Value::Object(value);
        let computed = value.clone();
        let stored = cache
            .get_or_compute("big", None, || async move { Ok::<_, CacheError>(computed) })
            .await
            .unwrap();
        assert_eq!(stored, value);
        let raw = store.get("network-cache-big").unwrap().unwrap();
        assert!(raw.contains("123456789012345678901234567890n"));
        assert_eq!(cache.retrieve::<precision::Value>("big").unwrap(), value);
    }

    #[tokio::test]
    async fn test_refresh_ignores_fresh_entry() {
        let (cache, _, _) = cache();
        fill(&cache, "k", 1, None).await;
        let value = cache
            .refresh("k", None, || async move { Ok::<_, CacheError>(9u64) })
            .await
            .unwrap();
        assert_eq!(value, 9);
        assert_eq!(fill(&cache, "k", 3, None).await, 9);
    }

    #[tokio::test]
    async fn test_invalidate_and_retrieve() {
        let (cache, _, clock) = cache();
        assert!(matches!(
            cache.retrieve::<u64>("k"),
            Err(CacheError::NotFound(key)) if key == "network-cache-k"
        ));
        assert_eq!(cache.invalidate::<u64>("k").unwrap(), None);

        fill(&cache, "k", 4, Some(10)).await;
        clock.advance(50);
        // Retrieval ignores freshness.
        assert_eq!(cache.retrieve::<u64>("k").unwrap(), 4);
        assert!(cache.needs_update("k").unwrap());
        assert_eq!(cache.invalidate::<u64>("k").unwrap(), Some(4));
        assert_eq!(cache.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_respects_namespace_and_groups() {
        let (cache, store, _) = cache();
        store.set("other-app-key", "x").unwrap();
        fill(&cache, "poolInfo", 1, None).await;
        fill(&cache, "payouts-EQabc", 2, None).await;
        fill(&cache, "payouts-EQdef", 3, None).await;
        fill(&cache, "stakedBalance-EQabc", 4, None).await;
        assert_eq!(cache.count().unwrap(), 4);

        let removed = cache
            .clear(Some(&["network-cache-payouts", "network-cache-account"][..]))
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(cache.count().unwrap(), 2);
        assert!(!cache.needs_update("poolInfo").unwrap());

        assert_eq!(cache.clear(None).unwrap(), 2);
        assert_eq!(cache.count().unwrap(), 0);
        assert_eq!(store.get("other-app-key").unwrap().as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_sweep_expired() {
        let (cache, store, clock) = cache();
        fill(&cache, "short", 1, Some(10)).await;
        fill(&cache, "long", 2, Some(1_000)).await;
        store.set("network-cache-broken", "garbage").unwrap();
        store.set("elsewhere", "garbage").unwrap();
        clock.advance(10);

        assert_eq!(cache.sweep_expired().unwrap(), 2);
        assert_eq!(cache.sweep_expired().unwrap(), 0);
        assert_eq!(cache.count().unwrap(), 1);
        assert_eq!(cache.retrieve::<u64>("long").unwrap(), 2);
        assert!(store.get("elsewhere").unwrap().is_some());
    }

    #[test]
    fn test_key_group() {
        let (cache, _, _) = cache();
        assert_eq!(
            cache.key_group("network-cache-payouts-EQabc-1"),
            "network-cache-payouts"
        );
        assert_eq!(cache.key_group("network-cache-poolInfo"), "network-cache-poolInfo");
        assert_eq!(
            cache.key_group("network-cache-jettonWallet--1:abcd"),
            "network-cache-jettonWallet"
        );
    }

    #[tokio::test]
    async fn test_groups_follow_any_prefix() {
        for prefix in ["kton-", "kton", "my-app-cache-v2-"] {
            let store = Arc::new(MemoryStore::new());
            let cache =
                TtlCache::with_clock(Arc::clone(&store), ManualClock::new(0), prefix, 30_000);
            fill(&cache, "poolInfo", 1, None).await;
            fill(&cache, "jettonWallet-0:abcd", 2, None).await;
            fill(&cache, "stakedBalance-EQabc", 3, None).await;

            let groups = [cache.full_key("jettonWallet"), cache.full_key("stakedBalance")];
            let groups: Vec<&str> = groups.iter().map(String::as_str).collect();
            assert_eq!(cache.clear(Some(&groups)).unwrap(), 2, "prefix {prefix:?}");
            assert_eq!(cache.count().unwrap(), 1);
            assert!(!cache.needs_update("poolInfo").unwrap());
        }
    }

    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "readonly".into(),
                source: std::io::Error::other("read-only"),
            })
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.0.remove(key)
        }

        fn keys(&self) -> Result<Vec<String>, StoreError> {
            self.0.keys()
        }
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_and_keeps_prior_entry() {
        let inner = MemoryStore::new();
        let entry = CacheEntry {
            created_at: 0,
            ttl: 10,
            payload: "1".into(),
        };
        inner
            .set("network-cache-k", &serde_json::to_string(&entry).unwrap())
            .unwrap();
        let cache = TtlCache::with_clock(ReadOnlyStore(inner), ManualClock::new(100), PREFIX, 10);

        let result = cache
            .get_or_compute("k", None, || async move { Ok::<_, CacheError>(2u64) })
            .await;
        assert!(matches!(result, Err(CacheError::Storage(_))));
        assert_eq!(cache.retrieve::<u64>("k").unwrap(), 1);
    }
}
