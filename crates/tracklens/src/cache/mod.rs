//! Memoization of analysis results with time-based expiry.
//!
//! [`MemoizationCache::get_or_compute`] returns a live entry without running
//! the producer, and otherwise runs it once and stores the result. Concurrent
//! callers asking for the same key wait for a single producer run; distinct
//! keys compute independently.
//!
//! Keys embed the dataset fingerprint, so results computed over one dataset
//! are never served for another.

mod clock;
mod lru;
mod memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use lru::LruBackend;
pub use memory::InMemoryBackend;

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::{CacheBackendKind, CacheConfig};
use crate::error::{Result, TracklensError};

/// Identity of a cached value: analysis name, canonical parameters and dataset fingerprint.
///
/// Rendered as `name?k1=v1&k2=v2#fingerprint`, parameters sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(name: &str, params: &[(&str, String)], fingerprint: &str) -> Self {
        let mut params: Vec<&(&str, String)> = params.iter().collect();
        params.sort_by(|a, b| a.0.cmp(b.0));

        let mut key = name.to_string();
        for (i, (param, value)) in params.into_iter().enumerate() {
            key.push(if i == 0 { '?' } else { '&' });
            key.push_str(param);
            key.push('=');
            key.push_str(value);
        }
        key.push('#');
        key.push_str(fingerprint);
        CacheKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored value and the moment it was computed.
#[derive(Debug)]
pub struct CacheEntry<V> {
    pub value: Arc<V>,
    pub created_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }
}

/// Storage behind a [`MemoizationCache`].
pub trait CacheBackend<V>: Send {
    fn name(&self) -> &'static str;

    /// Look up an entry; backends tracking recency count this as a use.
    fn get(&mut self, key: &CacheKey) -> Option<&CacheEntry<V>>;

    /// Store an entry, returning the key evicted to make room, if any.
    fn insert(&mut self, key: CacheKey, entry: CacheEntry<V>) -> Option<CacheKey>;

    fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry<V>>;

    fn retain(&mut self, keep: &mut dyn FnMut(&CacheKey, &CacheEntry<V>) -> bool);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counters since the cache was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped because their TTL ran out.
    pub expired: u64,
    /// Entries dropped to respect a capacity bound.
    pub evicted: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
    evicted: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
        }
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

type InFlightMap = Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>;

/// Membership in the single-flight slot for one key. Dropping it releases the
/// slot, including when the producer unwinds.
struct InFlight<'a> {
    map: &'a InFlightMap,
    key: &'a CacheKey,
    slot: Arc<Mutex<()>>,
}

impl<'a> InFlight<'a> {
    fn join(map: &'a InFlightMap, key: &'a CacheKey) -> Self {
        let slot = Arc::clone(lock(map).entry(key.clone()).or_default());
        Self { map, key, slot }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut map = lock(self.map);
        if map.get(self.key).is_some_and(|slot| Arc::ptr_eq(slot, &self.slot)) {
            map.remove(self.key);
        }
    }
}

/// Key/value store with TTL expiry and per-key single-flight computation.
pub struct MemoizationCache<V> {
    backend: Mutex<Box<dyn CacheBackend<V>>>,
    in_flight: InFlightMap,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    counters: Counters,
}

impl<V: Send + Sync + 'static> MemoizationCache<V> {
    /// An unbounded in-memory cache on the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_backend(Box::new(InMemoryBackend::new()), ttl)
    }

    pub fn with_backend(backend: Box<dyn CacheBackend<V>>, ttl: Duration) -> Self {
        Self {
            backend: Mutex::new(backend),
            in_flight: Mutex::new(HashMap::new()),
            clock: Arc::new(SystemClock),
            ttl,
            counters: Counters::default(),
        }
    }

    /// Build the backend and TTL described by `config`.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let ttl = Duration::from_std(config.ttl())
            .map_err(|e| TracklensError::Config(format!("cache ttl out of range: {}", e)))?;
        let backend: Box<dyn CacheBackend<V>> = match config.backend {
            CacheBackendKind::Memory => Box::new(InMemoryBackend::new()),
            CacheBackendKind::Lru => Box::new(LruBackend::new(config.capacity)),
        };
        Ok(Self::with_backend(backend, ttl))
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn backend_name(&self) -> &'static str {
        lock(&self.backend).name()
    }

    /// Live value for `key`, dropping it if it has expired.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<V>> {
        let now = self.clock.now();
        let mut backend = lock(&self.backend);
        let expired = match backend.get(key) {
            Some(entry) if !entry.is_expired(now, self.ttl) => {
                return Some(Arc::clone(&entry.value));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            backend.remove(key);
            Counters::bump(&self.counters.expired);
            debug!(key = %key, "cache entry expired");
        }
        None
    }

    /// Return the live value for `key`, or run `producer` and store its result.
    ///
    /// `producer` runs outside the storage lock and at most once per key at a
    /// time.
    pub fn get_or_compute<F>(&self, key: &CacheKey, producer: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            Counters::bump(&self.counters.hits);
            debug!(key = %key, "cache hit");
            return value;
        }

        let flight = InFlight::join(&self.in_flight, key);
        let _running = lock(&flight.slot);

        // Another caller may have filled the entry while we waited.
        if let Some(value) = self.get(key) {
            Counters::bump(&self.counters.hits);
            debug!(key = %key, "cache hit after wait");
            return value;
        }

        Counters::bump(&self.counters.misses);
        debug!(key = %key, "cache miss");
        let value = Arc::new(producer());
        self.store(key.clone(), Arc::clone(&value));
        value
    }

    fn store(&self, key: CacheKey, value: Arc<V>) {
        let entry = CacheEntry {
            value,
            created_at: self.clock.now(),
        };
        if let Some(evicted) = lock(&self.backend).insert(key, entry) {
            Counters::bump(&self.counters.evicted);
            debug!(key = %evicted, "cache entry evicted");
        }
    }

    /// Drop every expired entry now; returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let mut backend = lock(&self.backend);
        let before = backend.len();
        backend.retain(&mut |_, entry| !entry.is_expired(now, ttl));
        let purged = before - backend.len();
        self.counters
            .expired
            .fetch_add(purged as u64, Ordering::Relaxed);
        purged
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        lock(&self.backend).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}

impl<V> fmt::Debug for MemoizationCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizationCache")
            .field("ttl", &self.ttl)
            .field("stats", &self.counters.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sorts_params() {
        let key = CacheKey::new(
            "genre_features",
            &[("z", "1".to_string()), ("feature", "tempo".to_string())],
            "sha256:ab",
        );
        assert_eq!(key.as_str(), "genre_features?feature=tempo&z=1#sha256:ab");
        assert_eq!(CacheKey::new("top_artists", &[], "fp").as_str(), "top_artists#fp");
    }

    #[test]
    fn test_hit_skips_producer() {
        let cache: MemoizationCache<u32> = MemoizationCache::new(Duration::hours(1));
        let key = CacheKey::new("a", &[], "fp");

        assert_eq!(*cache.get_or_compute(&key, || 1), 1);
        assert_eq!(*cache.get_or_compute(&key, || 2), 1);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_panicking_producer_releases_slot() {
        let cache: MemoizationCache<u32> = MemoizationCache::new(Duration::hours(1));
        let key = CacheKey::new("a", &[], "fp");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            cache.get_or_compute(&key, || panic!("producer failed"))
        }));
        assert!(result.is_err());
        assert!(lock(&cache.in_flight).is_empty());
        assert!(cache.get(&key).is_none());

        assert_eq!(*cache.get_or_compute(&key, || 7), 7);
        assert_eq!(cache.stats().misses, 2);
        assert!(lock(&cache.in_flight).is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let clock = Arc::new(ManualClock::default());
        let cache: MemoizationCache<u32> =
            MemoizationCache::new(Duration::seconds(10)).with_clock(clock.clone());
        cache.get_or_compute(&CacheKey::new("a", &[], "fp"), || 1);
        clock.advance(Duration::seconds(5));
        cache.get_or_compute(&CacheKey::new("b", &[], "fp"), || 2);

        clock.advance(Duration::seconds(6));
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().expired, 1);
    }

    #[test]
    fn test_from_config_selects_backend() {
        let config = CacheConfig {
            backend: CacheBackendKind::Lru,
            capacity: 2,
            ..CacheConfig::default()
        };
        let cache: MemoizationCache<u32> = MemoizationCache::from_config(&config).unwrap();
        assert_eq!(cache.backend_name(), "lru");
        assert_eq!(cache.ttl(), Duration::seconds(3600));

        for name in ["a", "b", "c"] {
            cache.get_or_compute(&CacheKey::new(name, &[], "fp"), || 0);
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evicted, 1);
    }
}
