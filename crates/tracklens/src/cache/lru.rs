//! Bounded least-recently-used backend.

use indexmap::IndexMap;

use super::{CacheBackend, CacheEntry, CacheKey};

/// Holds at most `capacity` entries; the least recently used one goes first.
///
/// Recency is the position in the map: front is oldest, back is newest.
#[derive(Debug)]
pub struct LruBackend<V> {
    entries: IndexMap<CacheKey, CacheEntry<V>>,
    capacity: usize,
}

impl<V> LruBackend<V> {
    /// A backend holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<V: Send + Sync> CacheBackend<V> for LruBackend<V> {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn get(&mut self, key: &CacheKey) -> Option<&CacheEntry<V>> {
        let entry = self.entries.shift_remove(key)?;
        self.entries.insert(key.clone(), entry);
        self.entries.get(key)
    }

    fn insert(&mut self, key: CacheKey, entry: CacheEntry<V>) -> Option<CacheKey> {
        self.entries.shift_remove(&key);
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0).map(|(k, _)| k)
        } else {
            None
        };
        self.entries.insert(key, entry);
        evicted
    }

    fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry<V>> {
        self.entries.shift_remove(key)
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&CacheKey, &CacheEntry<V>) -> bool) {
        self.entries.retain(|k, e| keep(k, e));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
