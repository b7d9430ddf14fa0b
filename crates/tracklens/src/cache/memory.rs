//! Unbounded in-memory backend.

use std::collections::HashMap;

use super::{CacheBackend, CacheEntry, CacheKey};

/// Unbounded map from key to entry; entries leave only through expiry.
#[derive(Debug)]
pub struct InMemoryBackend<V> {
    entries: HashMap<CacheKey, CacheEntry<V>>,
}

impl<V> InMemoryBackend<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> Default for InMemoryBackend<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Send + Sync> CacheBackend<V> for InMemoryBackend<V> {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&mut self, key: &CacheKey) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: CacheKey, entry: CacheEntry<V>) -> Option<CacheKey> {
        self.entries.insert(key, entry);
        None
    }

    fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry<V>> {
        self.entries.remove(key)
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&CacheKey, &CacheEntry<V>) -> bool) {
        self.entries.retain(|k, e| keep(k, e));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
