// File: src/cache.rs
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// A finished suggestion list, shared between every caller that hits it.
pub type Suggestions = Arc<Vec<String>>;

/// (cleaned query, requested result count)
pub type CacheKey = (String, usize);

#[derive(Default)]
struct Slots {
    entries: HashMap<CacheKey, Suggestions>,
    /// Keys in insertion order; eviction drains from the front.
    order: VecDeque<CacheKey>,
}

/// Bounded result cache with batch FIFO eviction.
///
/// When an insert finds the cache full, the oldest quarter of the entries (by
/// insertion, not by last access) is dropped first. Reads do not refresh an
/// entry's position, so a hot key can still be evicted.
pub struct ResultCache {
    capacity: usize,
    slots: Mutex<Slots>,
}

impl ResultCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Mutex::new(Slots::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, query: &str, max_results: usize) -> bool {
        self.slots
            .lock()
            .entries
            .contains_key(&(query.to_string(), max_results))
    }

    pub fn get(&self, query: &str, max_results: usize) -> Option<Suggestions> {
        self.slots
            .lock()
            .entries
            .get(&(query.to_string(), max_results))
            .cloned()
    }

    /// Returns the cached list for `key`, or computes, stores and returns it.
    ///
    /// `compute` runs without the lock held. Two threads missing on the same
    /// key may both compute; the first value stored is the one kept and
    /// returned to both.
    pub fn get_or_compute<F>(&self, key: CacheKey, compute: F) -> Suggestions
    where
        F: FnOnce() -> Vec<String>,
    {
        if self.capacity == 0 {
            return Arc::new(compute());
        }
        if let Some(hit) = self.slots.lock().entries.get(&key) {
            debug!(query = %key.0, max_results = key.1, "cache hit");
            return Arc::clone(hit);
        }

        let computed = Arc::new(compute());
        self.insert(key, computed)
    }

    /// Stores `value` unless the key is already present, evicting first when
    /// full. Returns whichever value ends up stored.
    pub fn insert(&self, key: CacheKey, value: Suggestions) -> Suggestions {
        if self.capacity == 0 {
            return value;
        }
        let mut slots = self.slots.lock();
        if let Some(existing) = slots.entries.get(&key) {
            return Arc::clone(existing);
        }

        if slots.entries.len() >= self.capacity {
            let drop = (self.capacity / 4).max(1);
            for _ in 0..drop {
                match slots.order.pop_front() {
                    Some(old) => {
                        slots.entries.remove(&old);
                    }
                    None => break,
                }
            }
            debug!(
                evicted = drop,
                remaining = slots.entries.len(),
                "cache full, evicted oldest entries"
            );
        }

        slots.order.push_back(key.clone());
        slots.entries.insert(key, Arc::clone(&value));
        value
    }

    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        slots.entries.clear();
        slots.order.clear();
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
