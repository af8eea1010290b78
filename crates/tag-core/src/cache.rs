//! Per-session memoization of ranking results.
//!
//! The vocabulary is immutable for the lifetime of a cache, so entries are
//! never evicted or invalidated; the map only grows with the set of distinct
//! queries. Scope one cache per loaded `TagIndex`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::debug;

use crate::ranker::{normalize_query, RankedTag};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Unbounded map from normalized query to ranked results.
#[derive(Debug, Default)]
pub struct SuggestionCache {
    entries: Mutex<HashMap<String, Arc<[RankedTag]>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached results for `query`, computing them on first use.
    ///
    /// `compute` receives the normalized query. The lock is not held while
    /// computing; if two callers race on the same query the first stored
    /// result wins and both see it.
    pub fn get_or_compute<F>(&self, query: &str, compute: F) -> Arc<[RankedTag]>
    where
        F: FnOnce(&str) -> Vec<RankedTag>,
    {
        let key = normalize_query(query);
        if let Some(hit) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(query = %key, "suggestion cache hit");
            return Arc::clone(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let computed: Arc<[RankedTag]> = compute(&key).into();
        let mut map = self.lock();
        let stored = Arc::clone(map.entry(key).or_insert(computed));
        debug!(entries = map.len(), "suggestion cache miss");
        stored
    }

    /// Cached results for `query` without computing anything.
    pub fn get(&self, query: &str) -> Option<Arc<[RankedTag]>> {
        self.lock().get(&normalize_query(query)).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    // A panic while holding the lock cannot leave the map half-updated
    // (inserts are single calls), so a poisoned lock is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<[RankedTag]>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
