//! # Result cache
//!
//! Bounded-TTL memoization of pass-computation results, keyed by the request
//! parameters, so repeated identical external requests within a short window
//! do not redo the heavy oracle walks. This is a load-bounding device, not a
//! correctness one.
//!
//! The cache is plain injected state: construct one, share it by reference,
//! and pass it where it is needed. There is no process-wide singleton. Writes
//! are idempotent last-writer-wins upserts; errors are never cached.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use ahash::RandomState;

use crate::observers::Observer;

/// Composite cache key for a pass-prediction request: observer identity,
/// time horizon, elevation threshold and satellite-set identity.
///
/// The elevation threshold is stored in millidegrees so the key stays `Eq`
/// and hashable; catalog numbers are kept sorted so the same satellite set
/// always produces the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PassQueryKey {
    pub observer: String,
    pub horizon_hours: u32,
    pub min_elevation_millideg: i64,
    pub satellites: Vec<u32>,
}

impl PassQueryKey {
    pub fn new(
        observer: &Observer,
        horizon_hours: u32,
        min_elevation_deg: f64,
        mut satellites: Vec<u32>,
    ) -> PassQueryKey {
        satellites.sort_unstable();
        PassQueryKey {
            observer: observer.cache_label(),
            horizon_hours,
            min_elevation_millideg: (min_elevation_deg * 1000.0).round() as i64,
            satellites,
        }
    }
}

struct CacheEntry<V> {
    stored_at: Instant,
    ttl: Duration,
    value: V,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

/// TTL-bounded memoization keyed by a composite request key.
pub struct ResultCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>, RandomState>>,
}

impl<K, V> Default for ResultCache<K, V> {
    fn default() -> Self {
        ResultCache {
            entries: Mutex::new(HashMap::default()),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> ResultCache<K, V> {
    pub fn new() -> ResultCache<K, V> {
        ResultCache::default()
    }

    /// Return the cached value for `key` if it is still within its TTL,
    /// otherwise invoke `compute`, store a successful result under `ttl`, and
    /// return it. A failed computation is returned to the caller but never
    /// cached.
    pub fn get_or_compute<E>(
        &self,
        key: K,
        ttl: Duration,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        let now = Instant::now();
        {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            match entries.get(&key) {
                Some(entry) if entry.is_fresh(now) => return Ok(entry.value.clone()),
                Some(_) => {
                    entries.remove(&key);
                }
                None => {}
            }
        }

        // The lock is not held across the computation: concurrent misses may
        // compute redundantly, and the last writer wins.
        let value = compute()?;

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                ttl,
                value: value.clone(),
            },
        );
        Ok(value)
    }

    /// Number of stored entries, fresh or expired.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry whose TTL has elapsed.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|_, entry| entry.is_fresh(now));
    }
}
