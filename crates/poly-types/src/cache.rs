//! Memoization of algebra queries
//!
//! Types are immutable and compared structurally, so a query result depends only
//! on its operand pair. Results are bucketed by the structural hash of the pair
//! and confirmed by full equality on lookup.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::ty::Type;

/// Hit/miss counters of a [`TypeCache`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to be computed
    pub misses: u64,
    /// Times a table was cleared for reaching capacity
    pub flushes: u64,
}

#[derive(Debug, Clone)]
struct PairTable<V> {
    buckets: FxHashMap<u64, Vec<(Type, Type, V)>>,
    len: usize,
}

impl<V: Clone> PairTable<V> {
    fn new() -> Self {
        PairTable {
            buckets: FxHashMap::default(),
            len: 0,
        }
    }

    fn get(&self, key: u64, a: &Type, b: &Type) -> Option<V> {
        self.buckets
            .get(&key)?
            .iter()
            .find(|(ka, kb, _)| ka == a && kb == b)
            .map(|(_, _, v)| v.clone())
    }

    fn insert(&mut self, key: u64, a: &Type, b: &Type, value: V) {
        self.buckets
            .entry(key)
            .or_default()
            .push((a.clone(), b.clone(), value));
        self.len += 1;
    }

    fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}

fn pair_key(a: &Type, b: &Type) -> u64 {
    let mut hasher = FxHasher::default();
    a.hash(&mut hasher);
    b.hash(&mut hasher);
    hasher.finish()
}

/// Memo tables for subset and intersection queries
#[derive(Debug, Clone)]
pub struct TypeCache {
    subsets: PairTable<bool>,
    intersections: PairTable<Option<Type>>,
    capacity: usize,
    stats: CacheStats,
}

impl TypeCache {
    /// Create an empty cache holding at most `capacity` entries per table
    pub fn new(capacity: usize) -> Self {
        TypeCache {
            subsets: PairTable::new(),
            intersections: PairTable::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Look up a memoized `is_subset(sub, sup)`
    pub fn subset(&mut self, sub: &Type, sup: &Type) -> Option<bool> {
        let hit = self.subsets.get(pair_key(sub, sup), sub, sup);
        self.count(hit.is_some());
        hit
    }

    /// Record `is_subset(sub, sup) == result`
    pub fn record_subset(&mut self, sub: &Type, sup: &Type, result: bool) {
        if self.subsets.len >= self.capacity {
            tracing::debug!(entries = self.subsets.len, "flushing subset cache");
            self.subsets.clear();
            self.stats.flushes += 1;
        }
        self.subsets.insert(pair_key(sub, sup), sub, sup, result);
    }

    /// Look up a memoized `intersect_type(a, b)`; the outer `None` means "not cached"
    pub fn intersection(&mut self, a: &Type, b: &Type) -> Option<Option<Type>> {
        let hit = self.intersections.get(pair_key(a, b), a, b);
        self.count(hit.is_some());
        hit
    }

    /// Record `intersect_type(a, b) == result`
    pub fn record_intersection(&mut self, a: &Type, b: &Type, result: Option<Type>) {
        if self.intersections.len >= self.capacity {
            tracing::debug!(entries = self.intersections.len, "flushing intersection cache");
            self.intersections.clear();
            self.stats.flushes += 1;
        }
        self.intersections.insert(pair_key(a, b), a, b, result);
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of memoized entries across both tables
    pub fn len(&self) -> usize {
        self.subsets.len + self.intersections.len
    }

    /// Check if nothing is memoized
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every memoized entry, keeping the counters
    pub fn clear(&mut self) {
        self.subsets.clear();
        self.intersections.clear();
    }

    fn count(&mut self, hit: bool) {
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
    }
}
