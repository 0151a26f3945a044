// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Empty-loop calibration cache.
//!
//! Maps an iteration count to the score of running an empty loop that many
//! times. Entries live until explicitly cleared; the set of distinct counts a
//! run asks for is small, so there is no eviction.

use std::collections::HashMap;

use crate::score::Score;

/// Memoized empty-loop scores keyed by iteration count.
#[derive(Debug, Default)]
pub struct CalibrationCache {
    entries: HashMap<u64, Score>,
    hits: u64,
    misses: u64,
}

impl CalibrationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the baseline for `n`, counting the hit or miss.
    pub fn lookup(&mut self, n: u64) -> Option<Score> {
        match self.entries.get(&n) {
            Some(score) => {
                self.hits += 1;
                tracing::trace!(n, "Hit empty loop cache");
                Some(*score)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Peek at a cached baseline without touching the counters.
    pub fn get(&self, n: u64) -> Option<&Score> {
        self.entries.get(&n)
    }

    pub fn insert(&mut self, n: u64, score: Score) {
        self.entries.insert(n, score);
    }

    pub fn contains(&self, n: u64) -> bool {
        self.entries.contains_key(&n)
    }

    /// Drop the cached baseline for `n` only.
    pub fn remove(&mut self, n: u64) -> Option<Score> {
        self.entries.remove(&n)
    }

    /// Drop every cached baseline. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_counts_hits_and_misses() {
        let mut cache = CalibrationCache::new();
        assert!(cache.lookup(1000).is_none());
        cache.insert(1000, Score::new(10, 10, 10, 0, 1000));

        assert_eq!(cache.lookup(1000).map(|s| s.iters), Some(1000));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_get_leaves_counters_alone() {
        let mut cache = CalibrationCache::new();
        cache.insert(500, Score::new(5, 5, 5, 0, 500));

        assert_eq!(cache.get(500).map(|s| s.cpu), Some(5));
        assert!(cache.get(501).is_none());
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 0);
    }

    #[test]
    fn test_remove_single_entry() {
        let mut cache = CalibrationCache::new();
        cache.insert(1000, Score::default());
        cache.insert(2000, Score::default());

        assert!(cache.remove(1000).is_some());
        assert!(!cache.contains(1000));
        assert!(cache.contains(2000));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = CalibrationCache::new();
        cache.insert(1, Score::default());
        cache.insert(2, Score::default());
        cache.clear();
        assert!(cache.is_empty());
    }
}
