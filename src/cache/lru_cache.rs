use std::collections::BTreeMap;

use fnv::FnvHashMap;
use itertools::Itertools;
use log::trace;
use parking_lot::Mutex;

use super::{Cache, CacheMetrics};
use crate::common::{Pair, Pairs, RowId, Score};

/// Keeps the `capacity` most recently written identifiers with their scores.
///
/// There is nothing to reconcile: `top()` sorts the held pairs on every call.
#[derive(Debug)]
pub struct LruCache {
    inner: Mutex<LruCacheInner>,
}

#[derive(Debug)]
struct LruCacheInner {
    capacity: u32,
    // id -> (score, tick of its last write)
    entries: FnvHashMap<RowId, (Score, u64)>,
    // tick -> id, oldest first
    recency: BTreeMap<u64, RowId>,
    tick: u64,
    metrics: CacheMetrics,
}

impl LruCache {
    pub fn new(capacity: u32) -> Self {
        LruCache {
            inner: Mutex::new(LruCacheInner {
                capacity,
                entries: FnvHashMap::default(),
                recency: BTreeMap::new(),
                tick: 0,
                metrics: CacheMetrics::default(),
            }),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.inner.lock().capacity
    }
}

impl LruCacheInner {
    fn put(&mut self, id: RowId, score: Score) {
        if self.capacity == 0 {
            return;
        }
        self.tick += 1;
        let tick = self.tick;

        if let Some((stored, last_tick)) = self.entries.get_mut(&id) {
            self.recency.remove(&*last_tick);
            *stored = score;
            *last_tick = tick;
            self.recency.insert(tick, id);
            return;
        }

        if self.entries.len() >= self.capacity as usize {
            if let Some((_, evicted)) = self.recency.pop_first() {
                self.entries.remove(&evicted);
                self.metrics.increase_evictions();
                trace!("[put] evicted id {} to make room for {}", evicted, id);
            }
        }
        self.entries.insert(id, (score, tick));
        self.recency.insert(tick, id);
    }
}

impl Cache for LruCache {
    fn add(&self, id: RowId, score: Score) {
        let mut inner = self.inner.lock();
        inner.metrics.increase_adds();
        inner.put(id, score);
    }

    fn bulk_add(&self, id: RowId, score: Score) {
        let mut inner = self.inner.lock();
        inner.metrics.increase_bulk_adds();
        inner.put(id, score);
    }

    fn get(&self, id: RowId) -> Option<Score> {
        self.inner.lock().entries.get(&id).map(|&(score, _)| score)
    }

    fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    fn invalidate(&self) {}

    fn recalculate(&self) {}

    fn ids(&self) -> Vec<RowId> {
        self.inner.lock().entries.keys().copied().sorted_unstable().collect()
    }

    fn top(&self) -> Vec<Pair> {
        let mut pairs: Vec<Pair> = self.inner.lock().entries.iter().map(|(&id, &(score, _))| Pair { id, score }).collect();
        pairs.sort_by_rank();
        pairs
    }

    fn metrics(&self) -> CacheMetrics {
        self.inner.lock().metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_least_recently_written() {
        let cache = LruCache::new(2);
        cache.add(1, 10);
        cache.add(2, 20);
        cache.add(3, 5);
        assert_eq!(cache.ids(), vec![2, 3]);
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.metrics().evictions, 1);
        assert_eq!(cache.top(), vec![Pair::new(2, 20), Pair::new(3, 5)]);
    }

    #[test]
    fn test_rewrite_refreshes_recency() {
        let cache = LruCache::new(2);
        cache.add(1, 10);
        cache.add(2, 20);
        cache.bulk_add(1, 11);
        cache.add(3, 30);
        assert_eq!(cache.ids(), vec![1, 3]);
        assert_eq!(cache.get(1), Some(11));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_reconciliation_is_a_no_op() {
        let cache = LruCache::new(3);
        for id in 0..5 {
            cache.bulk_add(id, 1);
        }
        let before = cache.top();
        cache.invalidate();
        cache.recalculate();
        assert_eq!(before, cache.top());
        assert_eq!(cache.ids(), vec![2, 3, 4]);
        assert_eq!(cache.metrics().reconciliations, 0);
    }

    #[test]
    fn test_zero_capacity() {
        let cache = LruCache::new(0);
        cache.add(1, 1);
        cache.bulk_add(2, 2);
        assert!(cache.is_empty());
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.metrics().evictions, 0);
    }
}
