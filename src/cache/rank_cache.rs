use log::debug;
use measure_time::debug_time;
use parking_lot::Mutex;

use super::{Cache, CacheConfig, CacheMetrics, EntryStore, RankedView, ReconcilePolicy, Reconciled};
use crate::common::constants::TIMED_RECONCILE_THRESHOLD;
use crate::common::{Pair, RowId, Score};

/// Score-ordered top-K cache.
///
/// Writes land in an unbounded [`EntryStore`]; the [`RankedView`] holding the best
/// `capacity` pairs is only rebuilt by reconciliation. `add` reconciles on its own once
/// enough writes piled up (see [`ReconcilePolicy`]), `bulk_add` never does, so a bulk load
/// must be followed by one [`Cache::invalidate`].
///
/// Store and view sit behind one mutex: readers never see a view that is being rebuilt.
#[derive(Debug)]
pub struct RankCache {
    inner: Mutex<RankCacheInner>,
}

#[derive(Debug)]
struct RankCacheInner {
    entries: EntryStore,
    rankings: RankedView,
    capacity: u32,
    policy: ReconcilePolicy,
    trim_store: bool,
    // Writes scoring below this are refused. Only ever non-zero when `trim_store` is set.
    threshold_value: Score,
    writes_since_reconcile: u64,
    metrics: CacheMetrics,
}

impl RankCache {
    pub fn new(capacity: u32) -> Self {
        Self::with_policy(capacity, ReconcilePolicy::default(), false)
    }

    pub fn with_policy(capacity: u32, policy: ReconcilePolicy, trim_store: bool) -> Self {
        RankCache {
            inner: Mutex::new(RankCacheInner {
                entries: EntryStore::new(),
                rankings: RankedView::empty(),
                capacity,
                policy,
                trim_store,
                threshold_value: 0,
                writes_since_reconcile: 0,
                metrics: CacheMetrics::default(),
            }),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_policy(config.cache_size, ReconcilePolicy::new(config.load_factor), config.trim_store)
    }

    pub fn capacity(&self) -> u32 {
        self.inner.lock().capacity
    }

    /// Number of identifiers in the entry store, which may exceed the capacity.
    pub fn store_len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Lowest score currently admitted; 0 unless store trimming is enabled.
    pub fn admission_threshold(&self) -> Score {
        self.inner.lock().threshold_value
    }

    /// Drops the store entries whose id `keep` rejects, then reconciles.
    ///
    /// For score sources that delete identifiers: a plain `invalidate` would keep
    /// ranking the last score they reported.
    pub fn invalidate_retaining(&self, mut keep: impl FnMut(RowId) -> bool) {
        let mut inner = self.inner.lock();
        let dropped = inner.entries.retain(|id, _| keep(id));
        inner.metrics.increase_trimmed(dropped);
        inner.recalculate();
    }
}

impl RankCacheInner {
    /// Stores the score unless the admission threshold refuses it. A refused write also
    /// forgets the previous score of `id`, which would otherwise outlive it.
    fn admit(&mut self, id: RowId, score: Score) -> bool {
        if score < self.threshold_value {
            self.entries.remove(id);
            self.metrics.increase_rejected();
            return false;
        }
        self.entries.put(id, score);
        true
    }

    fn recalculate(&mut self) {
        let store_len = self.entries.len();
        let Reconciled { view, cutoff } = if store_len >= TIMED_RECONCILE_THRESHOLD {
            debug_time!("[recalculate] rebuild rankings from {} entries", store_len);
            RankedView::rebuild(&self.entries, self.capacity)
        } else {
            RankedView::rebuild(&self.entries, self.capacity)
        };

        self.threshold_value = match cutoff {
            Some(score) if self.trim_store => score,
            _ => 0,
        };
        self.rankings = view;
        self.writes_since_reconcile = 0;
        self.metrics.increase_reconciliations();

        if self.threshold_value > 0 && self.policy.should_trim(store_len, self.capacity) {
            let threshold = self.threshold_value;
            let trimmed = self.entries.retain(|_, score| score >= threshold);
            self.metrics.increase_trimmed(trimmed);
            debug!("[recalculate] trimmed {} entries scoring below {}, {} left", trimmed, threshold, self.entries.len());
        }
        debug!(
            "[recalculate] entries: {}, rankings: {}, capacity: {}, threshold: {}",
            store_len,
            self.rankings.len(),
            self.capacity,
            self.threshold_value
        );
    }
}

impl Cache for RankCache {
    fn add(&self, id: RowId, score: Score) {
        let mut inner = self.inner.lock();
        inner.metrics.increase_adds();
        inner.admit(id, score);
        inner.writes_since_reconcile += 1;
        if inner.policy.should_reconcile(inner.writes_since_reconcile, inner.capacity) {
            inner.recalculate();
        }
    }

    fn bulk_add(&self, id: RowId, score: Score) {
        let mut inner = self.inner.lock();
        inner.metrics.increase_bulk_adds();
        inner.admit(id, score);
    }

    fn get(&self, id: RowId) -> Option<Score> {
        self.inner.lock().entries.get(id)
    }

    fn len(&self) -> usize {
        self.inner.lock().rankings.len()
    }

    fn is_empty(&self) -> bool {
        self.inner.lock().rankings.is_empty()
    }

    fn invalidate(&self) {
        self.inner.lock().recalculate();
    }

    fn recalculate(&self) {
        self.inner.lock().recalculate();
    }

    fn ids(&self) -> Vec<RowId> {
        self.inner.lock().entries.ids()
    }

    fn top(&self) -> Vec<Pair> {
        self.inner.lock().rankings.to_vec()
    }

    fn metrics(&self) -> CacheMetrics {
        self.inner.lock().metrics
    }
}
