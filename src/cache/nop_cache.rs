use super::{Cache, CacheMetrics};
use crate::common::{Pair, RowId, Score};

/// Cache for fragments that never serve top-N queries: every write is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopCache;

impl NopCache {
    pub fn new() -> Self {
        NopCache
    }
}

impl Cache for NopCache {
    fn add(&self, _id: RowId, _score: Score) {}

    fn bulk_add(&self, _id: RowId, _score: Score) {}

    fn get(&self, _id: RowId) -> Option<Score> {
        None
    }

    fn len(&self) -> usize {
        0
    }

    fn is_empty(&self) -> bool {
        true
    }

    fn invalidate(&self) {}

    fn recalculate(&self) {}

    fn ids(&self) -> Vec<RowId> {
        Vec::new()
    }

    fn top(&self) -> Vec<Pair> {
        Vec::new()
    }

    fn metrics(&self) -> CacheMetrics {
        CacheMetrics::default()
    }
}
