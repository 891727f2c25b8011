use enum_dispatch::enum_dispatch;

use super::CacheMetrics;
use crate::common::{Pair, RowId, Score};

/// A per-fragment cache of scored identifiers answering top-N queries.
///
/// Every method takes `&self`; implementations serialize access internally so a cache
/// can be shared between writer and reader threads behind an `Arc`.
#[enum_dispatch]
pub trait Cache {
    /// Records `score` for `id` and performs whatever upkeep the cache does per write.
    fn add(&self, id: RowId, score: Score);

    /// Records `score` for `id` without upkeep. Call `invalidate` once the batch is done.
    fn bulk_add(&self, id: RowId, score: Score);

    fn get(&self, id: RowId) -> Option<Score>;

    /// Number of cached pairs, i.e. the length of `top()`.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool;

    fn invalidate(&self);

    fn recalculate(&self);

    /// Every identifier the cache holds a score for, ascending.
    fn ids(&self) -> Vec<RowId>;

    /// Snapshot of the cached pairs in rank order.
    fn top(&self) -> Vec<Pair>;

    fn metrics(&self) -> CacheMetrics;
}
