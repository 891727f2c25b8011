use super::EntryStore;
use crate::common::{Pair, Pairs, Score};

/// Bounded, rank-ordered projection of an [`EntryStore`].
///
/// Pairs are ordered by score descending, then id ascending. The view is only rebuilt
/// wholesale by [`RankedView::rebuild`], so it is never observed half sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedView {
    rankings: Vec<Pair>,
}

/// Result of a rebuild: the new view and the score of the best pair that didn't fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub view: RankedView,
    pub cutoff: Option<Score>,
}

impl RankedView {
    pub fn empty() -> Self {
        Self { rankings: Vec::new() }
    }

    /// Collects every pair of `store`, keeps the best `capacity` of them in rank order.
    ///
    /// Selection runs in linear time over the whole store, and only the kept prefix is
    /// sorted, so the cost is `O(n + k log k)` in time and `O(n)` in memory however the
    /// store was filled.
    pub fn rebuild(store: &EntryStore, capacity: u32) -> Reconciled {
        let capacity = capacity as usize;
        let mut pairs: Vec<Pair> = store.iter().collect();

        let cutoff = if pairs.len() > capacity {
            // Everything before `capacity` ranks ahead of pairs[capacity], the best excluded pair.
            pairs.select_nth_unstable(capacity);
            let cutoff = pairs[capacity].score;
            pairs.truncate(capacity);
            Some(cutoff)
        } else {
            None
        };
        pairs.shrink_to_fit();
        pairs.sort_by_rank();

        Reconciled { view: RankedView { rankings: pairs }, cutoff }
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    pub fn as_slice(&self) -> &[Pair] {
        &self.rankings
    }

    pub fn to_vec(&self) -> Vec<Pair> {
        self.rankings.clone()
    }
}
