use std::cmp::Ordering;

use rayon::slice::ParallelSliceMut;
use serde::{Deserialize, Serialize};

use super::constants::PARALLEL_SORT_THRESHOLD;

/// Identifier of a ranked entity, usually a row in a bitmap fragment.
pub type RowId = u64;

/// Ranking value of an entity, e.g. the number of bits set in a row.
pub type Score = u64;

/// The last score reported for an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pair {
    pub id: RowId,
    pub score: Score,
}

impl Pair {
    pub fn new(id: RowId, score: Score) -> Self {
        Pair { id, score }
    }
}

impl From<(RowId, Score)> for Pair {
    fn from((id, score): (RowId, Score)) -> Self {
        Pair { id, score }
    }
}

/// Rank order: the higher score comes first, and on equal scores the lower id comes first.
/// Sorting ascending therefore yields a ranked view.
impl Ord for Pair {
    fn cmp(&self, other: &Self) -> Ordering {
        other.score.cmp(&self.score).then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Pair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Helpers over a sequence of [`Pair`].
pub trait Pairs {
    /// Sort into rank order, on the rayon pool for long sequences.
    fn sort_by_rank(&mut self);

    fn ids(&self) -> Vec<RowId>;

    /// The first `n` pairs, or all of them when there are fewer.
    fn top_n(&self, n: usize) -> &[Pair];
}

impl Pairs for [Pair] {
    fn sort_by_rank(&mut self) {
        if self.len() >= PARALLEL_SORT_THRESHOLD {
            self.par_sort_unstable();
        } else {
            self.sort_unstable();
        }
    }

    fn ids(&self) -> Vec<RowId> {
        self.iter().map(|pair| pair.id).collect()
    }

    fn top_n(&self, n: usize) -> &[Pair] {
        &self[..n.min(self.len())]
    }
}
