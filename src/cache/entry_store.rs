use fnv::FnvHashMap;
use itertools::Itertools;

use crate::common::{Pair, RowId, Score};

/// Latest known score per identifier.
///
/// Unbounded: it keeps every identifier it was told about until something removes it
/// explicitly. The ranked view is the bounded projection of it.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: FnvHashMap<RowId, Score>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self { entries: FnvHashMap::default() }
    }

    /// Replaces the score of `id`, returning the previous one.
    pub fn put(&mut self, id: RowId, score: Score) -> Option<Score> {
        self.entries.insert(id, score)
    }

    pub fn get(&self, id: RowId) -> Option<Score> {
        self.entries.get(&id).copied()
    }

    pub fn remove(&mut self, id: RowId) -> Option<Score> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every stored identifier, ascending.
    pub fn ids(&self) -> Vec<RowId> {
        self.entries.keys().copied().sorted_unstable().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pair> + '_ {
        self.entries.iter().map(|(&id, &score)| Pair { id, score })
    }

    /// Keeps the entries for which `keep` returns true and reports how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(RowId, Score) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&id, &mut score| keep(id, score));
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_replaces_previous_score() {
        let mut store = EntryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.put(7, 10), None);
        assert_eq!(store.put(7, 3), Some(10));
        assert_eq!(store.get(7), Some(3));
        assert_eq!(store.get(8), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_zero_score_is_stored() {
        let mut store = EntryStore::new();
        store.put(1, 0);
        assert_eq!(store.get(1), Some(0));
        assert_eq!(store.iter().collect::<Vec<_>>(), vec![Pair::new(1, 0)]);
    }

    #[test]
    fn test_ids_are_sorted() {
        let mut store = EntryStore::new();
        for id in [u64::MAX, 5, 0, 42, 5] {
            store.put(id, id % 3);
        }
        assert_eq!(store.ids(), vec![0, 5, 42, u64::MAX]);
    }

    #[test]
    fn test_remove_and_retain() {
        let mut store = EntryStore::new();
        for id in 0..10 {
            store.put(id, id * 10);
        }
        assert_eq!(store.remove(3), Some(30));
        assert_eq!(store.remove(3), None);

        let dropped = store.retain(|_, score| score >= 50);
        assert_eq!(dropped, 4);
        assert_eq!(store.ids(), vec![5, 6, 7, 8, 9]);
    }
}
