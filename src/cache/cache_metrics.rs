/// Per-instance counters, read as a copied snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheMetrics {
    pub adds: u64,
    pub bulk_adds: u64,
    /// Writes refused by the admission threshold.
    pub rejected: u64,
    pub reconciliations: u64,
    /// Entries dropped from the store by trimming or retention.
    pub trimmed: u64,
    pub evictions: u64,
}

impl CacheMetrics {
    pub fn increase_adds(&mut self) {
        self.adds += 1;
    }

    pub fn increase_bulk_adds(&mut self) {
        self.bulk_adds += 1;
    }

    pub fn increase_rejected(&mut self) {
        self.rejected += 1;
    }

    pub fn increase_reconciliations(&mut self) {
        self.reconciliations += 1;
    }

    pub fn increase_trimmed(&mut self, count: usize) {
        self.trimmed += count as u64;
    }

    pub fn increase_evictions(&mut self) {
        self.evictions += 1;
    }
}
