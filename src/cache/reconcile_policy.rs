use crate::common::constants::DEFAULT_LOAD_FACTOR;

/// Decides when incremental writes have drifted far enough from the ranked view to
/// pay for a reconciliation.
///
/// The load factor is a multiple of the cache capacity. It only trades staleness against
/// throughput; results after an explicit reconciliation do not depend on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcilePolicy {
    load_factor: f64,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_FACTOR)
    }
}

impl ReconcilePolicy {
    pub fn new(load_factor: f64) -> Self {
        Self { load_factor }
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// `ceil(capacity * load_factor)`, never below 1.
    pub fn threshold(&self, capacity: u32) -> u64 {
        let raw = capacity as f64 * self.load_factor;
        if !raw.is_finite() {
            return if raw == f64::INFINITY { u64::MAX } else { 1 };
        }
        // Products such as 10 * 1.1 land a hair above the integer they denote.
        let threshold = (raw - raw.abs() * 1e-12).ceil() as u64;
        threshold.max(1)
    }

    /// True once the writes since the last reconciliation reach the threshold.
    /// A zero-capacity view is always empty, so it never needs reconciling.
    pub fn should_reconcile(&self, writes_since_last_reconcile: u64, capacity: u32) -> bool {
        capacity > 0 && writes_since_last_reconcile >= self.threshold(capacity)
    }

    /// True when the entry store has outgrown the threshold and may be trimmed.
    pub fn should_trim(&self, store_len: usize, capacity: u32) -> bool {
        store_len as u64 > self.threshold(capacity)
    }
}
