/// Default capacity of a cache built from an empty configuration.
pub const DEFAULT_CACHE_SIZE: u32 = 50_000;

/// Default multiple of capacity used by the reconcile policy and by store trimming.
pub const DEFAULT_LOAD_FACTOR: f64 = 1.1;

/// Ranked views at least this long are sorted on the rayon pool.
pub const PARALLEL_SORT_THRESHOLD: usize = 1 << 16;

/// Reconciliations over stores at least this large are timed in the debug log.
pub const TIMED_RECONCILE_THRESHOLD: usize = 1 << 16;

pub const CACHE_CONFIG_FILE: &str = "cache_config.json";

pub const LOG_FILE_NAME: &str = "rank_cache.log";

pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l:>5})} [{T}] {t} - {m}{n}";
