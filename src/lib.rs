//! Rank-ordered top-K caches for bitmap index fragments.
//!
//! A fragment reports a score (typically a bit count) per row; the cache keeps the best
//! `capacity` rows ordered by score so "top N" queries don't scan every row. See
//! [`RankCache`] for the maintenance model.

mod cache;
mod common;

pub use crate::cache::{
    Cache, CacheConfig, CacheMetrics, CacheType, EntryStore, GenericCache, LruCache, NopCache, RankCache, RankedView, Reconciled,
    ReconcilePolicy,
};
pub use crate::common::constants;
pub use crate::common::errors::CacheError;
pub use crate::common::file_operations::FileOperationError;
pub use crate::common::logger::{init_logger, LoggerConfig};
pub use crate::common::{Pair, Pairs, RowId, Score};

pub type Result<T> = std::result::Result<T, CacheError>;
