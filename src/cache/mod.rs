// `Cache` goes first: `enum_dispatch` must see the trait before `GenericCache`.
mod traits;

mod cache_config;
mod cache_metrics;
mod entry_store;
mod generic_cache;
mod lru_cache;
mod nop_cache;
mod rank_cache;
mod ranked_view;
mod reconcile_policy;

pub use cache_config::{CacheConfig, CacheType};
pub use cache_metrics::CacheMetrics;
pub use entry_store::EntryStore;
pub use generic_cache::GenericCache;
pub use lru_cache::LruCache;
pub use nop_cache::NopCache;
pub use rank_cache::RankCache;
pub use ranked_view::{RankedView, Reconciled};
pub use reconcile_policy::ReconcilePolicy;
pub use traits::Cache;
