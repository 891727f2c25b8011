use enum_dispatch::enum_dispatch;
use log::info;

use super::{Cache, CacheConfig, CacheMetrics, CacheType, LruCache, NopCache, RankCache};
use crate::common::errors::CacheError;
use crate::common::{Pair, RowId, Score};

/// Any cache kind, picked at runtime from a [`CacheConfig`].
#[enum_dispatch(Cache)]
#[derive(Debug)]
pub enum GenericCache {
    RankCache(RankCache),
    LruCache(LruCache),
    NopCache(NopCache),
}

impl GenericCache {
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        config.validate()?;
        info!("[from_config] creating `{}` cache, size: {}", config.cache_type, config.cache_size);
        Ok(match config.cache_type {
            CacheType::Ranked => RankCache::from_config(config).into(),
            CacheType::Lru => LruCache::new(config.cache_size).into(),
            CacheType::None => NopCache::new().into(),
        })
    }

    pub fn cache_type(&self) -> CacheType {
        match self {
            GenericCache::RankCache(_) => CacheType::Ranked,
            GenericCache::LruCache(_) => CacheType::Lru,
            GenericCache::NopCache(_) => CacheType::None,
        }
    }
}

#[cfg(test)]
mod from_config_tests {
    use super::*;

    #[test]
    fn test_from_config() {
        for cache_type in [CacheType::Ranked, CacheType::Lru, CacheType::None] {
            let cache = GenericCache::from_config(&CacheConfig::new(cache_type, 2)).expect("valid config");
            assert_eq!(cache.cache_type(), cache_type);
        }

        let invalid = CacheConfig::builder().load_factor(0.9).build();
        assert!(matches!(GenericCache::from_config(&invalid), Err(CacheError::InvalidCacheConfig(_))));
    }

    #[test]
    fn test_dispatch() {
        let cache = GenericCache::from_config(&CacheConfig::new(CacheType::Ranked, 2)).expect("valid config");
        cache.add(1, 10);
        cache.add(2, 20);
        cache.add(3, 15);
        cache.recalculate();
        assert_eq!(cache.top(), vec![Pair::new(2, 20), Pair::new(3, 15)]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(1), Some(10));
        assert_eq!(cache.metrics().adds, 3);

        let cache = GenericCache::from_config(&CacheConfig::new(CacheType::None, 2)).expect("valid config");
        cache.add(1, 10);
        cache.invalidate();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GenericCache>();
    }
}

/// Contract every cache kind honours, whatever its maintenance strategy.
#[cfg(test)]
#[generic_tests::define]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    trait WithCapacity: Cache + Send + Sync + 'static {
        fn with_capacity(capacity: u32) -> Self;
    }

    impl WithCapacity for RankCache {
        fn with_capacity(capacity: u32) -> Self {
            RankCache::new(capacity)
        }
    }

    impl WithCapacity for LruCache {
        fn with_capacity(capacity: u32) -> Self {
            LruCache::new(capacity)
        }
    }

    impl WithCapacity for NopCache {
        fn with_capacity(_capacity: u32) -> Self {
            NopCache::new()
        }
    }

    impl WithCapacity for GenericCache {
        fn with_capacity(capacity: u32) -> Self {
            GenericCache::from_config(&CacheConfig::new(CacheType::Ranked, capacity)).expect("valid config")
        }
    }

    fn random_load<C: Cache>(cache: &C, rng: &mut StdRng, n: usize, bulk: bool) -> HashSet<RowId> {
        let mut ids = HashSet::new();
        for _ in 0..n {
            let id = rng.gen_range(0..(n as u64 / 2 + 1));
            let score = rng.gen_range(0..100);
            if bulk {
                cache.bulk_add(id, score);
            } else {
                cache.add(id, score);
            }
            ids.insert(id);
        }
        ids
    }

    #[test]
    fn test_len_never_exceeds_capacity<C: WithCapacity>() {
        let mut rng = StdRng::seed_from_u64(11);
        for capacity in [0u32, 1, 3, 64] {
            let cache = C::with_capacity(capacity);
            let ids = random_load(&cache, &mut rng, 2_000, capacity % 2 == 0);
            cache.invalidate();
            assert!(cache.len() <= capacity as usize);
            assert!(cache.len() <= ids.len());
            assert_eq!(cache.top().len(), cache.len());
        }
    }

    #[test]
    fn test_top_is_rank_ordered<C: WithCapacity>() {
        let mut rng = StdRng::seed_from_u64(12);
        let cache = C::with_capacity(50);
        random_load(&cache, &mut rng, 1_000, false);
        cache.recalculate();
        let top = cache.top();
        assert!(top.windows(2).all(|w| w[0] < w[1]));
        for pair in top {
            assert_eq!(cache.get(pair.id), Some(pair.score));
        }
    }

    #[test]
    fn test_zero_capacity_is_always_empty<C: WithCapacity>() {
        let cache = C::with_capacity(0);
        for id in 0..100 {
            cache.add(id, id);
            cache.bulk_add(id + 100, id);
        }
        cache.recalculate();
        cache.invalidate();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert!(cache.top().is_empty());
    }

    #[test]
    fn test_reconciliation_is_idempotent<C: WithCapacity>() {
        let mut rng = StdRng::seed_from_u64(13);
        let cache = C::with_capacity(10);
        random_load(&cache, &mut rng, 500, true);
        cache.invalidate();
        let first = cache.top();
        cache.invalidate();
        cache.recalculate();
        assert_eq!(first, cache.top());
    }

    #[test]
    fn test_shared_between_threads<C: WithCapacity>() {
        let cache = Arc::new(C::with_capacity(16));
        std::thread::scope(|scope| {
            for t in 0..4u64 {
                let cache = Arc::clone(&cache);
                scope.spawn(move || {
                    for i in 0..500u64 {
                        cache.add(t * 500 + i, i);
                        if i % 100 == 0 {
                            assert!(cache.top().len() <= 16);
                        }
                    }
                });
            }
        });
        cache.invalidate();
        assert!(cache.len() <= 16);
        assert!(cache.ids().windows(2).all(|w| w[0] < w[1]));
    }

    #[instantiate_tests(<RankCache>)]
    mod ranked {}

    #[instantiate_tests(<LruCache>)]
    mod lru {}

    #[instantiate_tests(<NopCache>)]
    mod none {}

    #[instantiate_tests(<GenericCache>)]
    mod generic {}
}
