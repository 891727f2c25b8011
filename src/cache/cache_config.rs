use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use log::error;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::constants::{CACHE_CONFIG_FILE, DEFAULT_CACHE_SIZE, DEFAULT_LOAD_FACTOR};
use crate::common::errors::CacheError;
use crate::common::file_operations::{atomic_save_json, read_json, FileOperationError};

/// Which cache keeps the top-K of a fragment.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Default, Clone, Copy, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CacheType {
    /// Score-ordered view, rebuilt by reconciliation.
    #[default]
    #[serde(rename = "ranked")]
    Ranked,

    /// Keeps the most recently written identifiers.
    #[serde(rename = "lru")]
    Lru,

    /// Keeps nothing.
    #[serde(rename = "none")]
    None,
}

impl Display for CacheType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::Ranked => write!(f, "ranked"),
            CacheType::Lru => write!(f, "lru"),
            CacheType::None => write!(f, "none"),
        }
    }
}

impl FromStr for CacheType {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ranked" => Ok(CacheType::Ranked),
            "lru" => Ok(CacheType::Lru),
            "none" => Ok(CacheType::None),
            _ => Err(CacheError::UnknownCacheType(s.to_string())),
        }
    }
}

fn default_cache_size() -> u32 {
    DEFAULT_CACHE_SIZE
}

fn default_load_factor() -> f64 {
    DEFAULT_LOAD_FACTOR
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy, TypedBuilder)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    #[serde(default)]
    #[builder(default)]
    pub cache_type: CacheType,

    /// Capacity of the cache; 0 keeps it empty.
    #[serde(default = "default_cache_size")]
    #[builder(default = DEFAULT_CACHE_SIZE)]
    pub cache_size: u32,

    /// Multiple of `cache_size` after which `add` reconciles, and past which a trimming
    /// cache shrinks its store.
    #[serde(default = "default_load_factor")]
    #[builder(default = DEFAULT_LOAD_FACTOR)]
    pub load_factor: f64,

    /// Drop store entries that rank below the cutoff once the store outgrows the threshold.
    #[serde(default)]
    #[builder(default = false)]
    pub trim_store: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig::builder().build()
    }
}

impl CacheConfig {
    pub fn new(cache_type: CacheType, cache_size: u32) -> Self {
        CacheConfig::builder().cache_type(cache_type).cache_size(cache_size).build()
    }

    pub fn validate(&self) -> Result<(), CacheError> {
        if !self.load_factor.is_finite() || self.load_factor < 1.0 {
            let error_msg = format!("`load_factor` must be a finite number >= 1.0, got {}.", self.load_factor);
            error!("{}", error_msg);
            return Err(CacheError::InvalidCacheConfig(error_msg));
        }
        Ok(())
    }

    pub fn load(index_path: &Path) -> Result<Self, CacheError> {
        let config: CacheConfig = read_json(&index_path.join(CACHE_CONFIG_FILE))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, index_path: &Path) -> Result<(), CacheError> {
        self.validate()?;
        if !index_path.exists() {
            std::fs::create_dir_all(index_path).map_err(FileOperationError::IoError)?;
        }
        Ok(atomic_save_json(&index_path.join(CACHE_CONFIG_FILE), self)?)
    }
}
