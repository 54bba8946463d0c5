use serde::Deserialize;

use crate::{
    cache::{Cache, Model},
    error::ConfigError,
    replace::{fifo::Fifo, lru::Lru},
    set::SetStore,
};

/// Replacement policy selector. This enum exists only at the
/// configuration boundary; past [`CacheConfig::build`] each model runs a
/// single concrete [`Replace`](crate::replace::Replace) implementation
/// and never branches on the variant again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Policy {
    #[serde(alias = "lru", alias = "LRU")]
    Lru,
    #[serde(alias = "fifo", alias = "FIFO")]
    Fifo,
}

/// One cache geometry to model. Sizes are in bytes.
#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    pub name: String,
    pub cache_size: usize,
    pub block_size: usize,
    pub associativity: usize,
    pub policy: Policy,
}

/// A full run: several models compared over the same trace.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub caches: Vec<CacheConfig>,
}

/// Block and set counts derived from a validated [`CacheConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub num_blocks: usize,
    pub num_sets: usize,
}

impl CacheConfig {
    /// Checks the divisibility rules and derives the block/set counts.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.associativity == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if self.associativity > SetStore::MAX_WAYS {
            return Err(ConfigError::OversizedAssociativity {
                associativity: self.associativity,
                max: SetStore::MAX_WAYS,
            });
        }
        if self.cache_size % self.block_size != 0 {
            return Err(ConfigError::UnalignedCacheSize {
                cache_size: self.cache_size,
                block_size: self.block_size,
            });
        }
        let num_blocks = self.cache_size / self.block_size;
        if num_blocks % self.associativity != 0 {
            return Err(ConfigError::UnalignedSets {
                num_blocks,
                associativity: self.associativity,
            });
        }
        let num_sets = num_blocks / self.associativity;
        if num_sets == 0 {
            return Err(ConfigError::NoSets);
        }
        Ok(Geometry {
            num_blocks,
            num_sets,
        })
    }

    /// Builds the model this config describes, or fails with the first
    /// violated geometry rule. No partial model is produced on error.
    pub fn build(self) -> Result<Box<dyn Model>, ConfigError> {
        let geom = self.geometry()?;
        log::debug!(
            "{}: {} blocks in {} sets of {} ({:?})",
            self.name,
            geom.num_blocks,
            geom.num_sets,
            self.associativity,
            self.policy
        );
        let model: Box<dyn Model> = match self.policy {
            Policy::Lru => Box::new(Cache::new(
                self.name,
                self.block_size,
                geom.num_sets,
                self.associativity,
                Lru::new(),
            )),
            Policy::Fifo => Box::new(Cache::new(
                self.name,
                self.block_size,
                geom.num_sets,
                self.associativity,
                Fifo::new(),
            )),
        };
        Ok(model)
    }
}

impl Config {
    pub fn to_models(self) -> Result<Vec<Box<dyn Model>>, ConfigError> {
        self.caches.into_iter().map(CacheConfig::build).collect()
    }
}
