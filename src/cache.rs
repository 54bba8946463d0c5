use std::iter;

use serde::Serialize;

use crate::{
    error::AddressError,
    replace::{AccessResult, Replace},
    set::SetStore,
};

/// A raw address split into its block address and set index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr {
    pub block: usize,
    pub set: usize,
}

/// Pure address decoder for one cache geometry: `block = addr /
/// block_size`, `set = block % num_sets`.
///
/// Plain integer arithmetic rather than tag/index/offset bit fields, so
/// the geometry only has to satisfy the divisibility rules checked at
/// configuration time, not be a power of two. Callers needing bit-exact
/// hardware field extraction would swap this type out.
#[derive(Debug, Clone, Copy)]
pub struct AddrDecoder {
    block_size: usize,
    num_sets: usize,
}

impl AddrDecoder {
    pub fn new(block_size: usize, num_sets: usize) -> Self {
        debug_assert!(block_size > 0 && num_sets > 0);
        AddrDecoder {
            block_size,
            num_sets,
        }
    }

    pub fn decode(&self, addr: usize) -> Addr {
        let block = addr / self.block_size;
        Addr {
            block,
            set: block % self.num_sets,
        }
    }
}

/// Aggregate outcome of one model over a trace.
#[derive(Debug, Serialize)]
pub struct CacheStats {
    pub name: String,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// A set-associative cache model running one replacement policy `R`.
///
/// The policy type is chosen once at construction (see
/// [`CacheConfig::build`](crate::config::CacheConfig::build)); from then
/// on every access flows through the same [`Replace`] transition and
/// only the addressed set's state changes.
#[derive(Debug)]
pub struct Cache<R: Replace> {
    name: String,
    pub(crate) sets: Vec<SetStore>,
    decoder: AddrDecoder,
    pub(crate) repl: R,
    hits: u64,
    misses: u64,
}

impl<R: Replace> Cache<R> {
    pub fn new(name: String, block_size: usize, num_sets: usize, ways: usize, repl: R) -> Self {
        Cache {
            name,
            sets: iter::repeat_with(|| SetStore::new(ways)).take(num_sets).collect(),
            decoder: AddrDecoder::new(block_size, num_sets),
            repl,
            hits: 0,
            misses: 0,
        }
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn decoder(&self) -> AddrDecoder {
        self.decoder
    }
}

/// Object-safe view of a cache model, so one run can drive a mixed
/// collection of policies built from a single config.
pub trait Model {
    /// Classifies one access. A negative address is rejected without
    /// touching any set or counter; the model stays usable.
    fn access(&mut self, addr: i64) -> Result<AccessResult, AddressError>;
    fn name(&self) -> &str;
    /// Resets hit/miss counters without disturbing residency. Used to
    /// discard the warmup phase of a trace.
    fn clear_stats(&mut self);
    fn stats(&self) -> CacheStats;
}

impl<R: Replace> Model for Cache<R> {
    fn access(&mut self, addr: i64) -> Result<AccessResult, AddressError> {
        if addr < 0 {
            return Err(AddressError(addr));
        }
        let Addr { block, set } = self.decoder.decode(addr as usize);
        let result = R::access(self, set, block);
        match result {
            AccessResult::Hit => self.hits += 1,
            AccessResult::Miss => self.misses += 1,
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn clear_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    fn stats(&self) -> CacheStats {
        let total = (self.hits + self.misses) as f64;
        let hit_rate = if total > 0.0 {
            self.hits as f64 / total
        } else {
            0.0
        };
        CacheStats {
            name: self.name.clone(),
            hits: self.hits,
            misses: self.misses,
            hit_rate,
        }
    }
}
