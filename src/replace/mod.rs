pub mod fifo;
pub mod lru;

use crate::cache::Cache;

/// One replacement policy's state transition, applied on every access
/// to an already-decoded `(set_index, block)` pair. The policy decides
/// hit or miss, reorders the set, and evicts when the set is full; it
/// never touches any set other than `set_index`.
pub trait Replace: Sized {
    fn access(cache: &mut Cache<Self>, set_index: usize, block: usize) -> AccessResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessResult {
    Hit,
    Miss,
}
