use crate::cache::Cache;

use super::{AccessResult, Replace};

/// First-in-first-out replacement: the order is pure insertion order,
/// hits never reorder anything, and eviction takes the oldest block.
///
/// Membership is a linear scan over at most `associativity` slots; the
/// policy keeps no state of its own.
pub struct Fifo {}

impl Fifo {
    pub fn new() -> Self {
        Fifo {}
    }
}

impl Default for Fifo {
    fn default() -> Self {
        Fifo::new()
    }
}

impl Replace for Fifo {
    fn access(cache: &mut Cache<Self>, set_index: usize, block: usize) -> AccessResult {
        let set = &mut cache.sets[set_index];

        if set.contains(block) {
            return AccessResult::Hit;
        }

        if set.is_full() {
            set.pop_front();
        }
        set.push_back(block);

        AccessResult::Miss
    }
}
