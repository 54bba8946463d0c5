use std::collections::HashMap;

use crate::cache::Cache;

use super::{AccessResult, Replace};

/// Least-recently-used replacement: any access, hit or miss-insert,
/// makes its block the most recent; eviction takes the front.
///
/// `index` maps every resident block address to its slot handle inside
/// its set's order, so a hit repositions in O(1) instead of scanning.
/// One map serves all sets: a block address belongs to exactly one set
/// for the model's lifetime (set index is a pure function of the
/// config), so keys from different sets cannot collide. A geometry that
/// let a block reside in more than one set would break this and force
/// the index to become per-set.
pub struct Lru {
    index: HashMap<usize, u16>,
}

impl Lru {
    pub fn new() -> Self {
        Lru {
            index: HashMap::new(),
        }
    }
}

impl Default for Lru {
    fn default() -> Self {
        Lru::new()
    }
}

impl Replace for Lru {
    fn access(cache: &mut Cache<Self>, set_index: usize, block: usize) -> AccessResult {
        let set = &mut cache.sets[set_index];
        let index = &mut cache.repl.index;

        if let Some(&handle) = index.get(&block) {
            debug_assert_eq!(set.block_at(handle), block);
            set.move_to_back(handle);
            return AccessResult::Hit;
        }

        if set.is_full() {
            if let Some(victim) = set.evict_candidate() {
                set.pop_front();
                index.remove(&victim);
            }
        }
        let handle = set.push_back(block);
        index.insert(block, handle);

        AccessResult::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Cache, Model};
    use crate::replace::AccessResult::{Hit, Miss};

    // One set of 2 ways so every block contends for the same set.
    fn one_set_cache(ways: usize) -> Cache<Lru> {
        Cache::new("lru".into(), 1, 1, ways, Lru::new())
    }

    #[test]
    fn filling_then_overflowing_evicts_least_recent() {
        let mut cache = one_set_cache(2);
        assert_eq!(cache.access(1).unwrap(), Miss);
        assert_eq!(cache.access(2).unwrap(), Miss);
        // b1 is the least recently used, so b3 pushes it out.
        assert_eq!(cache.access(3).unwrap(), Miss);
        assert_eq!(cache.access(1).unwrap(), Miss);
    }

    #[test]
    fn intervening_hit_redirects_eviction() {
        let mut cache = one_set_cache(2);
        assert_eq!(cache.access(1).unwrap(), Miss);
        assert_eq!(cache.access(2).unwrap(), Miss);
        // Touch b1: now b2 is the least recently used.
        assert_eq!(cache.access(1).unwrap(), Hit);
        assert_eq!(cache.access(3).unwrap(), Miss);
        assert_eq!(cache.access(1).unwrap(), Hit);
        assert_eq!(cache.access(2).unwrap(), Miss);
    }

    #[test]
    fn repeated_hit_moves_to_most_recent_without_changing_membership() {
        let mut cache = one_set_cache(3);
        for b in [1, 2, 3] {
            assert_eq!(cache.access(b).unwrap(), Miss);
        }
        assert_eq!(cache.access(1).unwrap(), Hit);
        assert_eq!(cache.access(1).unwrap(), Hit);

        let order: Vec<usize> = cache.sets[0].iter().collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn index_tracks_evictions() {
        let mut cache = one_set_cache(2);
        for b in [1, 2, 3, 4] {
            assert_eq!(cache.access(b).unwrap(), Miss);
        }
        // Only the two survivors are indexed.
        assert_eq!(cache.repl.index.len(), 2);
        assert!(cache.repl.index.contains_key(&3));
        assert!(cache.repl.index.contains_key(&4));
    }
}
