/// Sentinel slot handle, also the capacity ceiling for one set.
const NIL: u16 = u16::MAX;

#[derive(Debug, Clone, Copy)]
struct Slot {
    block: usize,
    prev: u16,
    next: u16,
}

/// The resident blocks of one cache set, ordered from front (oldest /
/// least recently used, the eviction candidate) to back (newest / most
/// recently used).
///
/// Storage is a fixed arena of `ways` slots threaded into a doubly
/// linked order, so `len() <= ways` holds structurally and repositioning
/// or removing a slot by handle is O(1). Handles returned by
/// [`push_back`](SetStore::push_back) stay valid until the slot is
/// evicted via [`pop_front`](SetStore::pop_front).
#[derive(Debug)]
pub struct SetStore {
    slots: Vec<Slot>,
    head: u16,
    tail: u16,
    free: Vec<u16>,
}

impl SetStore {
    /// Handles are `u16` with [`NIL`] reserved, capping how many ways
    /// one set can track. Configuration validation enforces this bound
    /// before any set is built.
    pub const MAX_WAYS: usize = NIL as usize - 1;

    pub fn new(ways: usize) -> Self {
        assert!(ways > 0 && ways <= Self::MAX_WAYS);
        SetStore {
            slots: vec![
                Slot {
                    block: 0,
                    prev: NIL,
                    next: NIL,
                };
                ways
            ],
            head: NIL,
            tail: NIL,
            free: (0..ways as u16).rev().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head == NIL
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Walks the order front to back.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut cur = self.head;
        std::iter::from_fn(move || {
            if cur == NIL {
                return None;
            }
            let slot = &self.slots[cur as usize];
            cur = slot.next;
            Some(slot.block)
        })
    }

    /// Linear membership test, bounded by the associativity.
    pub fn contains(&self, block: usize) -> bool {
        self.iter().any(|b| b == block)
    }

    /// Peeks at the front block without removing it.
    pub fn evict_candidate(&self) -> Option<usize> {
        (self.head != NIL).then(|| self.slots[self.head as usize].block)
    }

    /// Removes the front block and returns it, freeing its slot.
    pub fn pop_front(&mut self) -> Option<usize> {
        if self.head == NIL {
            return None;
        }
        let handle = self.head;
        let block = self.slots[handle as usize].block;
        self.unlink(handle);
        self.free.push(handle);
        Some(block)
    }

    /// Appends `block` at the most-recent end and returns its handle.
    /// The block must not already be resident, and a full set must be
    /// evicted from first.
    pub fn push_back(&mut self, block: usize) -> u16 {
        debug_assert!(!self.contains(block));
        let handle = self.free.pop().expect("set is full, evict before inserting");
        self.slots[handle as usize].block = block;
        self.link_back(handle);
        handle
    }

    /// Repositions a resident slot at the most-recent end.
    pub fn move_to_back(&mut self, handle: u16) {
        if self.tail == handle {
            return;
        }
        self.unlink(handle);
        self.link_back(handle);
    }

    pub fn block_at(&self, handle: u16) -> usize {
        self.slots[handle as usize].block
    }

    fn unlink(&mut self, handle: u16) {
        let Slot { prev, next, .. } = self.slots[handle as usize];
        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev as usize].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next as usize].prev = prev;
        }
        self.slots[handle as usize].prev = NIL;
        self.slots[handle as usize].next = NIL;
    }

    fn link_back(&mut self, handle: u16) {
        self.slots[handle as usize].prev = self.tail;
        self.slots[handle as usize].next = NIL;
        if self.tail == NIL {
            self.head = handle;
        } else {
            self.slots[self.tail as usize].next = handle;
        }
        self.tail = handle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(set: &SetStore) -> Vec<usize> {
        set.iter().collect()
    }

    #[test]
    fn push_back_keeps_insertion_order() {
        let mut set = SetStore::new(4);
        set.push_back(10);
        set.push_back(20);
        set.push_back(30);
        assert_eq!(order(&set), vec![10, 20, 30]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_full());
        assert_eq!(set.evict_candidate(), Some(10));
    }

    #[test]
    fn move_to_back_reorders_without_changing_membership() {
        let mut set = SetStore::new(4);
        let a = set.push_back(1);
        set.push_back(2);
        set.push_back(3);
        set.move_to_back(a);
        assert_eq!(order(&set), vec![2, 3, 1]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.block_at(a), 1);

        // Already at the back: a no-op.
        set.move_to_back(a);
        assert_eq!(order(&set), vec![2, 3, 1]);
    }

    #[test]
    fn move_middle_to_back() {
        let mut set = SetStore::new(4);
        set.push_back(1);
        let b = set.push_back(2);
        set.push_back(3);
        set.move_to_back(b);
        assert_eq!(order(&set), vec![1, 3, 2]);
        assert_eq!(set.evict_candidate(), Some(1));
    }

    #[test]
    fn pop_front_frees_a_slot_for_reuse() {
        let mut set = SetStore::new(2);
        set.push_back(7);
        set.push_back(8);
        assert!(set.is_full());

        assert_eq!(set.pop_front(), Some(7));
        assert!(!set.is_full());
        assert!(!set.contains(7));

        set.push_back(9);
        assert_eq!(order(&set), vec![8, 9]);
        assert!(set.is_full());
    }

    #[test]
    fn empty_set_has_no_candidate() {
        let mut set = SetStore::new(2);
        assert!(set.is_empty());
        assert_eq!(set.evict_candidate(), None);
        assert_eq!(set.pop_front(), None);
    }

    #[test]
    fn handles_stay_valid_across_unrelated_evictions() {
        let mut set = SetStore::new(3);
        set.push_back(1);
        let b = set.push_back(2);
        set.push_back(3);

        assert_eq!(set.pop_front(), Some(1));
        set.push_back(4);

        assert_eq!(set.block_at(b), 2);
        set.move_to_back(b);
        assert_eq!(order(&set), vec![3, 4, 2]);
    }
}
