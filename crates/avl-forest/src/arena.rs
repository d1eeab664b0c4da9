//! Slot arena with a free list.
//!
//! Nodes are addressed by stable `u32` indices. Freeing a node vacates its
//! slot and pushes the index onto the free list; the next allocation reuses
//! it. Every slot also carries a generation that changes whenever its node
//! is released, so an index held from before the release can be told apart
//! from the node that now occupies the slot.

use std::ops::{Index, IndexMut};

#[derive(Clone, Debug)]
pub struct Arena<N> {
    slots: Vec<Option<N>>,
    generations: Vec<u32>,
    free_list: Vec<u32>,
    len: usize,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores `node` and returns its index.
    pub fn alloc(&mut self, node: N) -> u32 {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx as usize] = Some(node);
            return idx;
        }
        let idx = u32::try_from(self.slots.len()).expect("arena index space exhausted");
        self.slots.push(Some(node));
        if self.generations.len() <= idx as usize {
            self.generations.push(0);
        }
        idx
    }

    /// Takes the node out of slot `idx` and recycles the slot.
    pub fn free(&mut self, idx: u32) -> N {
        let node = self.slots[idx as usize]
            .take()
            .unwrap_or_else(|| panic!("double free of arena slot {idx}"));
        self.bump(idx);
        self.free_list.push(idx);
        self.len -= 1;
        node
    }

    fn bump(&mut self, idx: u32) {
        let g = &mut self.generations[idx as usize];
        *g = g.wrapping_add(1);
    }

    /// Current generation of slot `idx`; `0` for a slot never allocated.
    pub fn generation(&self, idx: u32) -> u32 {
        self.generations.get(idx as usize).copied().unwrap_or(0)
    }

    /// Whether slot `idx` is occupied by the node issued at `generation`.
    pub fn is_current(&self, idx: u32, generation: u32) -> bool {
        self.contains(idx) && self.generation(idx) == generation
    }

    pub fn get(&self, idx: u32) -> Option<&N> {
        self.slots.get(idx as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut N> {
        self.slots.get_mut(idx as usize).and_then(Option::as_mut)
    }

    pub fn contains(&self, idx: u32) -> bool {
        self.get(idx).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node and releases the slot storage. Generations survive
    /// so indices issued before the clear stay stale.
    pub fn clear(&mut self) {
        for idx in 0..self.slots.len() as u32 {
            if self.contains(idx) {
                self.bump(idx);
            }
        }
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<u32> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, idx: u32) -> &N {
        match self.slots.get(idx as usize) {
            Some(Some(node)) => node,
            _ => panic!("vacant arena slot {idx}"),
        }
    }
}

impl<N> IndexMut<u32> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, idx: u32) -> &mut N {
        match self.slots.get_mut(idx as usize) {
            Some(Some(node)) => node,
            _ => panic!("vacant arena slot {idx}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_recycled() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.free(a), "a");
        assert!(!arena.contains(a));
        assert_eq!(arena.len(), 1);

        let c = arena.alloc("c");
        assert_eq!(c, a);
        assert_eq!(arena[c], "c");
        assert_eq!(arena[b], "b");
    }

    #[test]
    #[should_panic(expected = "vacant arena slot")]
    fn indexing_a_freed_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        arena.free(a);
        let _ = arena[a];
    }

    #[test]
    fn clear_resets_everything() {
        let mut arena = Arena::new();
        for i in 0..10 {
            arena.alloc(i);
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.alloc(42), 0);
        assert_eq!(arena.generation(0), 1);
    }

    #[test]
    fn reused_slot_gets_a_new_generation() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let issued = arena.generation(a);
        assert!(arena.is_current(a, issued));

        arena.free(a);
        assert!(!arena.is_current(a, issued));
        let b = arena.alloc('b');
        assert_eq!(b, a);
        assert!(!arena.is_current(b, issued));
        assert!(arena.is_current(b, arena.generation(b)));
    }
}
