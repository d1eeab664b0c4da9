//! Tree positions and borrowing iteration.
//!
//! A [`Cursor`] is a node index tagged with the arena generation it was
//! issued at (or the one-past-the-end marker). It does not borrow the tree,
//! so it can be held across mutations and handed back to
//! [`Tree::erase`](crate::tree::Tree::erase). Stepping and dereferencing go
//! through the owning tree. Erasing a cursor's node invalidates that cursor
//! only, and the tree recognises it as stale even after the slot is reused.

use std::iter::FusedIterator;

use crate::avl::util::Nodes;
use crate::util::{next, prev};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    node: Option<u32>,
    generation: u32,
}

impl Cursor {
    /// The one-past-the-end position. Equal to `end()` of every tree.
    pub const END: Cursor = Cursor {
        node: None,
        generation: 0,
    };

    pub(crate) fn at(node: u32, generation: u32) -> Self {
        Self {
            node: Some(node),
            generation,
        }
    }

    /// Arena index of the node, `None` at the end position.
    pub fn node(&self) -> Option<u32> {
        self.node
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Whether the cursor points at an element rather than past the end.
    pub fn is_accessible(&self) -> bool {
        self.node.is_some()
    }
}

/// In-order iterator over `(&K, &V)`.
pub struct Iter<'a, K, V> {
    arena: &'a Nodes<K, V>,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        arena: &'a Nodes<K, V>,
        front: Option<u32>,
        back: Option<u32>,
        remaining: usize,
    ) -> Self {
        Self {
            arena,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let arena = self.arena;
        let i = self.front?;
        self.remaining -= 1;
        self.front = next(arena, i);
        let n = &arena[i];
        Some((&n.k, &n.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let arena = self.arena;
        let i = self.back?;
        self.remaining -= 1;
        self.back = prev(arena, i);
        let n = &arena[i];
        Some((&n.k, &n.v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// In-order iterator over keys.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// In-order iterator over values.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}
