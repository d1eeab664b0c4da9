//! The tree engine shared by [`AvlMap`](crate::AvlMap),
//! [`AvlSet`](crate::AvlSet) and [`AvlMultiset`](crate::AvlMultiset).
//!
//! A [`Tree`] owns an arena of [`AvlNode`]s and an explicit optional root.
//! Every structural operation the containers expose is implemented here once;
//! the containers only pick the duplicate policy and the value layout.

use std::fmt::{self, Debug};
use std::mem;

use tracing::{debug, trace};

use crate::avl::types::key_of;
use crate::avl::util::{
    assert_avl_tree, find_slot, insert_left, insert_right, print, remove, Nodes, Slot,
};
use crate::avl::AvlNode;
use crate::config::{InsertPolicy, TreeConfig};
use crate::cursor::{Cursor, Iter};
use crate::error::Result;
use crate::types::default_comparator;
use crate::util::{self, first, last};

/// Generic ordered tree keyed by `K` with payload `V`.
///
/// `C` is a three-way comparator over keys (see
/// [`default_comparator`](crate::types::default_comparator)).
pub struct Tree<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    root: Option<u32>,
    size: usize,
    comparator: C,
    config: TreeConfig,
    arena: Nodes<K, V>,
}

impl<K, V> Tree<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self::with_comparator_and_config(default_comparator::<K>, config)
    }
}

impl<K, V> Default for Tree<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Tree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_and_config(comparator, TreeConfig::default())
    }

    pub fn with_comparator_and_config(comparator: C, config: TreeConfig) -> Self {
        Self {
            root: None,
            size: 0,
            comparator,
            config,
            arena: Nodes::new(),
        }
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Upper bound on the number of elements the tree can index.
    pub fn max_size(&self) -> usize {
        let per_node = mem::size_of::<AvlNode<K, V>>().max(1);
        (isize::MAX as usize / per_node).min(u32::MAX as usize)
    }

    /// Inserts `key`/`value` under `policy`.
    ///
    /// Returns a cursor to the inserted node and `true`, or, when `policy` is
    /// [`InsertPolicy::Unique`] and an equal key exists, a cursor to that
    /// node and `false`. A rejected insert allocates nothing.
    pub fn insert(&mut self, key: K, value: V, policy: InsertPolicy) -> (Cursor, bool) {
        let slot = find_slot(&self.arena, self.root, &key, &self.comparator, policy);
        let n = match slot {
            Slot::Occupied(existing) => return (self.cursor(Some(existing)), false),
            Slot::Root => {
                let n = self.arena.alloc(AvlNode::new(key, value));
                self.root = Some(n);
                n
            }
            Slot::Left(p) => {
                let n = self.arena.alloc(AvlNode::new(key, value));
                insert_left(&mut self.arena, &mut self.root, n, p);
                n
            }
            Slot::Right(p) => {
                let n = self.arena.alloc(AvlNode::new(key, value));
                insert_right(&mut self.arena, &mut self.root, n, p);
                n
            }
        };
        self.size += 1;
        (self.cursor(Some(n)), true)
    }

    pub fn insert_unique(&mut self, key: K, value: V) -> (Cursor, bool) {
        self.insert(key, value, InsertPolicy::Unique)
    }

    pub fn insert_non_unique(&mut self, key: K, value: V) -> (Cursor, bool) {
        self.insert(key, value, InsertPolicy::NonUnique)
    }

    /// Cursor to a node equal to `key`, or [`end`](Self::end).
    pub fn find(&self, key: &K) -> Cursor {
        self.cursor(util::find(
            &self.arena,
            self.root,
            key,
            key_of::<K, V>,
            &self.comparator,
        ))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_accessible()
    }

    /// First node whose key is not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Cursor {
        self.cursor(util::lower_bound(
            &self.arena,
            self.root,
            key,
            key_of::<K, V>,
            &self.comparator,
        ))
    }

    /// First node whose key is greater than `key`.
    pub fn upper_bound(&self, key: &K) -> Cursor {
        self.cursor(util::upper_bound(
            &self.arena,
            self.root,
            key,
            key_of::<K, V>,
            &self.comparator,
        ))
    }

    pub fn equal_range(&self, key: &K) -> (Cursor, Cursor) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    pub fn count(&self, key: &K) -> usize {
        util::count(
            &self.arena,
            self.root,
            key,
            &key_of::<K, V>,
            &self.comparator,
        )
    }

    /// Removes the node at `cursor` and returns its entry.
    ///
    /// The end cursor, or a cursor whose node is already gone, removes
    /// nothing, even if its slot has since been reused. Cursors to every
    /// other node stay valid.
    pub fn erase(&mut self, cursor: Cursor) -> Option<(K, V)> {
        let n = self.live(cursor)?;
        remove(&mut self.arena, &mut self.root, n, self.config.balance);
        self.size -= 1;
        trace!(node = n, size = self.size, "erase");
        Some(self.arena.free(n).into_entry())
    }

    /// Removes the first node (in iteration order) equal to `key`.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let lb = self.lower_bound(key);
        let n = lb.node()?;
        if (self.comparator)(&self.arena[n].k, key) != 0 {
            return None;
        }
        self.erase(lb)
    }

    pub fn clear(&mut self) {
        debug!(size = self.size, "clear");
        self.arena.clear();
        self.root = None;
        self.size = 0;
    }

    /// Moves the contents out, leaving `self` empty with the same comparator
    /// and configuration.
    pub fn take(&mut self) -> Self
    where
        C: Clone,
    {
        let empty = Self::with_comparator_and_config(self.comparator.clone(), self.config);
        mem::replace(self, empty)
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Cursor to the smallest element; [`end`](Self::end) when empty.
    pub fn begin(&self) -> Cursor {
        self.cursor(first(&self.arena, self.root))
    }

    /// One-past-the-largest position.
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// In-order successor. Stepping past the largest element yields `end`;
    /// stepping from `end` or from a stale cursor yields `end`.
    pub fn next(&self, cursor: Cursor) -> Cursor {
        match self.live(cursor) {
            Some(i) => self.cursor(util::next(&self.arena, i)),
            None => Cursor::END,
        }
    }

    /// In-order predecessor. From `end` this is the largest element; from
    /// the smallest element or a stale cursor it is `end`.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        if cursor.is_end() {
            return self.cursor(last(&self.arena, self.root));
        }
        match self.live(cursor) {
            Some(i) => self.cursor(util::prev(&self.arena, i)),
            None => Cursor::END,
        }
    }

    fn cursor(&self, node: Option<u32>) -> Cursor {
        match node {
            Some(i) => Cursor::at(i, self.arena.generation(i)),
            None => Cursor::END,
        }
    }

    /// Node of a cursor issued for a node that is still in the tree.
    fn live(&self, cursor: Cursor) -> Option<u32> {
        let i = cursor.node()?;
        self.arena.is_current(i, cursor.generation()).then_some(i)
    }

    /// The end position dereferences to the largest element.
    fn resolve(&self, cursor: Cursor) -> Option<u32> {
        if cursor.is_end() {
            return last(&self.arena, self.root);
        }
        self.live(cursor)
    }

    /// Entry at `cursor`; at `end` this is the largest entry.
    pub fn get(&self, cursor: Cursor) -> Option<(&K, &V)> {
        let n = &self.arena[self.resolve(cursor)?];
        Some((&n.k, &n.v))
    }

    pub fn key(&self, cursor: Cursor) -> Option<&K> {
        self.get(cursor).map(|(k, _)| k)
    }

    pub fn value(&self, cursor: Cursor) -> Option<&V> {
        self.get(cursor).map(|(_, v)| v)
    }

    /// Mutable payload at `cursor`. Keys are never handed out mutably.
    pub fn value_mut(&mut self, cursor: Cursor) -> Option<&mut V> {
        let i = self.resolve(cursor)?;
        Some(&mut self.arena[i].v)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        first(&self.arena, self.root).map(|i| {
            let n = &self.arena[i];
            (&n.k, &n.v)
        })
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        last(&self.arena, self.root).map(|i| {
            let n = &self.arena[i];
            (&n.k, &n.v)
        })
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(
            &self.arena,
            first(&self.arena, self.root),
            last(&self.arena, self.root),
            self.size,
        )
    }

    /// Height of the whole tree; `0` when empty.
    pub fn height(&self) -> usize {
        self.root.map_or(0, |r| self.arena[r].height as usize)
    }

    /// Validates links, heights, ordering and size. In
    /// [`BalanceMode::Retrace`](crate::BalanceMode::Retrace) also checks the
    /// AVL balance bound.
    pub fn assert_valid(&self) -> Result<()> {
        assert_avl_tree(
            &self.arena,
            self.root,
            self.size,
            &self.comparator,
            self.config.is_strict(),
        )
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        print(&self.arena, self.root, "")
    }
}

impl<K, V, C> Clone for Tree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Fn(&K, &K) -> i32 + Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root,
            size: self.size,
            comparator: self.comparator.clone(),
            config: self.config,
            arena: self.arena.clone(),
        }
    }
}

impl<K, V, C> Debug for Tree<K, V, C>
where
    K: Debug,
    V: Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning in-order iterator. Each step unlinks the current extreme node.
pub struct IntoIter<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    tree: Tree<K, V, C>,
}

impl<K, V, C> Iterator for IntoIter<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let front = self.tree.begin();
        self.tree.erase(front)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<K, V, C> DoubleEndedIterator for IntoIter<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let back = self.tree.prev(self.tree.end());
        self.tree.erase(back)
    }
}

impl<K, V, C> ExactSizeIterator for IntoIter<K, V, C> where C: Fn(&K, &K) -> i32 {}

impl<K, V, C> IntoIterator for Tree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}
