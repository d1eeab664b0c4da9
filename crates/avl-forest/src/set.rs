use std::fmt::{self, Debug};

use tracing::debug;

use crate::config::TreeConfig;
use crate::cursor::{Cursor, Keys};
use crate::error::Result;
use crate::tree::{IntoIter, Tree};

/// Ordered set of unique values, backed by an AVL [`Tree`] with unit
/// payloads.
pub struct AvlSet<T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    tree: Tree<T, (), C>,
}

impl<T> AvlSet<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            tree: Tree::with_config(config),
        }
    }
}

impl<T> Default for AvlSet<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlSet<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: Tree::with_comparator(comparator),
        }
    }

    pub fn with_comparator_and_config(comparator: C, config: TreeConfig) -> Self {
        Self {
            tree: Tree::with_comparator_and_config(comparator, config),
        }
    }

    pub fn size(&self) -> usize {
        self.tree.len()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Inserts `value` unless an equal one is present.
    ///
    /// Returns the cursor of the stored value and whether it was inserted.
    pub fn insert(&mut self, value: T) -> (Cursor, bool) {
        self.tree.insert_unique(value, ())
    }

    pub fn insert_many<I>(&mut self, items: I) -> Vec<(Cursor, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .map(|v| self.tree.insert_unique(v, ()))
            .collect()
    }

    pub fn erase(&mut self, cursor: Cursor) -> Option<T> {
        self.tree.erase(cursor).map(|(v, _)| v)
    }

    /// Removes `value`, returning whether it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.tree.remove(value).is_some()
    }

    /// Moves every value of `other` not already in `self`; `other` ends up
    /// empty either way.
    pub fn merge(&mut self, other: &mut Self) {
        debug!(incoming = other.len(), "merge set");
        while let Some((v, ())) = other.tree.erase(other.tree.begin()) {
            self.tree.insert_unique(v, ());
        }
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains(value)
    }

    pub fn find(&self, value: &T) -> Cursor {
        self.tree.find(value)
    }

    pub fn count(&self, value: &T) -> usize {
        usize::from(self.contains(value))
    }

    pub fn lower_bound(&self, value: &T) -> Cursor {
        self.tree.lower_bound(value)
    }

    pub fn upper_bound(&self, value: &T) -> Cursor {
        self.tree.upper_bound(value)
    }

    pub fn begin(&self) -> Cursor {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor {
        self.tree.end()
    }

    pub fn next(&self, cursor: Cursor) -> Cursor {
        self.tree.next(cursor)
    }

    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.tree.prev(cursor)
    }

    /// Value at `cursor`; `end` resolves to the largest value.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        self.tree.key(cursor)
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|(v, _)| v)
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|(v, _)| v)
    }

    pub fn iter(&self) -> Keys<'_, T, ()> {
        Keys::new(self.tree.iter())
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn assert_valid(&self) -> Result<()> {
        self.tree.assert_valid()
    }
}

impl<T, C> Clone for AvlSet<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> i32 + Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T, C> Debug for AvlSet<T, C>
where
    T: Debug,
    C: Fn(&T, &T) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for AvlSet<T, C>
where
    T: PartialEq,
    C: Fn(&T, &T) -> i32,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for AvlSet<T, C>
where
    T: Eq,
    C: Fn(&T, &T) -> i32,
{
}

impl<T> FromIterator<T> for AvlSet<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, const N: usize> From<[T; N]> for AvlSet<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T, C> Extend<T> for AvlSet<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.tree.insert_unique(v, ());
        }
    }
}

impl<'a, T, C> IntoIterator for &'a AvlSet<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = &'a T;
    type IntoIter = Keys<'a, T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over the values of an [`AvlSet`].
pub struct SetIntoIter<T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    inner: IntoIter<T, (), C>,
}

impl<T, C> SetIntoIter<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    pub(crate) fn new(inner: IntoIter<T, (), C>) -> Self {
        Self { inner }
    }
}

impl<T, C> Iterator for SetIntoIter<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(v, _)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, C> DoubleEndedIterator for SetIntoIter<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|(v, _)| v)
    }
}

impl<T, C> ExactSizeIterator for SetIntoIter<T, C> where C: Fn(&T, &T) -> i32 {}

impl<T, C> IntoIterator for AvlSet<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = T;
    type IntoIter = SetIntoIter<T, C>;

    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter::new(self.tree.into_iter())
    }
}
