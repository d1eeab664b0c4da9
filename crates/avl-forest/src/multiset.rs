use std::fmt::{self, Debug};

use tracing::debug;

use crate::config::TreeConfig;
use crate::cursor::{Cursor, Keys};
use crate::error::Result;
use crate::set::SetIntoIter;
use crate::tree::Tree;

/// Ordered multiset. Equal values are kept in insertion order.
pub struct AvlMultiset<T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    tree: Tree<T, (), C>,
}

impl<T> AvlMultiset<T, fn(&T, &T) -> i32>
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

impl<T> Default for AvlMultiset<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlMultiset<T, C>
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

    /// Inserts `value` after every element equal to it. Always succeeds.
    pub fn insert(&mut self, value: T) -> Cursor {
        self.tree.insert_non_unique(value, ()).0
    }

    /// Inserts every value. Each flag is always `true`.
    pub fn insert_many<I>(&mut self, items: I) -> Vec<(Cursor, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .map(|v| self.tree.insert_non_unique(v, ()))
            .collect()
    }

    pub fn erase(&mut self, cursor: Cursor) -> Option<T> {
        self.tree.erase(cursor).map(|(v, _)| v)
    }

    /// Removes the first element equal to `value`.
    pub fn remove_one(&mut self, value: &T) -> bool {
        self.tree.remove(value).is_some()
    }

    /// Removes every element equal to `value` and returns how many went.
    pub fn remove_all(&mut self, value: &T) -> usize {
        let mut removed = 0;
        while self.tree.remove(value).is_some() {
            removed += 1;
        }
        removed
    }

    /// Moves every element of `other` into `self`, duplicates included.
    pub fn merge(&mut self, other: &mut Self) {
        debug!(incoming = other.len(), "merge multiset");
        while let Some((v, ())) = other.tree.erase(other.tree.begin()) {
            self.tree.insert_non_unique(v, ());
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

    /// Cursor to the first element equal to `value`, or `end`.
    pub fn find(&self, value: &T) -> Cursor {
        let lb = self.tree.lower_bound(value);
        if lb.is_end() {
            return lb;
        }
        match self.tree.key(lb) {
            Some(k) if (self.tree.comparator())(k, value) == 0 => lb,
            _ => Cursor::END,
        }
    }

    pub fn count(&self, value: &T) -> usize {
        self.tree.count(value)
    }

    /// `[lower_bound, upper_bound)` for `value`.
    pub fn equal_range(&self, value: &T) -> (Cursor, Cursor) {
        self.tree.equal_range(value)
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

impl<T, C> Clone for AvlMultiset<T, C>
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

impl<T, C> Debug for AvlMultiset<T, C>
where
    T: Debug,
    C: Fn(&T, &T) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for AvlMultiset<T, C>
where
    T: PartialEq,
    C: Fn(&T, &T) -> i32,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for AvlMultiset<T, C>
where
    T: Eq,
    C: Fn(&T, &T) -> i32,
{
}

impl<T> FromIterator<T> for AvlMultiset<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, const N: usize> From<[T; N]> for AvlMultiset<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T, C> Extend<T> for AvlMultiset<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.tree.insert_non_unique(v, ());
        }
    }
}

impl<'a, T, C> IntoIterator for &'a AvlMultiset<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = &'a T;
    type IntoIter = Keys<'a, T, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for AvlMultiset<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = T;
    type IntoIter = SetIntoIter<T, C>;

    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter::new(self.tree.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_keep_insertion_order() {
        let mut ms = AvlMultiset::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0 - b.0);
        for v in [(2, 'a'), (1, 'x'), (2, 'b'), (2, 'c'), (3, 'y')] {
            ms.insert(v);
        }
        let tags: Vec<char> = ms.iter().map(|v| v.1).collect();
        assert_eq!(tags, vec!['x', 'a', 'b', 'c', 'y']);
        assert_eq!(ms.get(ms.find(&(2, '?'))), Some(&(2, 'a')));
        assert_eq!(ms.count(&(2, '?')), 3);
    }

    #[test]
    fn remove_all_reports_count() {
        let mut ms = AvlMultiset::from([4, 1, 4, 4, 2]);
        assert_eq!(ms.remove_all(&4), 3);
        assert_eq!(ms.remove_all(&4), 0);
        assert_eq!(ms.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        ms.assert_valid().unwrap();
    }

    #[test]
    fn find_misses_report_end() {
        let ms = AvlMultiset::from([1, 3]);
        assert_eq!(ms.find(&2), ms.end());
        assert_eq!(ms.find(&4), ms.end());
    }
}
