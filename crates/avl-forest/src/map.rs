use std::fmt::{self, Debug};
use std::ops::Index;

use tracing::debug;

use crate::config::TreeConfig;
use crate::cursor::{Cursor, Iter, Keys, Values};
use crate::error::{ForestError, Result};
use crate::tree::{IntoIter, Tree};

/// Ordered map with unique keys, backed by an AVL [`Tree`].
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    tree: Tree<K, V, C>,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
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

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
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

    /// Value for `key`, or [`ForestError::KeyNotFound`].
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(ForestError::KeyNotFound)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(ForestError::KeyNotFound)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let c = self.tree.find(key);
        if c.is_end() {
            return None;
        }
        self.tree.value(c)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let c = self.tree.find(key);
        if c.is_end() {
            return None;
        }
        self.tree.value_mut(c)
    }

    /// Value for `key`, inserting `make()` first when the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let mut c = self.tree.find(&key);
        if c.is_end() {
            c = self.tree.insert_unique(key, make()).0;
        }
        self.tree
            .value_mut(c)
            .expect("cursor from find or insert is live")
    }

    /// Inserts `key` unless it is already present. An existing value is left
    /// untouched.
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        self.tree.insert_unique(key, value)
    }

    pub fn insert_pair(&mut self, (key, value): (K, V)) -> (Cursor, bool) {
        self.insert(key, value)
    }

    /// Inserts `key`, or overwrites the value of the existing entry.
    ///
    /// The flag is `true` when a new entry was created.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Cursor, bool) {
        let c = self.tree.find(&key);
        if c.is_end() {
            return self.tree.insert_unique(key, value);
        }
        if let Some(slot) = self.tree.value_mut(c) {
            *slot = value;
        }
        (c, false)
    }

    /// Inserts every pair in order, reporting each outcome.
    pub fn insert_many<I>(&mut self, items: I) -> Vec<(Cursor, bool)>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        items
            .into_iter()
            .map(|(k, v)| self.tree.insert_unique(k, v))
            .collect()
    }

    pub fn erase(&mut self, cursor: Cursor) -> Option<(K, V)> {
        self.tree.erase(cursor)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key).map(|(_, v)| v)
    }

    /// Moves every entry of `other` into `self`, leaving `other` empty.
    /// Entries whose key is already present in `self` are dropped.
    pub fn merge(&mut self, other: &mut Self) {
        debug!(incoming = other.len(), "merge map");
        while let Some((k, v)) = other.tree.erase(other.tree.begin()) {
            self.tree.insert_unique(k, v);
        }
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    pub fn find(&self, key: &K) -> Cursor {
        self.tree.find(key)
    }

    pub fn lower_bound(&self, key: &K) -> Cursor {
        self.tree.lower_bound(key)
    }

    pub fn upper_bound(&self, key: &K) -> Cursor {
        self.tree.upper_bound(key)
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

    /// Entry at `cursor`; `end` resolves to the last entry.
    pub fn get_at(&self, cursor: Cursor) -> Option<(&K, &V)> {
        self.tree.get(cursor)
    }

    pub fn value_mut(&mut self, cursor: Cursor) -> Option<&mut V> {
        self.tree.value_mut(cursor)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first()
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.tree.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.tree.iter())
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn assert_valid(&self) -> Result<()> {
        self.tree.assert_valid()
    }
}

impl<K, V, C> Index<&K> for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<K, V, C> Clone for AvlMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Fn(&K, &K) -> i32 + Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V, C> Debug for AvlMap<K, V, C>
where
    K: Debug,
    V: Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.tree, f)
    }
}

impl<K, V, C> PartialEq for AvlMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
    C: Fn(&K, &K) -> i32,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for AvlMap<K, V, C>
where
    K: Eq,
    V: Eq,
    C: Fn(&K, &K) -> i32,
{
}

impl<K, V> FromIterator<(K, V)> for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}

impl<K, V, C> Extend<(K, V)> for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.tree.insert_unique(k, v);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_reports_missing_keys() {
        let mut map = AvlMap::from([(1, "one")]);
        assert_eq!(map.at(&1), Ok(&"one"));
        assert_eq!(map.at(&2), Err(ForestError::KeyNotFound));
        assert_eq!(map.at_mut(&2), Err(ForestError::KeyNotFound));
        *map.at_mut(&1).unwrap() = "uno";
        assert_eq!(map[&1], "uno");
    }

    #[test]
    #[should_panic(expected = "key not found")]
    fn index_panics_on_missing_key() {
        let map = AvlMap::<i32, i32>::new();
        let _ = map[&3];
    }

    #[test]
    fn get_or_insert_with_inserts_once() {
        let mut map = AvlMap::<&str, Vec<i32>>::new();
        map.get_or_insert_with("a", Vec::new).push(1);
        map.get_or_insert_with("a", || unreachable!()).push(2);
        assert_eq!(map.get(&"a"), Some(&vec![1, 2]));
    }
}
