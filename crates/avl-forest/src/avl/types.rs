use crate::types::Node;

/// AVL tree node stored in an [`Arena`](crate::arena::Arena).
#[derive(Clone, Debug)]
pub struct AvlNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// Height of the subtree rooted here; a leaf has height 1.
    pub height: i32,
}

impl<K, V> AvlNode<K, V> {
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            height: 1,
        }
    }

    pub fn into_entry(self) -> (K, V) {
        (self.k, self.v)
    }
}

impl<K, V> Node for AvlNode<K, V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }
}

/// Key accessor for the generic walks in [`crate::util`].
#[inline]
pub fn key_of<K, V>(node: &AvlNode<K, V>) -> &K {
    &node.k
}
