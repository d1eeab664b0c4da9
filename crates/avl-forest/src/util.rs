//! Structure-only tree walks (`first`, `next`, bounds, ...).
//!
//! None of these functions rebalance; they read links and, for the key-based
//! helpers, compare through a `key_of` accessor so any node layout can use
//! them.

use crate::arena::Arena;
use crate::types::Node;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &Arena<N>, idx: u32) -> Option<u32> {
    arena[idx].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &Arena<N>, idx: u32) -> Option<u32> {
    arena[idx].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &Arena<N>, idx: u32) -> Option<u32> {
    arena[idx].r()
}

/// Leftmost node under `root`.
pub fn first<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node under `root`.
pub fn last<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &Arena<N>, mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &Arena<N>, mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &Arena<N>, root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`, counted by walking.
pub fn size<N: Node>(arena: &Arena<N>, root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Finds a node whose key compares equal to `key`.
pub fn find<N, K, F, C>(
    arena: &Arena<N>,
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, key_of(&arena[i]));
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Leftmost node whose key is not less than `key`.
///
/// Keeps descending left after an equal match so the first of a run of
/// duplicates wins.
pub fn lower_bound<N, K, F, C>(
    arena: &Arena<N>,
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        if comparator(key_of(&arena[i]), key) >= 0 {
            res = Some(i);
            curr = get_l(arena, i);
        } else {
            curr = get_r(arena, i);
        }
    }
    res
}

/// Leftmost node whose key is greater than `key`.
pub fn upper_bound<N, K, F, C>(
    arena: &Arena<N>,
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        if comparator(key_of(&arena[i]), key) > 0 {
            res = Some(i);
            curr = get_l(arena, i);
        } else {
            curr = get_r(arena, i);
        }
    }
    res
}

/// Counts nodes whose key compares equal to `key`.
///
/// Duplicates can sit on both sides of an equal node after rotations, so an
/// equal node recurses into both children; unequal nodes prune the side that
/// cannot match.
pub fn count<N, K, F, C>(
    arena: &Arena<N>,
    root: Option<u32>,
    key: &K,
    key_of: &F,
    comparator: &C,
) -> usize
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let Some(i) = root else {
        return 0;
    };
    let cmp = comparator(key_of(&arena[i]), key);
    if cmp < 0 {
        count(arena, get_r(arena, i), key, key_of, comparator)
    } else if cmp > 0 {
        count(arena, get_l(arena, i), key, key_of, comparator)
    } else {
        1 + count(arena, get_l(arena, i), key, key_of, comparator)
            + count(arena, get_r(arena, i), key, key_of, comparator)
    }
}
