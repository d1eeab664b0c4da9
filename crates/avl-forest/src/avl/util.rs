use std::fmt::Debug;

use tracing::trace;

use crate::arena::Arena;
use crate::config::{BalanceMode, InsertPolicy};
use crate::error::{ForestError, Result};
use crate::util::{first, next, size as linked_size};

use super::types::AvlNode;

pub type Nodes<K, V> = Arena<AvlNode<K, V>>;

#[inline]
pub fn height<K, V>(arena: &Nodes<K, V>, node: Option<u32>) -> i32 {
    node.map_or(0, |i| arena[i].height)
}

#[inline]
pub fn update_height<K, V>(arena: &mut Nodes<K, V>, n: u32) {
    let h = 1 + height(arena, arena[n].l).max(height(arena, arena[n].r));
    arena[n].height = h;
}

/// `height(right) - height(left)`.
#[inline]
pub fn balance_factor<K, V>(arena: &Nodes<K, V>, n: u32) -> i32 {
    height(arena, arena[n].r) - height(arena, arena[n].l)
}

/// Repoints whichever link of `p` referenced `old` at `new`. A missing
/// parent means `old` was the root.
fn replace_child<K, V>(
    arena: &mut Nodes<K, V>,
    root: &mut Option<u32>,
    p: Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    match p {
        None => *root = new,
        Some(p) => {
            if arena[p].l == Some(old) {
                arena[p].l = new;
            } else {
                arena[p].r = new;
            }
        }
    }
}

/// Lifts the right child of `n` into its place and returns it.
pub fn rotate_left<K, V>(arena: &mut Nodes<K, V>, root: &mut Option<u32>, n: u32) -> u32 {
    let nr = arena[n].r.expect("left rotation pivot exists");
    let p = arena[n].p;
    let nrl = arena[nr].l;

    arena[n].r = nrl;
    if let Some(nrl) = nrl {
        arena[nrl].p = Some(n);
    }
    replace_child(arena, root, p, n, Some(nr));
    arena[nr].p = p;
    arena[nr].l = Some(n);
    arena[n].p = Some(nr);

    update_height(arena, n);
    update_height(arena, nr);
    trace!(node = n, pivot = nr, "rotate left");
    nr
}

/// Lifts the left child of `n` into its place and returns it.
pub fn rotate_right<K, V>(arena: &mut Nodes<K, V>, root: &mut Option<u32>, n: u32) -> u32 {
    let nl = arena[n].l.expect("right rotation pivot exists");
    let p = arena[n].p;
    let nlr = arena[nl].r;

    arena[n].l = nlr;
    if let Some(nlr) = nlr {
        arena[nlr].p = Some(n);
    }
    replace_child(arena, root, p, n, Some(nl));
    arena[nl].p = p;
    arena[nl].r = Some(n);
    arena[n].p = Some(nl);

    update_height(arena, n);
    update_height(arena, nl);
    trace!(node = n, pivot = nl, "rotate right");
    nl
}

/// Refreshes the height of `n`, rotates if it is out of balance, and returns
/// whichever node now roots the subtree.
pub fn rebalance<K, V>(arena: &mut Nodes<K, V>, root: &mut Option<u32>, n: u32) -> u32 {
    update_height(arena, n);
    let bf = balance_factor(arena, n);
    if bf > 1 {
        let r = arena[n].r.expect("right-heavy node has a right child");
        if balance_factor(arena, r) < 0 {
            rotate_right(arena, root, r);
        }
        return rotate_left(arena, root, n);
    }
    if bf < -1 {
        let l = arena[n].l.expect("left-heavy node has a left child");
        if balance_factor(arena, l) > 0 {
            rotate_left(arena, root, l);
        }
        return rotate_right(arena, root, n);
    }
    n
}

/// Rebalances every node from `from` up to the root.
pub fn retrace<K, V>(arena: &mut Nodes<K, V>, root: &mut Option<u32>, from: Option<u32>) {
    let mut curr = from;
    while let Some(n) = curr {
        let top = rebalance(arena, root, n);
        curr = arena[top].p;
    }
}

/// Recomputes heights from `from` up to the root without rotating.
pub fn refresh_heights<K, V>(arena: &mut Nodes<K, V>, from: Option<u32>) {
    let mut curr = from;
    while let Some(n) = curr {
        update_height(arena, n);
        curr = arena[n].p;
    }
}

/// Where a key would be attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// The tree is empty.
    Root,
    /// An equal key exists and the policy rejects duplicates.
    Occupied(u32),
    /// Empty left link of the given node.
    Left(u32),
    /// Empty right link of the given node.
    Right(u32),
}

pub fn find_slot<K, V, C>(
    arena: &Nodes<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
    policy: InsertPolicy,
) -> Slot
where
    C: Fn(&K, &K) -> i32,
{
    let Some(mut curr) = root else {
        return Slot::Root;
    };
    loop {
        let cmp = comparator(key, &arena[curr].k);
        if cmp == 0 && policy == InsertPolicy::Unique {
            return Slot::Occupied(curr);
        }
        if cmp < 0 {
            match arena[curr].l {
                Some(l) => curr = l,
                None => return Slot::Left(curr),
            }
        } else {
            match arena[curr].r {
                Some(r) => curr = r,
                None => return Slot::Right(curr),
            }
        }
    }
}

/// Hangs the detached node `n` off the empty left link of `p` and
/// rebalances the path above it.
pub fn insert_left<K, V>(arena: &mut Nodes<K, V>, root: &mut Option<u32>, n: u32, p: u32) {
    debug_assert!(arena[p].l.is_none());
    arena[p].l = Some(n);
    arena[n].p = Some(p);
    retrace(arena, root, Some(p));
}

/// Hangs the detached node `n` off the empty right link of `p` and
/// rebalances the path above it.
pub fn insert_right<K, V>(arena: &mut Nodes<K, V>, root: &mut Option<u32>, n: u32, p: u32) {
    debug_assert!(arena[p].r.is_none());
    arena[p].r = Some(n);
    arena[n].p = Some(p);
    retrace(arena, root, Some(p));
}

/// Unlinks `n` from the tree and rebalances according to `mode`.
///
/// The node keeps its slot and payload; releasing it is the caller's job.
/// A node with two children is replaced by its in-order predecessor, which
/// is relinked rather than copied, so no other node changes index.
pub fn remove<K, V>(arena: &mut Nodes<K, V>, root: &mut Option<u32>, n: u32, mode: BalanceMode) {
    let p = arena[n].p;
    let l = arena[n].l;
    let r = arena[n].r;

    // (deepest node whose subtree changed, node now occupying n's position)
    let (deepest, splice) = match (l, r) {
        (None, None) => {
            replace_child(arena, root, p, n, None);
            (p, None)
        }
        (Some(c), None) | (None, Some(c)) => {
            replace_child(arena, root, p, n, Some(c));
            arena[c].p = p;
            (p, Some(c))
        }
        (Some(l), Some(r)) => {
            let mut v = l;
            while let Some(vr) = arena[v].r {
                v = vr;
            }
            let deepest = if v == l {
                v
            } else {
                let vp = arena[v].p.expect("predecessor below left child has a parent");
                let vl = arena[v].l;
                arena[vp].r = vl;
                if let Some(vl) = vl {
                    arena[vl].p = Some(vp);
                }
                arena[v].l = Some(l);
                arena[l].p = Some(v);
                vp
            };
            arena[v].r = Some(r);
            arena[r].p = Some(v);
            replace_child(arena, root, p, n, Some(v));
            arena[v].p = p;
            (Some(deepest), Some(v))
        }
    };

    let node = &mut arena[n];
    node.p = None;
    node.l = None;
    node.r = None;
    node.height = 1;
    trace!(node = n, splice = ?splice, "unlink");

    match mode {
        BalanceMode::Retrace => retrace(arena, root, deepest),
        BalanceMode::SpliceOnly => {
            refresh_heights(arena, deepest);
            if let Some(s) = splice {
                let top = rebalance(arena, root, s);
                refresh_heights(arena, arena[top].p);
            }
        }
    }
}

fn validate_subtree<K, V>(arena: &Nodes<K, V>, node: u32, strict: bool) -> Result<i32> {
    let l = arena[node].l;
    let r = arena[node].r;

    let mut lh = 0;
    if let Some(l) = l {
        if arena[l].p != Some(node) {
            return Err(ForestError::Invariant(format!(
                "broken parent link on left child of node {node}"
            )));
        }
        lh = validate_subtree(arena, l, strict)?;
    }
    let mut rh = 0;
    if let Some(r) = r {
        if arena[r].p != Some(node) {
            return Err(ForestError::Invariant(format!(
                "broken parent link on right child of node {node}"
            )));
        }
        rh = validate_subtree(arena, r, strict)?;
    }

    let expected = 1 + lh.max(rh);
    let actual = arena[node].height;
    if actual != expected {
        return Err(ForestError::Invariant(format!(
            "height mismatch on node {node}: expected {expected}, got {actual}"
        )));
    }
    if strict && (rh - lh).abs() > 1 {
        return Err(ForestError::Invariant(format!(
            "AVL balance violated on node {node}: bf={}",
            rh - lh
        )));
    }
    Ok(expected)
}

/// Checks links, heights, ordering and the node count. With `strict`, also
/// checks the AVL `|bf| <= 1` bound on every node.
pub fn assert_avl_tree<K, V, C>(
    arena: &Nodes<K, V>,
    root: Option<u32>,
    size: usize,
    comparator: &C,
    strict: bool,
) -> Result<()>
where
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        if size != 0 || !arena.is_empty() {
            return Err(ForestError::Invariant(format!(
                "empty tree reports {size} elements"
            )));
        }
        return Ok(());
    };

    if arena[root].p.is_some() {
        return Err(ForestError::Invariant("root has parent".to_string()));
    }
    validate_subtree(arena, root, strict)?;
    let linked = linked_size(arena, Some(root));

    let mut visited = 0usize;
    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(&arena[prev].k, &arena[i].k) > 0 {
                return Err(ForestError::Invariant(format!(
                    "node order violated between {prev} and {i}"
                )));
            }
        }
        visited += 1;
        prev_node = Some(i);
        curr = next(arena, i);
    }

    if visited != size || linked != size || arena.len() != size {
        return Err(ForestError::Invariant(format!(
            "size mismatch: counter {size}, in-order {visited}, linked {linked}, allocated {}",
            arena.len()
        )));
    }
    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K, V>(arena: &Nodes<K, V>, node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i];
            let left = print(arena, n.l, &format!("{tab}  "));
            let right = print(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] [h={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.height, n.k, n.v
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::default_comparator;

    fn push(arena: &mut Nodes<i32, ()>, root: &mut Option<u32>, k: i32, policy: InsertPolicy) {
        let slot = find_slot(arena, *root, &k, &default_comparator::<i32>, policy);
        let n = arena.alloc(AvlNode::new(k, ()));
        match slot {
            Slot::Root => *root = Some(n),
            Slot::Left(p) => insert_left(arena, root, n, p),
            Slot::Right(p) => insert_right(arena, root, n, p),
            Slot::Occupied(_) => unreachable!("test inserts distinct keys"),
        }
    }

    fn keys(arena: &Nodes<i32, ()>, root: Option<u32>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut curr = first(arena, root);
        while let Some(i) = curr {
            out.push(arena[i].k);
            curr = next(arena, i);
        }
        out
    }

    #[test]
    fn ascending_run_triggers_left_rotation() {
        let mut arena = Nodes::new();
        let mut root = None;
        for k in [1, 2, 3] {
            push(&mut arena, &mut root, k, InsertPolicy::Unique);
        }
        let r = root.unwrap();
        assert_eq!(arena[r].k, 2);
        assert_eq!(arena[r].height, 2);
        assert_eq!(arena[arena[r].l.unwrap()].k, 1);
        assert_eq!(arena[arena[r].r.unwrap()].k, 3);
        assert_avl_tree(&arena, root, 3, &default_comparator::<i32>, true).unwrap();
    }

    #[test]
    fn zig_zag_triggers_double_rotation() {
        let mut arena = Nodes::new();
        let mut root = None;
        for k in [30, 10, 20] {
            push(&mut arena, &mut root, k, InsertPolicy::Unique);
        }
        let r = root.unwrap();
        assert_eq!(arena[r].k, 20);
        assert_eq!(arena[r].p, None);
        assert_avl_tree(&arena, root, 3, &default_comparator::<i32>, true).unwrap();
    }

    #[test]
    fn rotate_right_repairs_parent_links() {
        let mut arena = Nodes::new();
        let mut root = None;
        for k in [50, 30, 70, 20, 40] {
            push(&mut arena, &mut root, k, InsertPolicy::Unique);
        }
        let top = root.unwrap();
        let new_top = rotate_right(&mut arena, &mut root, top);
        assert_eq!(root, Some(new_top));
        assert_eq!(arena[new_top].k, 30);
        let moved = arena[top].l.unwrap();
        assert_eq!(arena[moved].k, 40);
        assert_eq!(arena[moved].p, Some(top));
        assert_eq!(keys(&arena, root), vec![20, 30, 40, 50, 70]);
        assert_avl_tree(&arena, root, 5, &default_comparator::<i32>, false).unwrap();
    }

    #[test]
    fn duplicates_land_after_existing_equal_keys() {
        let mut arena = Nodes::new();
        let mut root = None;
        for k in [5, 5, 5, 1, 5] {
            push(&mut arena, &mut root, k, InsertPolicy::NonUnique);
        }
        assert_eq!(keys(&arena, root), vec![1, 5, 5, 5, 5]);
        assert_eq!(
            find_slot(&arena, root, &5, &default_comparator::<i32>, InsertPolicy::Unique),
            Slot::Occupied(root.unwrap())
        );
    }

    #[test]
    fn remove_covers_every_child_shape() {
        for mode in [BalanceMode::Retrace, BalanceMode::SpliceOnly] {
            let mut arena = Nodes::new();
            let mut root = None;
            for k in [1, 3, 5, 6, 7, 99] {
                push(&mut arena, &mut root, k, InsertPolicy::Unique);
            }
            // 6 roots the tree and has two children; its predecessor 5 sits
            // below the left child, so it is relinked into the root position.
            let six = root.unwrap();
            assert_eq!(arena[six].k, 6);
            remove(&mut arena, &mut root, six, mode);
            arena.free(six);
            assert_eq!(arena[root.unwrap()].k, 5);
            assert_eq!(keys(&arena, root), vec![1, 3, 5, 7, 99]);
            assert_avl_tree(&arena, root, 5, &default_comparator::<i32>, false).unwrap();

            // Leaf.
            let leaf = first(&arena, root).unwrap();
            remove(&mut arena, &mut root, leaf, mode);
            arena.free(leaf);
            assert_eq!(keys(&arena, root), vec![3, 5, 7, 99]);
            assert_avl_tree(&arena, root, 4, &default_comparator::<i32>, false).unwrap();

            while let Some(r) = root {
                remove(&mut arena, &mut root, r, mode);
                arena.free(r);
                assert_avl_tree(&arena, root, arena.len(), &default_comparator::<i32>, false)
                    .unwrap();
            }
            assert!(arena.is_empty());
        }
    }

    #[test]
    fn print_renders_nested_nodes() {
        let mut arena = Nodes::new();
        let mut root = None;
        for k in [2, 1] {
            push(&mut arena, &mut root, k, InsertPolicy::Unique);
        }
        let out = print(&arena, root, "");
        assert!(out.starts_with("Node[0] [h=2] { 2 = () }"));
        assert!(out.contains("Node[1] [h=1] { 1 = () }"));
    }
}
