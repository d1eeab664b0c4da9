//! Node trait definitions.
//!
//! Every "pointer" in the forest is an `Option<u32>` index into an
//! [`Arena`](crate::arena::Arena). Tree-manipulation functions take the arena
//! by reference and work with indices, so relinking a node never moves its
//! payload.

/// Binary-tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
}

/// Default three-way comparator.
///
/// Every tree in the crate compares keys with a `Fn(&K, &K) -> i32`:
/// negative means `a < b`, zero means equivalent, positive means `a > b`.
/// Custom comparators must be strict weak orderings; anything else leaves the
/// tree's order unspecified (but never memory-unsafe).
///
/// Incomparable pairs (`NaN`) are treated as equal.
pub fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a < b {
        -1
    } else if a > b {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_comparator_orders_numbers() {
        assert_eq!(default_comparator(&1, &2), -1);
        assert_eq!(default_comparator(&2, &1), 1);
        assert_eq!(default_comparator(&7, &7), 0);
        assert_eq!(default_comparator(&f64::NAN, &1.0), 0);
    }
}
