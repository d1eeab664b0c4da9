use std::collections::BTreeMap;

use avl_forest::{AvlMap, AvlMultiset, AvlSet};
use proptest::prelude::*;

proptest! {
    #[test]
    fn set_iterates_sorted_and_deduplicated(items in prop::collection::vec(-50i32..50, 0..200)) {
        let set: AvlSet<i32> = items.iter().copied().collect();
        let mut expected = items.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(set.iter().copied().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(set.len(), expected.len());
        prop_assert!(set.assert_valid().is_ok());
    }

    #[test]
    fn multiset_keeps_every_item(items in prop::collection::vec(0u8..16, 0..200)) {
        let ms: AvlMultiset<u8> = items.iter().copied().collect();
        let mut expected = items.clone();
        expected.sort_unstable();
        prop_assert_eq!(ms.iter().copied().collect::<Vec<_>>(), expected);
        for k in 0u8..16 {
            prop_assert_eq!(ms.count(&k), items.iter().filter(|v| **v == k).count());
        }
    }

    #[test]
    fn bounds_agree_with_btree(
        items in prop::collection::vec(-100i32..100, 1..100),
        key in -110i32..110,
    ) {
        let set: AvlSet<i32> = items.iter().copied().collect();
        let model: std::collections::BTreeSet<i32> = items.iter().copied().collect();
        let lb = model.range(key..).next();
        let ub = model.range(key + 1..).next();
        let c = set.lower_bound(&key);
        prop_assert_eq!(if c.is_end() { None } else { set.get(c) }, lb);
        let c = set.upper_bound(&key);
        prop_assert_eq!(if c.is_end() { None } else { set.get(c) }, ub);
    }

    #[test]
    fn map_matches_btree_after_removals(
        items in prop::collection::vec((0i32..64, any::<u16>()), 0..150),
        removals in prop::collection::vec(0i32..64, 0..80),
    ) {
        let mut map = AvlMap::new();
        let mut model = BTreeMap::new();
        for (k, v) in &items {
            map.insert(*k, *v);
            model.entry(*k).or_insert(*v);
        }
        for k in &removals {
            prop_assert_eq!(map.remove(k), model.remove(k));
        }
        prop_assert!(map.assert_valid().is_ok());
        prop_assert!(map.iter().eq(model.iter()));
    }
}
