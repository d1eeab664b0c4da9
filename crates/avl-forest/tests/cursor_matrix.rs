use avl_forest::{AvlSet, Cursor};

#[test]
fn cursor_round_trip_matrix() {
    let set: AvlSet<i32> = (0..40).map(|k| k * 3).collect();
    let starts: Vec<Cursor> = {
        let mut out = Vec::new();
        let mut c = set.begin();
        while c != set.end() {
            out.push(c);
            c = set.next(c);
        }
        out
    };
    for (i, start) in starts.iter().enumerate() {
        // Up to and including the step that lands on `end`.
        for n in 0..=starts.len() - i {
            let mut c = *start;
            for _ in 0..n {
                c = set.next(c);
            }
            for _ in 0..n {
                c = set.prev(c);
            }
            assert_eq!(c, *start, "start {i}, {n} steps");
        }
    }
}

#[test]
fn cursor_end_behaviour_matrix() {
    let mut set = AvlSet::from([1, 2, 3]);
    let end = set.end();
    assert_eq!(end, Cursor::END);
    assert!(end.is_end());
    assert!(!end.is_accessible());
    assert_eq!(set.get(end), Some(&3));
    assert_eq!(set.get(set.prev(end)), Some(&3));
    assert_eq!(set.next(end), end);
    assert_eq!(set.prev(set.begin()), end);
    assert_eq!(set.erase(end), None);
    assert_eq!(set.len(), 3);
}

#[test]
fn cursor_empty_container_matrix() {
    let set = AvlSet::<i32>::new();
    assert_eq!(set.begin(), set.end());
    assert_eq!(set.prev(set.end()), set.end());
    assert_eq!(set.get(set.end()), None);
    assert_eq!(set.first(), None);
    assert_eq!(set.iter().next(), None);
}

#[test]
fn cursor_reverse_walk_matrix() {
    let set = AvlSet::from([5, 1, 4, 2, 3]);
    let mut out = Vec::new();
    let mut c = set.prev(set.end());
    while c != set.end() {
        out.push(*set.get(c).unwrap());
        c = set.prev(c);
    }
    assert_eq!(out, vec![5, 4, 3, 2, 1]);
}

#[test]
fn cursor_stays_valid_across_unrelated_erasures_matrix() {
    let mut set = AvlSet::new();
    let cursors: Vec<(i32, Cursor)> = (0..64).map(|k| (k, set.insert(k).0)).collect();
    for (k, c) in &cursors {
        if k % 4 != 1 {
            assert_eq!(set.erase(*c), Some(*k));
        }
    }
    for (k, c) in cursors.iter().filter(|(k, _)| k % 4 == 1) {
        assert_eq!(set.get(*c), Some(k));
    }
    set.assert_valid().unwrap();
}

#[test]
fn iterators_meet_in_the_middle_matrix() {
    let set = AvlSet::from([1, 2, 3, 4, 5]);
    let mut it = set.iter();
    assert_eq!(it.len(), 5);
    assert_eq!(it.next(), Some(&1));
    assert_eq!(it.next_back(), Some(&5));
    assert_eq!(it.next(), Some(&2));
    assert_eq!(it.next_back(), Some(&4));
    assert_eq!(it.len(), 1);
    assert_eq!(it.next(), Some(&3));
    assert_eq!(it.next_back(), None);
    assert_eq!(it.next(), None);
}

#[test]
fn erased_cursor_ignores_reused_slot_matrix() {
    let mut set = AvlSet::from([1, 2, 3]);
    let c = set.find(&2);
    assert_eq!(set.erase(c), Some(2));
    let (fifty, inserted) = set.insert(50);
    assert!(inserted);
    assert_eq!(fifty.node(), c.node());

    assert_eq!(set.erase(c), None);
    assert_eq!(set.get(c), None);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 50]);
    assert_eq!(set.erase(fifty), Some(50));
    set.assert_valid().unwrap();
}
