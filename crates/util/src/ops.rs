//! Random operation scripts.
//!
//! A script is a plain `Vec<Op>`, so a failing run can be printed and
//! replayed without the generator.

use crate::fuzzer::Fuzzer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Insert(i64),
    /// Remove one element equal to the key, if any.
    Remove(i64),
    /// Erase the element at this in-order position, modulo the current size.
    EraseAt(usize),
    Clear,
}

#[derive(Clone, Copy, Debug)]
pub struct ScriptOptions {
    pub len: usize,
    pub min_key: i64,
    pub max_key: i64,
    /// Probability of an insert; the rest splits between the removals.
    pub insert_ratio: f64,
    pub clear_ratio: f64,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            len: 500,
            min_key: 0,
            max_key: 64,
            insert_ratio: 0.6,
            clear_ratio: 0.005,
        }
    }
}

/// Half of the removals target a key inserted earlier in the script, so they
/// hit existing elements even when the key range is wide.
pub fn op_script(fuzzer: &Fuzzer, opts: &ScriptOptions) -> Vec<Op> {
    let mut inserted = Vec::new();
    (0..opts.len)
        .map(|_| {
            if fuzzer.random_bool(opts.clear_ratio) {
                Op::Clear
            } else if fuzzer.random_bool(opts.insert_ratio) {
                let k = fuzzer.random_int(opts.min_key, opts.max_key);
                inserted.push(k);
                Op::Insert(k)
            } else if fuzzer.random_bool(0.5) {
                if !inserted.is_empty() && fuzzer.random_bool(0.5) {
                    Op::Remove(*fuzzer.pick(&inserted))
                } else {
                    Op::Remove(fuzzer.random_int(opts.min_key, opts.max_key))
                }
            } else {
                Op::EraseAt(fuzzer.random_int(0, i64::from(u32::MAX)) as usize)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_are_reproducible() {
        let opts = ScriptOptions {
            len: 100,
            ..ScriptOptions::default()
        };
        let a = op_script(&Fuzzer::from_u64(5), &opts);
        let b = op_script(&Fuzzer::from_u64(5), &opts);
        assert_eq!(a.len(), 100);
        assert_eq!(a, b);
    }

    #[test]
    fn some_removals_target_inserted_keys() {
        let opts = ScriptOptions {
            len: 400,
            min_key: 0,
            max_key: 1_000_000,
            ..ScriptOptions::default()
        };
        let script = op_script(&Fuzzer::from_u64(21), &opts);
        let inserted: Vec<i64> = script
            .iter()
            .filter_map(|op| match op {
                Op::Insert(k) => Some(*k),
                _ => None,
            })
            .collect();
        let hits = script
            .iter()
            .filter(|op| matches!(op, Op::Remove(k) if inserted.contains(k)))
            .count();
        assert!(hits > 0);
    }

    #[test]
    fn keys_respect_bounds() {
        let opts = ScriptOptions {
            min_key: -3,
            max_key: 3,
            ..ScriptOptions::default()
        };
        for op in op_script(&Fuzzer::from_u64(11), &opts) {
            if let Op::Insert(k) | Op::Remove(k) = op {
                assert!((-3..=3).contains(&k));
            }
        }
    }
}
