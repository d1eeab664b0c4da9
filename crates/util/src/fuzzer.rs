use rand::{rngs::OsRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::sync::Mutex;

/// Reproducible source of random keys and choices.
///
/// ```
/// use forest_util::Fuzzer;
///
/// let fuzzer = Fuzzer::from_u64(7);
/// let n = fuzzer.random_int(1, 10);
/// assert!((1..=10).contains(&n));
/// ```
pub struct Fuzzer {
    /// Seed the generator was built from. Print it on failure to replay.
    pub seed: [u8; 32],
    rng: Mutex<Xoshiro256StarStar>,
}

impl Fuzzer {
    /// Builds a fuzzer from `seed`, or from OS entropy when `None`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        Self {
            seed,
            rng: Mutex::new(Xoshiro256StarStar::from_seed(seed)),
        }
    }

    /// Fuzzer whose 32-byte seed is `n` repeated in little-endian.
    pub fn from_u64(n: u64) -> Self {
        let mut seed = [0u8; 32];
        for chunk in seed.chunks_mut(8) {
            chunk.copy_from_slice(&n.to_le_bytes());
        }
        Self::new(Some(seed))
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut Xoshiro256StarStar) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut *rng)
    }

    /// Integer in `[min, max]`.
    pub fn random_int(&self, min: i64, max: i64) -> i64 {
        self.with_rng(|rng| rng.gen_range(min..=max))
    }

    pub fn random_bool(&self, probability: f64) -> bool {
        self.with_rng(|rng| rng.gen_bool(probability))
    }

    /// Uniform element of a non-empty slice.
    pub fn pick<'a, T>(&self, elements: &'a [T]) -> &'a T {
        let idx = self.with_rng(|rng| rng.gen_range(0..elements.len()));
        &elements[idx]
    }

    pub fn shuffle<T>(&self, items: &mut [T]) {
        self.with_rng(|rng| items.shuffle(rng));
    }

    /// `len` integers drawn from `[min, max]`, duplicates allowed.
    pub fn keys(&self, len: usize, min: i64, max: i64) -> Vec<i64> {
        (0..len).map(|_| self.random_int(min, max)).collect()
    }

    /// `0..len` in random order.
    pub fn permutation(&self, len: usize) -> Vec<i64> {
        let mut items: Vec<i64> = (0..len as i64).collect();
        self.shuffle(&mut items);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let a = Fuzzer::from_u64(42);
        let b = Fuzzer::from_u64(42);
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.keys(32, -100, 100), b.keys(32, -100, 100));
    }

    #[test]
    fn random_int_is_inclusive() {
        let fuzzer = Fuzzer::new(None);
        for _ in 0..200 {
            let n = fuzzer.random_int(1, 3);
            assert!((1..=3).contains(&n));
        }
    }

    #[test]
    fn permutation_covers_every_index() {
        let fuzzer = Fuzzer::from_u64(3);
        let mut p = fuzzer.permutation(50);
        p.sort_unstable();
        assert_eq!(p, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn pick_stays_in_slice() {
        let fuzzer = Fuzzer::from_u64(9);
        let choices = ["a", "b", "c"];
        for _ in 0..50 {
            assert!(choices.contains(fuzzer.pick(&choices)));
        }
    }
}
