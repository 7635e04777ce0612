use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

/// The source of randomness for draws and groupings.
///
/// Both operations must be uniform: `shuffle` produces every permutation with
/// the same probability and `pick_index` every index in `[0, len)`.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Panics if `len` is zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Randomness from the operating system, reseeded per thread.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut thread_rng());
    }

    fn pick_index(&mut self, len: usize) -> usize {
        thread_rng().gen_range(0..len)
    }
}

/// Reproducible randomness, for tests and replays.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> SeededRng {
        SeededRng {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_shuffle() {
        let mut r1 = SeededRng::from_seed(123);
        let mut r2 = SeededRng::from_seed(123);
        let mut a: Vec<u32> = (0..52).collect();
        let mut b: Vec<u32> = (0..52).collect();
        r1.shuffle(&mut a);
        r2.shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SystemRng;
        let mut a: Vec<u32> = (0..100).collect();
        rng.shuffle(&mut a);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<u32>>());
    }

    #[test]
    fn pick_index_covers_the_range() {
        let mut rng = SeededRng::from_seed(7);
        let mut seen = [0u32; 5];
        for _ in 0..5_000 {
            seen[rng.pick_index(5)] += 1;
        }
        // Roughly 1000 each.
        for count in seen {
            assert!((800..1200).contains(&count), "{:?}", seen);
        }
    }
}
