use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Injectable source of shuffles, so services and tests can pin the order.
///
/// Every shuffle is an unbiased Fisher–Yates pass (walks from the last index
/// down to 1, swapping with a uniformly chosen index at or below it).
#[derive(Debug, Clone, Default)]
pub enum Randomizer {
    /// Thread-local OS-seeded generator.
    #[default]
    Thread,
    /// Deterministic generator for tests and reproducible runs.
    Seeded(StdRng),
}

impl Randomizer {
    /// Returns a randomizer backed by the thread-local generator.
    #[must_use]
    pub fn thread() -> Self {
        Self::Thread
    }

    /// Returns a randomizer that yields the same sequence for the same seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Returns a shuffled copy of `items`; the input is left untouched.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut shuffled = items.to_vec();
        self.shuffle_in_place(&mut shuffled);
        shuffled
    }

    /// Shuffles `items` in place.
    pub fn shuffle_in_place<T>(&mut self, items: &mut [T]) {
        match self {
            Self::Thread => items.shuffle(&mut rand::rng()),
            Self::Seeded(rng) => items.shuffle(rng),
        }
    }

    #[must_use]
    pub fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shuffle_leaves_input_untouched() {
        let input = vec![1, 2, 3, 4, 5];
        let mut rng = Randomizer::seeded(7);
        let _ = rng.shuffle(&input);
        assert_eq!(input, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn seeded_shuffles_are_reproducible() {
        let input: Vec<u32> = (0..32).collect();
        let a = Randomizer::seeded(42).shuffle(&input);
        let b = Randomizer::seeded(42).shuffle(&input);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_handles_empty_and_single() {
        let mut rng = Randomizer::thread();
        assert!(rng.shuffle::<u8>(&[]).is_empty());
        assert_eq!(rng.shuffle(&["only"]), vec!["only"]);
    }

    #[test]
    fn every_position_is_reachable() {
        // Each element of a 3-element slice should land in slot 0 at some point.
        let input = ['a', 'b', 'c'];
        let mut rng = Randomizer::seeded(1);
        let mut seen_first = std::collections::HashSet::new();
        for _ in 0..200 {
            seen_first.insert(rng.shuffle(&input)[0]);
        }
        assert_eq!(seen_first.len(), 3);
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(
            input in proptest::collection::vec(any::<u16>(), 0..64),
            seed in any::<u64>(),
        ) {
            let mut shuffled = Randomizer::seeded(seed).shuffle(&input);
            let mut expected = input.clone();
            prop_assert_eq!(shuffled.len(), expected.len());
            shuffled.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(shuffled, expected);
        }
    }
}
