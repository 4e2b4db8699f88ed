//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests, a seeded or scripted
//! implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG seeded from the operating system.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Creates an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }
}

/// Picks a uniformly random index into a collection of `len` elements.
///
/// Returns `None` for an empty collection.
pub fn pick_index(len: usize, rng: &mut dyn DeterministicRng) -> Option<usize> {
    let max = u32::try_from(len.checked_sub(1)?).ok()?;
    usize::try_from(rng.next_u32_range(0, max)).ok()
}

/// Shuffles `items` in place with a Fisher–Yates permutation.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for i in (1..items.len()).rev() {
        if let Some(j) = pick_index(i + 1, rng) {
            items.swap(i, j.min(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = SystemRng::seeded(7);
        let mut items = vec!["a", "b", "c", "d"];

        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_pick_index_stays_in_bounds() {
        let mut rng = SystemRng::seeded(42);
        for _ in 0..1_000 {
            let index = pick_index(3, &mut rng).unwrap();
            assert!(index < 3);
        }
        assert_eq!(pick_index(0, &mut rng), None);
    }

    #[test]
    fn test_shuffle_moves_first_element_to_every_position() {
        let mut rng = SystemRng::seeded(1234);
        let mut seen = [0_u32; 4];

        for _ in 0..4_000 {
            let mut items = [0_u8, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            let position = items.iter().position(|&x| x == 0).unwrap();
            seen[position] += 1;
        }

        for count in seen {
            assert!((800..=1_200).contains(&count), "skewed counts: {seen:?}");
        }
    }
}
