//! Deterministic, injectable randomness for shuffling and dealing.
//!
//! The engine never reaches for a global or thread-local RNG. Every
//! operation that needs randomness takes a `&mut GameRng` from the caller,
//! so a fixed seed reproduces a whole session.
//!
//! ```
//! use tongits_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! let (mut left, mut right) = ([1, 2, 3, 4, 5], [1, 2, 3, 4, 5]);
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Stream for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy. For live sessions; tests should use [`GameRng::new`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream started from, for logging and replays.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `true` with the given probability, clamped to `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Fisher–Yates shuffle in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::generate_deck;

    fn shuffled(seed: u64) -> Vec<crate::cards::Card> {
        let mut cards = generate_deck().to_vec();
        GameRng::new(seed).shuffle(&mut cards);
        cards
    }

    #[test]
    fn test_same_seed_same_order() {
        assert_eq!(shuffled(42), shuffled(42));
        assert_ne!(shuffled(42), shuffled(43));
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut cards = shuffled(9);
        assert_ne!(cards, generate_deck().to_vec());
        cards.sort();
        let mut expected = generate_deck().to_vec();
        expected.sort();
        assert_eq!(cards, expected);
    }

    #[test]
    fn test_gen_bool_extremes() {
        let mut rng = GameRng::new(3);
        for _ in 0..20 {
            assert!(rng.gen_bool(1.0));
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(7.5));
            assert!(!rng.gen_bool(-1.0));
        }
    }

    #[test]
    fn test_clone_continues_identically() {
        let mut rng = GameRng::new(11);
        rng.gen_bool(0.5);
        let mut copy = rng.clone();

        let rolls: Vec<_> = (0..16).map(|_| rng.gen_bool(0.5)).collect();
        let copied: Vec<_> = (0..16).map(|_| copy.gen_bool(0.5)).collect();
        assert_eq!(rolls, copied);
        assert_eq!(copy.seed(), 11);
    }

    #[test]
    fn test_from_entropy_records_seed() {
        let rng = GameRng::from_entropy();
        assert_eq!(GameRng::new(rng.seed()).seed(), rng.seed());
    }
}
