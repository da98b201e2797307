//! Shuffle strategies.
//!
//! The core shuffle is a plain permutation driven by the caller's RNG. Any
//! ordering bias lives in its own named strategy so it can be declared in
//! configuration and tested on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck};
use crate::core::GameRng;

/// Reorders a deck using injected randomness.
pub trait ShuffleStrategy: Send + Sync + fmt::Debug {
    /// Permute `cards` in place. Must not add, drop, or duplicate cards.
    fn shuffle(&self, cards: &mut [Card], rng: &mut GameRng);
}

/// Unbiased Fisher–Yates shuffle.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformShuffle;

impl ShuffleStrategy for UniformShuffle {
    fn shuffle(&self, cards: &mut [Card], rng: &mut GameRng) {
        rng.shuffle(cards);
    }
}

/// Legacy "house" ordering that front-loads high cards.
///
/// The lower half of the deck (dealt last) is sorted by rank descending and
/// the upper half (dealt first) ascending, then a single adjacent-swap pass
/// exchanges each neighbouring pair with probability `1 - keep_probability`.
/// The result is far from uniform; it exists so the old behaviour can be
/// reproduced and audited, never as a default.
#[derive(Clone, Copy, Debug)]
pub struct RankSortedShuffle {
    pub keep_probability: f64,
}

impl RankSortedShuffle {
    /// Keep probability used by the legacy dealer.
    pub const LEGACY_KEEP_PROBABILITY: f64 = 0.6;
}

impl ShuffleStrategy for RankSortedShuffle {
    fn shuffle(&self, cards: &mut [Card], rng: &mut GameRng) {
        let half = cards.len() / 2;
        let (lower, upper) = cards.split_at_mut(half);
        lower.sort_by(|a, b| b.rank.cmp(&a.rank));
        upper.sort_by_key(|card| card.rank);

        for i in 1..cards.len() {
            if !rng.gen_bool(self.keep_probability) {
                cards.swap(i - 1, i);
            }
        }
    }
}

/// Serializable choice of shuffle strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShuffleKind {
    /// [`UniformShuffle`].
    #[default]
    Uniform,
    /// [`RankSortedShuffle`].
    RankSorted { keep_probability: f64 },
}

impl ShuffleKind {
    /// The legacy house ordering at its original keep probability.
    #[must_use]
    pub const fn legacy() -> Self {
        ShuffleKind::RankSorted {
            keep_probability: RankSortedShuffle::LEGACY_KEEP_PROBABILITY,
        }
    }

    /// Instantiate the strategy.
    #[must_use]
    pub fn build(&self) -> Box<dyn ShuffleStrategy> {
        match *self {
            ShuffleKind::Uniform => Box::new(UniformShuffle),
            ShuffleKind::RankSorted { keep_probability } => {
                Box::new(RankSortedShuffle { keep_probability })
            }
        }
    }
}

/// Produce a permutation of `deck` with the given strategy.
#[must_use]
pub fn shuffle(deck: Deck, strategy: &dyn ShuffleStrategy, rng: &mut GameRng) -> Deck {
    let mut cards = deck.to_vec();
    strategy.shuffle(&mut cards, rng);
    Deck::from(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{generate_deck, Rank};

    fn sorted(deck: &Deck) -> Vec<Card> {
        let mut cards = deck.to_vec();
        cards.sort();
        cards
    }

    #[test]
    fn test_uniform_is_permutation() {
        let mut rng = GameRng::new(42);
        let deck = generate_deck();
        let shuffled = shuffle(deck.clone(), &UniformShuffle, &mut rng);

        assert_ne!(shuffled, deck);
        assert_eq!(sorted(&shuffled), sorted(&deck));
    }

    #[test]
    fn test_uniform_is_deterministic_per_seed() {
        let a = shuffle(generate_deck(), &UniformShuffle, &mut GameRng::new(9));
        let b = shuffle(generate_deck(), &UniformShuffle, &mut GameRng::new(9));
        let c = shuffle(generate_deck(), &UniformShuffle, &mut GameRng::new(10));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rank_sorted_without_swaps() {
        let strategy = RankSortedShuffle {
            keep_probability: 1.0,
        };
        let shuffled = shuffle(generate_deck(), &strategy, &mut GameRng::new(1)).to_vec();

        assert_eq!(shuffled.len(), 52);
        // Bottom half descends, top half ascends; the top of the deck is a king.
        assert_eq!(shuffled[0].rank, Rank::King);
        assert_eq!(shuffled[25].rank, Rank::Ace);
        assert_eq!(shuffled[26].rank, Rank::Ace);
        assert_eq!(shuffled[51].rank, Rank::King);
    }

    #[test]
    fn test_rank_sorted_is_permutation() {
        let deck = generate_deck();
        let strategy = ShuffleKind::legacy().build();
        let shuffled = shuffle(deck.clone(), strategy.as_ref(), &mut GameRng::new(5));
        assert_eq!(sorted(&shuffled), sorted(&deck));
    }

    #[test]
    fn test_shuffle_kind_serde() {
        let kind = ShuffleKind::legacy();
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"kind":"rank_sorted","keep_probability":0.6}"#);
        assert_eq!(serde_json::from_str::<ShuffleKind>(&json).unwrap(), kind);
        assert_eq!(
            serde_json::from_str::<ShuffleKind>(r#"{"kind":"uniform"}"#).unwrap(),
            ShuffleKind::Uniform
        );
    }
}
