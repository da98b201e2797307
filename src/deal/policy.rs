//! Deal bias policies.
//!
//! A deal bias policy runs once, after both starting hands have been dealt
//! and before the discard pile is opened. It may swap cards between the two
//! hands. Policies are explicit objects selected through configuration, so
//! any skew in who receives strong cards is declared rather than hidden.

use std::fmt;

use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::core::{GameRng, PlayerId, PlayerMap};

/// Bonus added once for every rank held at least twice.
pub const PAIR_BONUS: u32 = 10;

/// Additional bonus for every rank held at least three times.
pub const TRIPLE_BONUS: u32 = 20;

/// Aggregate strength of a hand: rank values plus duplicate-rank bonuses.
///
/// ```
/// use tongits_engine::cards::parse_cards;
/// use tongits_engine::deal::hand_strength;
///
/// // 5 + 5 + 9 = 19, plus 10 for the pair of fives.
/// assert_eq!(hand_strength(&parse_cards("5H 5S 9C").unwrap()), 29);
/// ```
#[must_use]
pub fn hand_strength(cards: &[Card]) -> u32 {
    let mut counts: FxHashMap<Rank, u32> = FxHashMap::default();
    let mut strength = 0;
    for card in cards {
        strength += u32::from(card.points());
        *counts.entry(card.rank).or_default() += 1;
    }

    for &count in counts.values() {
        if count >= 2 {
            strength += PAIR_BONUS;
        }
        if count >= 3 {
            strength += TRIPLE_BONUS;
        }
    }
    strength
}

/// What a policy did to the dealt hands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DealAdjustment {
    /// Whether the policy's probability roll selected this deal for adjustment.
    pub triggered: bool,
    /// Swaps performed, as `(card moved to the favoured seat, card moved away)`.
    pub swaps: Vec<(Card, Card)>,
}

impl DealAdjustment {
    /// No change was made.
    #[must_use]
    pub fn unchanged() -> Self {
        Self::default()
    }
}

/// Inspects and optionally rebalances the two starting hands.
pub trait DealBiasPolicy: Send + Sync + fmt::Debug {
    /// Adjust `hands` in place, returning a record of what changed.
    ///
    /// Implementations may only move cards between the two hands.
    fn adjust(&self, hands: &mut PlayerMap<Vec<Card>>, rng: &mut GameRng) -> DealAdjustment;
}

/// Deals are left exactly as shuffled.
#[derive(Clone, Copy, Debug, Default)]
pub struct FairDeal;

impl DealBiasPolicy for FairDeal {
    fn adjust(&self, _hands: &mut PlayerMap<Vec<Card>>, _rng: &mut GameRng) -> DealAdjustment {
        DealAdjustment::unchanged()
    }
}

/// Favours one seat.
///
/// With `probability`, and only when the favoured hand is weaker by
/// [`hand_strength`], swaps the favoured hand's lowest-value card for the
/// opponent's highest-value card, up to `max_swaps` times. Swapping stops
/// early once it would no longer improve the favoured hand.
#[derive(Clone, Copy, Debug)]
pub struct WeightedTowardPlayer {
    pub player: PlayerId,
    pub probability: f64,
    pub max_swaps: u8,
}

impl WeightedTowardPlayer {
    /// The legacy house-edge dealer: favours seat 0 in 80% of deals, 3 swaps.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            player: PlayerId::FIRST,
            probability: 0.8,
            max_swaps: 3,
        }
    }
}

fn lowest_index(cards: &[Card]) -> Option<usize> {
    // First occurrence wins ties.
    cards
        .iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| a.points().cmp(&b.points()).then(ia.cmp(ib)))
        .map(|(i, _)| i)
}

fn highest_index(cards: &[Card]) -> Option<usize> {
    cards
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.points().cmp(&b.points()).then(ib.cmp(ia)))
        .map(|(i, _)| i)
}

impl DealBiasPolicy for WeightedTowardPlayer {
    fn adjust(&self, hands: &mut PlayerMap<Vec<Card>>, rng: &mut GameRng) -> DealAdjustment {
        if !rng.gen_bool(self.probability) {
            return DealAdjustment::unchanged();
        }

        let favoured_strength = hand_strength(&hands[self.player]);
        let opponent_strength = hand_strength(&hands[self.player.other()]);
        let mut adjustment = DealAdjustment {
            triggered: true,
            swaps: Vec::new(),
        };
        if favoured_strength >= opponent_strength {
            return adjustment;
        }

        let (first, second) = hands.pair_mut();
        let (favoured, opponent) = if self.player == PlayerId::FIRST {
            (first, second)
        } else {
            (second, first)
        };

        for _ in 0..self.max_swaps {
            let (Some(low), Some(high)) = (lowest_index(favoured), highest_index(opponent)) else {
                break;
            };
            if opponent[high].points() <= favoured[low].points() {
                break;
            }
            std::mem::swap(&mut favoured[low], &mut opponent[high]);
            adjustment.swaps.push((favoured[low], opponent[high]));
        }

        if !adjustment.swaps.is_empty() {
            warn!(
                "deal bias toward {} swapped {} card(s) ({} vs {} strength)",
                self.player,
                adjustment.swaps.len(),
                favoured_strength,
                opponent_strength
            );
        }
        adjustment
    }
}

/// Serializable declaration of the deal bias in effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DealBias {
    /// [`FairDeal`].
    #[default]
    Fair,
    /// [`WeightedTowardPlayer`].
    WeightedTowardPlayer {
        player: PlayerId,
        probability: f64,
        max_swaps: u8,
    },
}

impl DealBias {
    /// Instantiate the policy.
    #[must_use]
    pub fn build(&self) -> Box<dyn DealBiasPolicy> {
        match *self {
            DealBias::Fair => Box::new(FairDeal),
            DealBias::WeightedTowardPlayer {
                player,
                probability,
                max_swaps,
            } => Box::new(WeightedTowardPlayer {
                player,
                probability,
                max_swaps,
            }),
        }
    }

    /// True for any policy other than [`DealBias::Fair`].
    #[must_use]
    pub fn is_biased(&self) -> bool {
        !matches!(self, DealBias::Fair)
    }
}

impl From<WeightedTowardPlayer> for DealBias {
    fn from(policy: WeightedTowardPlayer) -> Self {
        DealBias::WeightedTowardPlayer {
            player: policy.player,
            probability: policy.probability,
            max_swaps: policy.max_swaps,
        }
    }
}
