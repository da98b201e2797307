//! State invariants: sanity checks that detect engine bugs.
//!
//! These should never trigger for a state produced by `rules::engine`.
//! Tests run them after every transition.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::player::PlayerId;
use super::state::GameState;
use crate::cards::{generate_deck, Card, DECK_SIZE};

/// A broken invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("card {0} appears {1} times")]
    Duplicated(Card, usize),

    #[error("card {0} is missing")]
    Missing(Card),

    #[error("session holds {0} cards, expected 52")]
    WrongTotal(usize),

    #[error("{player} has a meld of {len} cards")]
    ShortMeld { player: PlayerId, len: usize },
}

/// Check all state invariants.
///
/// Returns every violation found, or an empty list if the state is sound.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
    let mut total = 0;
    for card in state.cards() {
        *counts.entry(*card).or_default() += 1;
        total += 1;
    }

    if total != DECK_SIZE {
        violations.push(InvariantViolation::WrongTotal(total));
    }

    for card in generate_deck().iter() {
        match counts.get(card).copied().unwrap_or(0) {
            0 => violations.push(InvariantViolation::Missing(*card)),
            1 => {}
            n => violations.push(InvariantViolation::Duplicated(*card, n)),
        }
    }

    for (player, seat) in state.players.iter() {
        for meld in &seat.melds {
            if meld.len() < 3 {
                violations.push(InvariantViolation::ShortMeld {
                    player,
                    len: meld.len(),
                });
            }
        }
    }

    violations
}
