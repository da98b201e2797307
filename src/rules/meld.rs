//! Meld validation.
//!
//! A meld is either a **set** (three or more cards of one rank, all suits
//! distinct) or a **run** (three or more cards of one suit with strictly
//! consecutive ranks). Aces are low, except that a run holding both an ace
//! and a king is also tried with the ace high, so Q-K-A is a run. K-A-2 never
//! is.
//!
//! ```
//! use tongits_engine::cards::parse_cards;
//! use tongits_engine::rules::{classify_meld, is_valid_meld, MeldKind};
//!
//! assert_eq!(classify_meld(&parse_cards("4H 4S 4D").unwrap()), Some(MeldKind::Set));
//! assert_eq!(classify_meld(&parse_cards("QS KS AS").unwrap()), Some(MeldKind::Run));
//! assert!(!is_valid_meld(&parse_cards("KS AS 2S").unwrap()));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Rank};
use crate::core::MIN_MELD_SIZE;

/// The two shapes a meld can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeldKind {
    Set,
    Run,
}

/// Classify `cards` as a set or a run, or `None` if they form neither.
///
/// Input order does not matter. Fewer than three cards never validate.
#[must_use]
pub fn classify_meld(cards: &[Card]) -> Option<MeldKind> {
    if cards.len() < MIN_MELD_SIZE {
        return None;
    }
    if is_set(cards) {
        Some(MeldKind::Set)
    } else if is_run(cards) {
        Some(MeldKind::Run)
    } else {
        None
    }
}

/// True if `cards` form a set or a run.
#[must_use]
pub fn is_valid_meld(cards: &[Card]) -> bool {
    classify_meld(cards).is_some()
}

fn is_set(cards: &[Card]) -> bool {
    let rank = cards[0].rank;
    if cards.iter().any(|card| card.rank != rank) {
        return false;
    }
    // Four suits fit in a bitmask; a repeated bit means a repeated card.
    let mut seen = 0u8;
    for card in cards {
        let bit = 1 << card.suit as u8;
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}

fn is_run(cards: &[Card]) -> bool {
    let suit = cards[0].suit;
    if cards.iter().any(|card| card.suit != suit) {
        return false;
    }

    let mut low: SmallVec<[u8; 8]> = cards.iter().map(|card| card.rank.value()).collect();
    if is_consecutive(&mut low) {
        return true;
    }

    let has_ace = cards.iter().any(|card| card.rank == Rank::Ace);
    let has_king = cards.iter().any(|card| card.rank == Rank::King);
    if has_ace && has_king {
        let mut high: SmallVec<[u8; 8]> = cards.iter().map(|card| card.rank.high_value()).collect();
        return is_consecutive(&mut high);
    }
    false
}

fn is_consecutive(values: &mut [u8]) -> bool {
    values.sort_unstable();
    values.windows(2).all(|pair| pair[1] == pair[0] + 1)
}
