//! Scoring and win evaluation.
//!
//! Points are always derived from the cards, never stored. A player wins by
//! going out (empty hand with at least one meld down) or by holding a
//! combined hand + meld total at or below the low-point threshold. Player 0
//! is checked before player 1. If the deck runs out before either happens,
//! the lower total wins and equal totals draw.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{rank_value, Card};
use crate::core::{GameState, Phase, Player, PlayerId, DEFAULT_LOW_POINT_THRESHOLD};

/// Why a game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WinReason {
    /// Empty hand with at least one meld laid down.
    WentOut,
    /// Hand + meld points at or below the threshold.
    LowPoints,
    /// Lowest total when the deck ran out.
    DeckExhausted,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId, WinReason),
    /// Exhausted deck with equal totals.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p, _) if *p == player)
    }

    /// The winning seat, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(player, _) => Some(*player),
            GameResult::Draw => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Winner(player, WinReason::WentOut) => write!(f, "{player} went out"),
            GameResult::Winner(player, WinReason::LowPoints) => write!(f, "{player} won on low points"),
            GameResult::Winner(player, WinReason::DeckExhausted) => {
                write!(f, "{player} won on points after the deck ran out")
            }
            GameResult::Draw => f.write_str("draw"),
        }
    }
}

/// Sum of rank values (A=1 .. K=13).
#[must_use]
pub fn hand_points<'a>(cards: impl IntoIterator<Item = &'a Card>) -> u32 {
    cards.into_iter().map(|card| u32::from(rank_value(card.rank))).sum()
}

/// Hand points plus the points of every laid-down meld.
///
/// Fight pile cards do not count.
#[must_use]
pub fn player_points(player: &Player) -> u32 {
    hand_points(&player.hand) + hand_points(player.melds.iter().flatten())
}

/// Whether `player` satisfies a win condition, and which.
#[must_use]
pub fn check_win(player: &Player, threshold: u32) -> Option<WinReason> {
    if player.hand.is_empty() && !player.melds.is_empty() {
        Some(WinReason::WentOut)
    } else if player_points(player) <= threshold {
        Some(WinReason::LowPoints)
    } else {
        None
    }
}

/// Decide the game under the standard 10-point threshold.
#[must_use]
pub fn evaluate(state: &GameState) -> Option<GameResult> {
    evaluate_with_threshold(state, DEFAULT_LOW_POINT_THRESHOLD)
}

/// Decide the game, if it is decided.
///
/// An undealt state has empty hands and would trivially satisfy the
/// low-point rule, so it never yields a result.
#[must_use]
pub fn evaluate_with_threshold(state: &GameState, threshold: u32) -> Option<GameResult> {
    if state.is_undealt() {
        return None;
    }
    if let Some(result) = state.result {
        return Some(result);
    }

    for (seat, player) in state.players.iter() {
        if let Some(reason) = check_win(player, threshold) {
            return Some(GameResult::Winner(seat, reason));
        }
    }

    if state.deck.is_empty() && state.phase == Phase::Draw {
        let first = player_points(state.player(PlayerId::FIRST));
        let second = player_points(state.player(PlayerId::SECOND));
        return Some(match first.cmp(&second) {
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::FIRST, WinReason::DeckExhausted),
            std::cmp::Ordering::Greater => {
                GameResult::Winner(PlayerId::SECOND, WinReason::DeckExhausted)
            }
            std::cmp::Ordering::Equal => GameResult::Draw,
        });
    }
    None
}
