//! Action rejection errors.
//!
//! `ActionError` carries enough context for logs and tests; `ErrorKind` is
//! the coarse, serializable reason sent back to a remote participant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::ActionKind;
use super::player::PlayerId;
use super::state::Phase;
use crate::cards::Card;

/// Wire-level rejection reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    IllegalPhase,
    NotYourTurn,
    InvalidIndex,
    InvalidMeld,
    EmptyPile,
    DeckExhausted,
    /// The fight selection is not allowed at this table.
    IllegalFight,
    /// The command named a session other than the one it was sent to.
    UnknownSession,
}

/// Why an action was rejected. The input state is never modified.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{action} is not allowed during the {phase} phase")]
    IllegalPhase { action: ActionKind, phase: Phase },

    #[error("cards have already been dealt")]
    AlreadyDealt,

    #[error("cards have not been dealt yet")]
    NotDealt,

    #[error("{player} acted but it is {current}'s turn")]
    NotYourTurn { player: PlayerId, current: PlayerId },

    #[error("hand index {index} out of bounds for hand of {hand_len}")]
    IndexOutOfBounds { index: usize, hand_len: usize },

    #[error("hand index {0} selected more than once")]
    DuplicateIndex(usize),

    #[error("no cards selected")]
    NoCardsSelected,

    #[error("cards do not form a valid meld: {}", format_cards(.0))]
    InvalidMeld(Vec<Card>),

    #[error("{0} matches no rank in the opponent's melds")]
    UnmatchedFight(Card),

    #[error("a fight must leave at least one card in hand")]
    FightEmptiesHand,

    #[error("discard pile is empty")]
    EmptyPile,

    #[error("deck is exhausted")]
    DeckExhausted,
}

fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
}

impl ActionError {
    /// Coarse reason for the wire.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::IllegalPhase { .. } | ActionError::AlreadyDealt | ActionError::NotDealt => {
                ErrorKind::IllegalPhase
            }
            ActionError::NotYourTurn { .. } => ErrorKind::NotYourTurn,
            ActionError::IndexOutOfBounds { .. }
            | ActionError::DuplicateIndex(_)
            | ActionError::NoCardsSelected => ErrorKind::InvalidIndex,
            ActionError::InvalidMeld(_) => ErrorKind::InvalidMeld,
            ActionError::UnmatchedFight(_) | ActionError::FightEmptiesHand => ErrorKind::IllegalFight,
            ActionError::EmptyPile => ErrorKind::EmptyPile,
            ActionError::DeckExhausted => ErrorKind::DeckExhausted,
        }
    }
}
