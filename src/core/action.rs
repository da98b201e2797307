//! Turn actions.
//!
//! An `Action` is one command from the acting player: draw, discard, lay a
//! meld, or move cards to the fight pile. Cards are addressed by their index
//! in the player's current hand, which is stable between actions.
//!
//! ```
//! use tongits_engine::core::{Action, ActionKind};
//!
//! let meld = Action::create_meld(&[0, 3, 4]);
//! assert_eq!(meld.kind(), ActionKind::CreateMeld);
//!
//! let json = serde_json::to_string(&meld).unwrap();
//! assert_eq!(json, r#"{"type":"createMeld","handIndices":[0,3,4]}"#);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;

/// Hand indices selected by one action. Melds rarely exceed four cards.
pub type HandIndices = SmallVec<[usize; 4]>;

/// A complete turn action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Take the top card of the deck, or of the discard pile.
    Draw { from_discard: bool },
    /// Put one card from hand on the discard pile, ending the turn.
    Discard { hand_index: usize },
    /// Lay the selected cards down as a new meld.
    CreateMeld { hand_indices: HandIndices },
    /// Move the selected cards to the fight pile.
    Fight { hand_indices: HandIndices },
}

impl Action {
    /// Draw from the deck.
    #[must_use]
    pub fn draw_from_deck() -> Self {
        Action::Draw {
            from_discard: false,
        }
    }

    /// Draw from the discard pile.
    #[must_use]
    pub fn draw_from_discard() -> Self {
        Action::Draw { from_discard: true }
    }

    /// Discard the card at `hand_index`.
    #[must_use]
    pub fn discard(hand_index: usize) -> Self {
        Action::Discard { hand_index }
    }

    /// Meld the cards at `hand_indices`.
    #[must_use]
    pub fn create_meld(hand_indices: &[usize]) -> Self {
        Action::CreateMeld {
            hand_indices: SmallVec::from_slice(hand_indices),
        }
    }

    /// Fight with the cards at `hand_indices`.
    #[must_use]
    pub fn fight(hand_indices: &[usize]) -> Self {
        Action::Fight {
            hand_indices: SmallVec::from_slice(hand_indices),
        }
    }

    /// The kind of this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Draw { .. } => ActionKind::Draw,
            Action::Discard { .. } => ActionKind::Discard,
            Action::CreateMeld { .. } => ActionKind::CreateMeld,
            Action::Fight { .. } => ActionKind::Fight,
        }
    }
}

/// Action kinds, without arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Draw,
    Discard,
    CreateMeld,
    Fight,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Draw => "draw",
            ActionKind::Discard => "discard",
            ActionKind::CreateMeld => "create meld",
            ActionKind::Fight => "fight",
        };
        f.write_str(name)
    }
}

/// An accepted action with metadata, kept in the state's history.
///
/// Used for:
/// - Replay/debugging
/// - Reconnect catch-up for remote participants
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
