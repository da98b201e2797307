//! Game state: the authoritative snapshot of one session.
//!
//! ## GameState
//!
//! Everything the rules need, and nothing else:
//! - Remaining deck and the discard pile (top = last)
//! - Both players' hands, melds, and fight piles
//! - Turn owner, phase, turn counter
//! - Action history and, once decided, the result
//!
//! The engine never holds a `GameState` itself. Callers own it and hand it
//! to `rules::engine` one action at a time. All collections are `im`
//! persistent structures, so the engine can clone, apply, and return a new
//! state in O(1) without risking a half-applied action.

use std::fmt;

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::{Action, ActionRecord};
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, Deck, DECK_SIZE};
use crate::rules::GameResult;

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// The current player must draw.
    #[default]
    Draw,
    /// The current player must discard. Accepted wherever `Action` is.
    Discard,
    /// The current player has drawn and may meld, fight, or discard.
    Action,
    /// The session has a result; no further actions are accepted.
    GameOver,
}

impl Phase {
    /// Phases in which meld, fight, and discard are accepted.
    #[must_use]
    pub fn is_action(self) -> bool {
        matches!(self, Phase::Action | Phase::Discard)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Draw => "draw",
            Phase::Discard => "discard",
            Phase::Action => "action",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// One seat's cards.
///
/// Points are never stored; see `rules::scoring::player_points`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Private hand. Index order is stable between actions.
    pub hand: Vector<Card>,

    /// Laid-down melds in the order they were made.
    pub melds: Vector<Vec<Card>>,

    /// Cards moved out of hand by `fight`.
    pub fight_pile: Vector<Card>,
}

impl Player {
    /// A player holding `hand` with nothing laid down.
    #[must_use]
    pub fn with_hand(hand: impl IntoIterator<Item = Card>) -> Self {
        Self {
            hand: hand.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add a meld (builder style, for setting up positions).
    #[must_use]
    pub fn with_meld(mut self, meld: Vec<Card>) -> Self {
        self.melds.push_back(meld);
        self
    }

    /// Every card this player holds or has laid down.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.hand
            .iter()
            .chain(self.melds.iter().flatten())
            .chain(self.fight_pile.iter())
    }
}

/// Full session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Undealt cards, top = last.
    pub deck: Deck,

    /// Seats 0 and 1.
    pub players: PlayerMap<Player>,

    /// Discarded cards, top = last.
    pub discard_pile: Vector<Card>,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Current phase.
    #[serde(rename = "gamePhase")]
    pub phase: Phase,

    /// Turn number (starts at 1, advances on every discard).
    pub turn_number: u32,

    /// Action sequence within the current turn.
    pub action_sequence: u32,

    /// Accepted actions, oldest first.
    pub history: Vector<ActionRecord>,

    /// Set when the session reaches `Phase::GameOver`.
    pub result: Option<GameResult>,
}

impl GameState {
    /// A fresh, undealt state around `deck`: seat 0 to draw, turn 1.
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            players: PlayerMap::default(),
            discard_pile: Vector::new(),
            current_player: PlayerId::FIRST,
            phase: Phase::Draw,
            turn_number: 1,
            action_sequence: 0,
            history: Vector::new(),
            result: None,
        }
    }

    /// A seat's cards.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    /// Mutable access to a seat's cards.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// Top of the discard pile.
    #[must_use]
    pub fn top_discard(&self) -> Option<&Card> {
        self.discard_pile.back()
    }

    /// True until the opening deal has happened.
    #[must_use]
    pub fn is_undealt(&self) -> bool {
        self.deck.len() == DECK_SIZE
    }

    /// True once a result has been recorded.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Every card in the session, wherever it currently is.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.deck
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.players.iter().flat_map(|(_, p)| p.cards()))
    }

    /// Append an accepted action to the history.
    pub fn record_action(&mut self, player: PlayerId, action: Action) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
    }

    /// Pass the turn to the other seat, back in the draw phase.
    pub fn advance_turn(&mut self) {
        self.current_player = self.current_player.other();
        self.phase = Phase::Draw;
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    /// Serialize the full state for a checkpoint.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Restore a checkpoint produced by [`GameState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Failure to save or restore a checkpoint.
#[derive(Debug, Error)]
#[error("checkpoint encoding failed: {0}")]
pub struct CheckpointError(#[from] serde_json::Error);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{generate_deck, parse_cards};

    #[test]
    fn test_new_state() {
        let state = GameState::new(generate_deck());

        assert_eq!(state.current_player, PlayerId::FIRST);
        assert_eq!(state.phase, Phase::Draw);
        assert_eq!(state.turn_number, 1);
        assert!(state.is_undealt());
        assert!(!state.is_over());
        assert_eq!(state.cards().count(), DECK_SIZE);
        assert!(state.top_discard().is_none());
    }

    #[test]
    fn test_phase_helpers() {
        assert!(Phase::Action.is_action());
        assert!(Phase::Discard.is_action());
        assert!(!Phase::Draw.is_action());
        assert!(!Phase::GameOver.is_action());
        assert_eq!(serde_json::to_string(&Phase::GameOver).unwrap(), r#""gameOver""#);
    }

    #[test]
    fn test_player_cards() {
        let player = Player::with_hand(parse_cards("2C 9D").unwrap())
            .with_meld(parse_cards("4H 4S 4D").unwrap());
        assert_eq!(player.cards().count(), 5);
        assert_eq!(player.melds.len(), 1);
    }

    #[test]
    fn test_record_and_advance() {
        let mut state = GameState::new(generate_deck());
        state.record_action(PlayerId::FIRST, Action::draw_from_deck());
        state.record_action(PlayerId::FIRST, Action::discard(0));
        state.advance_turn();
        state.record_action(PlayerId::SECOND, Action::draw_from_discard());

        let sequences: Vec<_> = state.history.iter().map(|r| (r.turn, r.sequence)).collect();
        assert_eq!(sequences, vec![(1, 0), (1, 1), (2, 0)]);
        assert_eq!(state.current_player, PlayerId::SECOND);
        assert_eq!(state.phase, Phase::Draw);
    }

    #[test]
    fn test_clone_is_independent() {
        let state = GameState::new(generate_deck());
        let mut next = state.clone();
        next.deck.draw();
        next.phase = Phase::Action;

        assert_eq!(state.deck.len(), DECK_SIZE);
        assert_eq!(state.phase, Phase::Draw);
        assert_ne!(state, next);
    }

    #[test]
    fn test_json_field_names() {
        let state = GameState::new(generate_deck());
        let json = serde_json::to_value(&state).unwrap();

        assert!(json.get("discardPile").is_some());
        assert!(json.get("currentPlayer").is_some());
        assert_eq!(json["gamePhase"], "draw");
        assert!(json["players"][0].get("fightPile").is_some());
    }

    #[test]
    fn test_checkpoint_roundtrip() {
        let mut state = GameState::new(generate_deck());
        state.record_action(PlayerId::FIRST, Action::create_meld(&[0, 1, 2]));

        let bytes = state.to_bytes().unwrap();
        assert_eq!(GameState::from_bytes(&bytes).unwrap(), state);
        assert!(GameState::from_bytes(b"garbage").is_err());
    }
}
