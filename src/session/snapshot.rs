//! Viewer-filtered projections of a `GameState`.
//!
//! A snapshot shows the viewer their own hand and everything laid face up,
//! but only the size of the opponent's hand and of the deck.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{GameState, Phase, PlayerId, PlayerMap};
use crate::rules::{player_points, GameResult};

/// What one seat is allowed to see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    pub viewer: PlayerId,
    pub hand: Vec<Card>,
    pub opponent_hand_count: usize,
    pub melds: PlayerMap<Vec<Vec<Card>>>,
    pub fight_piles: PlayerMap<Vec<Card>>,
    pub deck_size: usize,
    pub discard_pile: Vec<Card>,
    pub current_player: PlayerId,
    pub game_phase: Phase,
    /// The viewer's hand + meld points.
    pub points: u32,
    pub result: Option<GameResult>,
}

impl GameStateSnapshot {
    /// Project `state` for `viewer`.
    #[must_use]
    pub fn for_viewer(state: &GameState, viewer: PlayerId) -> Self {
        let own = state.player(viewer);
        Self {
            viewer,
            hand: own.hand.iter().copied().collect(),
            opponent_hand_count: state.player(viewer.other()).hand.len(),
            melds: state.players.map(|p| p.melds.iter().cloned().collect()),
            fight_piles: state.players.map(|p| p.fight_pile.iter().copied().collect()),
            deck_size: state.deck.len(),
            discard_pile: state.discard_pile.iter().copied().collect(),
            current_player: state.current_player,
            game_phase: state.phase,
            points: player_points(own),
            result: state.result,
        }
    }

    /// Whether it is the viewer's turn.
    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.current_player == self.viewer && self.game_phase != Phase::GameOver
    }
}
