//! Fight legality.
//!
//! A fight moves cards from the acting player's hand to their fight pile
//! to contest the opponent's laid-down melds. Which cards may be fought is
//! a table rule: `FightPolicy` implementations are selected through
//! `FightRule` in `TongitsConfig`, the same way deal bias is declared.
//!
//! Independent of the policy, the engine never lets a fight empty the hand.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{ActionError, GameState, PlayerId};

/// Decides whether `player` may fight with `cards`.
pub trait FightPolicy: Send + Sync + fmt::Debug {
    /// `Ok` if the selection is an acceptable fight. `cards` is non-empty
    /// and already resolved from valid, distinct hand indices.
    fn check(&self, state: &GameState, player: PlayerId, cards: &[Card]) -> Result<(), ActionError>;
}

/// Any selection is accepted.
///
/// The legacy engine behaviour, where the matching was left to the client.
#[derive(Clone, Copy, Debug, Default)]
pub struct UncheckedFight;

impl FightPolicy for UncheckedFight {
    fn check(&self, _state: &GameState, _player: PlayerId, _cards: &[Card]) -> Result<(), ActionError> {
        Ok(())
    }
}

/// Every fought card must share a rank with a card in one of the
/// opponent's melds.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchOpponentMeld;

impl FightPolicy for MatchOpponentMeld {
    fn check(&self, state: &GameState, player: PlayerId, cards: &[Card]) -> Result<(), ActionError> {
        let melds = &state.player(player.other()).melds;
        let unmatched = cards.iter().find(|card| {
            !melds
                .iter()
                .flatten()
                .any(|melded| melded.rank == card.rank)
        });

        match unmatched {
            Some(&card) => Err(ActionError::UnmatchedFight(card)),
            None => Ok(()),
        }
    }
}

/// Serializable declaration of the fight policy in effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FightRule {
    /// [`MatchOpponentMeld`].
    #[default]
    MatchOpponentMeld,
    /// [`UncheckedFight`].
    Unchecked,
}

impl FightRule {
    /// Instantiate the policy.
    #[must_use]
    pub fn build(&self) -> Box<dyn FightPolicy> {
        match self {
            FightRule::MatchOpponentMeld => Box::new(MatchOpponentMeld),
            FightRule::Unchecked => Box::new(UncheckedFight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Deck};
    use crate::core::Player;

    fn cards(tokens: &str) -> Vec<Card> {
        parse_cards(tokens).unwrap()
    }

    fn against(opponent: Player) -> GameState {
        let mut state = GameState::new(Deck::from(cards("9S")));
        state.players[PlayerId::FIRST] = Player::with_hand(cards("4C 7H KD"));
        state.players[PlayerId::SECOND] = opponent;
        state
    }

    #[test]
    fn test_match_requires_opponent_rank() {
        let state = against(Player::with_hand(cards("2S")).with_meld(cards("4H 4S 4D")));
        let policy = MatchOpponentMeld;

        assert!(policy.check(&state, PlayerId::FIRST, &cards("4C")).is_ok());
        assert_eq!(
            policy.check(&state, PlayerId::FIRST, &cards("4C 7H")),
            Err(ActionError::UnmatchedFight(cards("7H")[0]))
        );
    }

    #[test]
    fn test_match_rejects_when_opponent_has_no_melds() {
        let state = against(Player::with_hand(cards("4H 4S 4D")));
        assert!(MatchOpponentMeld.check(&state, PlayerId::FIRST, &cards("4C")).is_err());
        assert!(UncheckedFight.check(&state, PlayerId::FIRST, &cards("4C")).is_ok());
    }

    #[test]
    fn test_own_melds_do_not_count() {
        let mut state = against(Player::with_hand(cards("2S")));
        state.players[PlayerId::FIRST] = state.players[PlayerId::FIRST].clone().with_meld(cards("7C 7D 7S"));
        assert!(MatchOpponentMeld.check(&state, PlayerId::FIRST, &cards("7H")).is_err());
    }

    #[test]
    fn test_fight_rule_serde() {
        assert_eq!(FightRule::default(), FightRule::MatchOpponentMeld);
        let json = serde_json::to_string(&FightRule::Unchecked).unwrap();
        assert_eq!(json, r#"{"kind":"unchecked"}"#);
        assert_eq!(serde_json::from_str::<FightRule>(&json).unwrap(), FightRule::Unchecked);
    }
}
