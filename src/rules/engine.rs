//! Turn action engine.
//!
//! `TongitsRules` applies one action at a time to a caller-owned
//! `GameState`. Every operation:
//! - validates phase, turn owner, and arguments against the input state
//! - clones the state (O(1), `im` structures) and mutates only the clone
//! - returns the new state, or an `ActionError` with the input untouched
//!
//! Phases cycle `Draw -> Action -> Draw` (other seat) until `finish` moves
//! a decided game to `GameOver`, after which everything is rejected.
//!
//! ```
//! use tongits_engine::core::{GameRng, Phase, PlayerId};
//! use tongits_engine::rules::TongitsRules;
//!
//! let rules = TongitsRules::default();
//! let mut rng = GameRng::new(42);
//!
//! let state = rules.initialize_game(&mut rng);
//! let state = rules.deal_initial_cards(&state, false, &mut rng).unwrap();
//! let state = rules.draw(&state, PlayerId::FIRST, false).unwrap();
//! assert_eq!(state.phase, Phase::Action);
//!
//! let state = rules.discard(&state, PlayerId::FIRST, 0).unwrap();
//! assert_eq!(state.current_player, PlayerId::SECOND);
//! ```

use std::cmp::Reverse;

use im::Vector;
use log::{debug, info, trace};
use smallvec::SmallVec;

use super::fight::FightPolicy;
use super::meld::is_valid_meld;
use super::scoring::{evaluate_with_threshold, GameResult};
use crate::cards::{generate_deck, Card};
use crate::core::{
    Action, ActionError, ActionKind, ConfigError, GameRng, GameState, Phase, PlayerId, PlayerMap,
    TongitsConfig,
};
use crate::deal::{shuffle, DealBiasPolicy, FairDeal, ShuffleStrategy};

/// The rules of one table: validated configuration plus the shuffle,
/// deal, and fight policies it declares. Holds no session state.
#[derive(Debug)]
pub struct TongitsRules {
    config: TongitsConfig,
    shuffle: Box<dyn ShuffleStrategy>,
    deal_bias: Box<dyn DealBiasPolicy>,
    fight: Box<dyn FightPolicy>,
}

impl Default for TongitsRules {
    fn default() -> Self {
        Self::from_valid(TongitsConfig::default())
    }
}

impl TongitsRules {
    /// Validate `config` and build its policies.
    pub fn new(config: TongitsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: TongitsConfig) -> Self {
        Self {
            shuffle: config.shuffle.build(),
            deal_bias: config.deal_bias.build(),
            fight: config.fight.build(),
            config,
        }
    }

    /// Get the table configuration.
    #[must_use]
    pub fn config(&self) -> &TongitsConfig {
        &self.config
    }

    // === Session setup ===

    /// A fresh session: shuffled deck, empty hands, seat 0 to draw.
    #[must_use]
    pub fn initialize_game(&self, rng: &mut GameRng) -> GameState {
        let deck = shuffle(generate_deck(), self.shuffle.as_ref(), rng);
        debug!("initialized game with {:?} shuffle", self.config.shuffle);
        GameState::new(deck)
    }

    /// Deal the starting hands and open the discard pile.
    ///
    /// The first `hand_size` cards off the deck go to seat 0, the next
    /// `hand_size` to seat 1. With `player_advantage` the configured deal
    /// bias policy may then swap cards between the hands; without it the
    /// deal is left as shuffled. One more card starts the discard pile.
    pub fn deal_initial_cards(
        &self,
        state: &GameState,
        player_advantage: bool,
        rng: &mut GameRng,
    ) -> Result<GameState, ActionError> {
        if !state.is_undealt() {
            return Err(ActionError::AlreadyDealt);
        }

        let mut next = state.clone();
        let mut hands: PlayerMap<Vec<Card>> = PlayerMap::default();
        for seat in PlayerId::all() {
            for _ in 0..self.config.hand_size {
                let card = next.deck.draw().ok_or(ActionError::DeckExhausted)?;
                hands[seat].push(card);
            }
        }

        let adjustment = if player_advantage {
            self.deal_bias.adjust(&mut hands, rng)
        } else {
            FairDeal.adjust(&mut hands, rng)
        };

        let opening = next.deck.draw().ok_or(ActionError::DeckExhausted)?;
        next.discard_pile.push_back(opening);
        for (seat, hand) in hands.iter() {
            next.player_mut(seat).hand = hand.iter().copied().collect();
        }

        debug!(
            "dealt {} cards each (bias triggered: {}, swaps: {}), opened discard with {}, {} left in deck",
            self.config.hand_size,
            adjustment.triggered,
            adjustment.swaps.len(),
            opening,
            next.deck.len()
        );
        Ok(next)
    }

    // === Turn actions ===

    /// Take the top card of the deck, or of the discard pile.
    pub fn draw(
        &self,
        state: &GameState,
        player: PlayerId,
        from_discard: bool,
    ) -> Result<GameState, ActionError> {
        ensure_can_act(state, player, ActionKind::Draw)?;

        let mut next = state.clone();
        let card = if from_discard {
            next.discard_pile.pop_back().ok_or(ActionError::EmptyPile)?
        } else {
            next.deck.draw().ok_or(ActionError::DeckExhausted)?
        };

        next.record_action(player, Action::Draw { from_discard });
        next.player_mut(player).hand.push_back(card);
        next.phase = Phase::Action;
        Ok(next)
    }

    /// Put the card at `hand_index` on the discard pile and pass the turn.
    pub fn discard(
        &self,
        state: &GameState,
        player: PlayerId,
        hand_index: usize,
    ) -> Result<GameState, ActionError> {
        ensure_can_act(state, player, ActionKind::Discard)?;
        select_cards(&state.player(player).hand, &[hand_index])?;

        let mut next = state.clone();
        next.record_action(player, Action::discard(hand_index));
        let card = next.player_mut(player).hand.remove(hand_index);
        next.discard_pile.push_back(card);
        next.advance_turn();
        Ok(next)
    }

    /// Lay the cards at `hand_indices` down as a new meld.
    ///
    /// The meld keeps the order the indices were given in.
    pub fn create_meld(
        &self,
        state: &GameState,
        player: PlayerId,
        hand_indices: &[usize],
    ) -> Result<GameState, ActionError> {
        ensure_can_act(state, player, ActionKind::CreateMeld)?;
        let cards = select_cards(&state.player(player).hand, hand_indices)?;
        if cards.len() < self.config.min_meld_size || !is_valid_meld(&cards) {
            return Err(ActionError::InvalidMeld(cards));
        }

        let mut next = state.clone();
        next.record_action(player, Action::create_meld(hand_indices));
        let seat = next.player_mut(player);
        remove_indices(&mut seat.hand, hand_indices);
        seat.melds.push_back(cards);
        Ok(next)
    }

    /// Move the cards at `hand_indices` to the fight pile.
    ///
    /// The configured fight policy decides which cards qualify. A fight may
    /// never take the last card from the hand.
    pub fn fight(
        &self,
        state: &GameState,
        player: PlayerId,
        hand_indices: &[usize],
    ) -> Result<GameState, ActionError> {
        ensure_can_act(state, player, ActionKind::Fight)?;
        if hand_indices.is_empty() {
            return Err(ActionError::NoCardsSelected);
        }
        let hand = &state.player(player).hand;
        let cards = select_cards(hand, hand_indices)?;
        if cards.len() >= hand.len() {
            return Err(ActionError::FightEmptiesHand);
        }
        self.fight.check(state, player, &cards)?;

        let mut next = state.clone();
        next.record_action(player, Action::fight(hand_indices));
        let seat = next.player_mut(player);
        remove_indices(&mut seat.hand, hand_indices);
        seat.fight_pile.extend(cards);
        Ok(next)
    }

    /// Apply any action.
    pub fn apply(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<GameState, ActionError> {
        let result = match action {
            Action::Draw { from_discard } => self.draw(state, player, *from_discard),
            Action::Discard { hand_index } => self.discard(state, player, *hand_index),
            Action::CreateMeld { hand_indices } => self.create_meld(state, player, hand_indices),
            Action::Fight { hand_indices } => self.fight(state, player, hand_indices),
        };

        match &result {
            Ok(next) => debug!(
                "{player} {}: turn {}, {} phase, {} in deck",
                action.kind(),
                next.turn_number,
                next.phase,
                next.deck.len()
            ),
            Err(err) => trace!("rejected {} from {player}: {err}", action.kind()),
        }
        result
    }

    // === Queries ===

    /// Action kinds `player` may currently attempt.
    ///
    /// Empty when it is not their turn, before the deal, and after game over.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<ActionKind> {
        if state.is_undealt() || player != state.current_player {
            return Vec::new();
        }

        let hand = &state.player(player).hand;
        match state.phase {
            Phase::Draw => {
                if state.deck.is_empty() && state.discard_pile.is_empty() {
                    Vec::new()
                } else {
                    vec![ActionKind::Draw]
                }
            }
            Phase::Action | Phase::Discard => {
                if hand.is_empty() {
                    return Vec::new();
                }
                let mut kinds = vec![ActionKind::Discard];
                let cards: Vec<Card> = hand.iter().copied().collect();
                if contains_meld(&cards, self.config.min_meld_size) {
                    kinds.push(ActionKind::CreateMeld);
                }
                if self.can_fight(state, player) {
                    kinds.push(ActionKind::Fight);
                }
                kinds
            }
            Phase::GameOver => Vec::new(),
        }
    }

    /// Whether some single card could be fought without emptying the hand.
    fn can_fight(&self, state: &GameState, player: PlayerId) -> bool {
        let hand = &state.player(player).hand;
        hand.len() > 1
            && hand
                .iter()
                .any(|&card| self.fight.check(state, player, &[card]).is_ok())
    }

    /// The action to submit on `player`'s behalf when they do not act.
    ///
    /// Draws from the deck (or the discard pile once the deck is empty), or
    /// discards the highest-value card. `None` if `player` cannot act.
    #[must_use]
    pub fn fallback_action(&self, state: &GameState, player: PlayerId) -> Option<Action> {
        if state.is_undealt() || player != state.current_player {
            return None;
        }

        match state.phase {
            Phase::Draw if !state.deck.is_empty() => Some(Action::draw_from_deck()),
            Phase::Draw if !state.discard_pile.is_empty() => Some(Action::draw_from_discard()),
            Phase::Action | Phase::Discard => state
                .player(player)
                .hand
                .iter()
                .enumerate()
                .max_by_key(|(index, card)| (card.points(), Reverse(*index)))
                .map(|(index, _)| Action::discard(index)),
            _ => None,
        }
    }

    /// Decide the game under this table's threshold.
    #[must_use]
    pub fn evaluate(&self, state: &GameState) -> Option<GameResult> {
        evaluate_with_threshold(state, self.config.low_point_threshold)
    }

    /// Move a decided game to `GameOver`, recording the result.
    ///
    /// `None` if the game is still undecided or already over.
    #[must_use]
    pub fn finish(&self, state: &GameState) -> Option<GameState> {
        if state.is_over() {
            return None;
        }
        let result = self.evaluate(state)?;

        let mut next = state.clone();
        next.result = Some(result);
        next.phase = Phase::GameOver;
        info!("game over on turn {}: {result}", next.turn_number);
        Some(next)
    }
}

// === Helpers ===

fn ensure_can_act(state: &GameState, player: PlayerId, action: ActionKind) -> Result<(), ActionError> {
    if state.is_over() {
        return Err(ActionError::IllegalPhase {
            action,
            phase: state.phase,
        });
    }
    if state.is_undealt() {
        return Err(ActionError::NotDealt);
    }
    if player != state.current_player {
        return Err(ActionError::NotYourTurn {
            player,
            current: state.current_player,
        });
    }

    let allowed = match action {
        ActionKind::Draw => state.phase == Phase::Draw,
        ActionKind::Discard | ActionKind::CreateMeld | ActionKind::Fight => state.phase.is_action(),
    };
    if allowed {
        Ok(())
    } else {
        Err(ActionError::IllegalPhase {
            action,
            phase: state.phase,
        })
    }
}

/// Resolve hand indices to cards, rejecting out-of-range and repeated indices.
fn select_cards(hand: &Vector<Card>, indices: &[usize]) -> Result<Vec<Card>, ActionError> {
    let mut seen: SmallVec<[usize; 8]> = SmallVec::new();
    let mut cards = Vec::with_capacity(indices.len());
    for &index in indices {
        let card = hand.get(index).ok_or(ActionError::IndexOutOfBounds {
            index,
            hand_len: hand.len(),
        })?;
        if seen.contains(&index) {
            return Err(ActionError::DuplicateIndex(index));
        }
        seen.push(index);
        cards.push(*card);
    }
    Ok(cards)
}

/// Remove already-validated indices, highest first so earlier ones stay put.
fn remove_indices(hand: &mut Vector<Card>, indices: &[usize]) {
    let mut sorted: SmallVec<[usize; 8]> = SmallVec::from_slice(indices);
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    for index in sorted {
        hand.remove(index);
    }
}

/// Whether any `size` cards of `hand` form a meld.
///
/// Every meld longer than `size` contains a meld of exactly `size`, so
/// checking that length is enough.
fn contains_meld(hand: &[Card], size: usize) -> bool {
    fn search(hand: &[Card], start: usize, picked: &mut Vec<Card>, size: usize) -> bool {
        if picked.len() == size {
            return is_valid_meld(picked);
        }
        for (offset, &card) in hand[start..].iter().enumerate() {
            picked.push(card);
            if search(hand, start + offset + 1, picked, size) {
                return true;
            }
            picked.pop();
        }
        false
    }

    hand.len() >= size && search(hand, 0, &mut Vec::with_capacity(size), size)
}
