//! Session configuration.
//!
//! `TongitsConfig` fixes the table rules for one session: hand size, meld
//! minimum, the low-point win threshold, and the declared shuffle, deal
//! bias, and fight policies. It is plain serde data so a host can load it
//! from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::DECK_SIZE;
use crate::deal::{DealBias, ShuffleKind};
use crate::rules::FightRule;

/// Cards dealt to each player under standard rules.
pub const DEFAULT_HAND_SIZE: usize = 12;

/// Smallest legal meld.
pub const MIN_MELD_SIZE: usize = 3;

/// Combined hand + meld points at or below which a player wins.
pub const DEFAULT_LOW_POINT_THRESHOLD: u32 = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("hand size must be at least 1")]
    EmptyHand,
    #[error("dealing {hand_size} cards each plus a discard needs {needed} cards, deck has 52")]
    DeckTooSmall { hand_size: usize, needed: usize },
    #[error("minimum meld size {0} is below 3")]
    MeldTooSmall(usize),
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Table rules for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TongitsConfig {
    /// Cards dealt to each player.
    pub hand_size: usize,

    /// Minimum cards in a meld.
    pub min_meld_size: usize,

    /// Low-point win threshold (inclusive).
    pub low_point_threshold: u32,

    /// Deck ordering strategy.
    pub shuffle: ShuffleKind,

    /// Starting-hand rebalancing, applied only when a deal requests player advantage.
    pub deal_bias: DealBias,

    /// Which cards a fight may move.
    pub fight: FightRule,
}

impl Default for TongitsConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            min_meld_size: MIN_MELD_SIZE,
            low_point_threshold: DEFAULT_LOW_POINT_THRESHOLD,
            shuffle: ShuffleKind::Uniform,
            deal_bias: DealBias::Fair,
            fight: FightRule::MatchOpponentMeld,
        }
    }
}

impl TongitsConfig {
    /// Set cards dealt per player.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the minimum meld size.
    #[must_use]
    pub fn with_min_meld_size(mut self, size: usize) -> Self {
        self.min_meld_size = size;
        self
    }

    /// Set the low-point win threshold.
    #[must_use]
    pub fn with_low_point_threshold(mut self, threshold: u32) -> Self {
        self.low_point_threshold = threshold;
        self
    }

    /// Set the shuffle strategy.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: ShuffleKind) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set the deal bias policy.
    #[must_use]
    pub fn with_deal_bias(mut self, deal_bias: impl Into<DealBias>) -> Self {
        self.deal_bias = deal_bias.into();
        self
    }

    /// Set the fight policy.
    #[must_use]
    pub fn with_fight(mut self, fight: FightRule) -> Self {
        self.fight = fight;
        self
    }

    /// Cards removed from the deck by the opening deal.
    #[must_use]
    pub fn cards_dealt(&self) -> usize {
        2 * self.hand_size + 1
    }

    /// Check the rules are playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::EmptyHand);
        }
        if self.cards_dealt() > DECK_SIZE {
            return Err(ConfigError::DeckTooSmall {
                hand_size: self.hand_size,
                needed: self.cards_dealt(),
            });
        }
        if self.min_meld_size < MIN_MELD_SIZE {
            return Err(ConfigError::MeldTooSmall(self.min_meld_size));
        }
        if let ShuffleKind::RankSorted { keep_probability } = self.shuffle {
            check_probability("shuffle.keep_probability", keep_probability)?;
        }
        if let DealBias::WeightedTowardPlayer { probability, .. } = self.deal_bias {
            check_probability("deal_bias.probability", probability)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}
