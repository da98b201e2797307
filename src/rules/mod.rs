//! Tongits rules: meld validation, scoring, and the turn action engine.
//!
//! - `meld`: pure set / run validation
//! - `scoring`: points, win conditions, exhausted-deck tie-break
//! - `fight`: which cards a fight may move
//! - `engine`: `TongitsRules`, which applies one action at a time

pub mod engine;
pub mod fight;
pub mod meld;
pub mod scoring;

pub use engine::TongitsRules;
pub use fight::{FightPolicy, FightRule, MatchOpponentMeld, UncheckedFight};
pub use meld::{classify_meld, is_valid_meld, MeldKind};
pub use scoring::{
    check_win, evaluate, evaluate_with_threshold, hand_points, player_points, GameResult, WinReason,
};
