//! # tongits-engine
//!
//! A deterministic rules engine for two-player Tongits (Filipino rummy).
//!
//! ## Design Principles
//!
//! 1. **Caller-owned state**: the engine never holds a session. Every
//!    operation takes a `&GameState` and returns a new one or a typed
//!    rejection.
//!
//! 2. **Atomic transitions**: actions validate first, then mutate an O(1)
//!    clone built on `im-rs` persistent structures. A rejected action leaves
//!    the input untouched.
//!
//! 3. **Injected randomness**: shuffling and dealing draw from a seeded
//!    `GameRng` supplied by the caller, and any deal bias is a named policy
//!    declared in `TongitsConfig`.
//!
//! ## Modules
//!
//! - `cards`: ranks, suits, cards, the 52-card deck
//! - `core`: players, state, actions, errors, RNG, configuration
//! - `deal`: shuffle strategies and deal bias policies
//! - `rules`: meld validation, fight policies, scoring, and the turn action engine
//! - `session`: wire messages, viewer snapshots, result events

pub mod cards;
pub mod core;
pub mod deal;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::cards::{generate_deck, rank_value, Card, Deck, Rank, Suit};

pub use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, ErrorKind, GameRng, GameState, Phase, Player,
    PlayerId, PlayerMap, TongitsConfig,
};

pub use crate::deal::{DealBias, ShuffleKind};

pub use crate::rules::{
    check_win, evaluate, hand_points, is_valid_meld, player_points, FightRule, GameResult,
    TongitsRules, WinReason,
};

pub use crate::session::{
    ActionCommand, ActionOutcome, GameStateSnapshot, PlayerStats, ResultLog, ResultSink, Session,
};
