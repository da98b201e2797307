//! Core engine types: players, state, actions, errors, RNG, configuration.
//!
//! Everything here is plain data. The rules that move cards between these
//! structures live in `rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;
pub mod invariants;

pub use player::{InvalidSeat, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{ConfigError, TongitsConfig, DEFAULT_HAND_SIZE, DEFAULT_LOW_POINT_THRESHOLD, MIN_MELD_SIZE};
pub use action::{Action, ActionKind, ActionRecord, HandIndices};
pub use state::{CheckpointError, GameState, Phase, Player};
pub use error::{ActionError, ErrorKind};
pub use invariants::{check_invariants, InvariantViolation};
