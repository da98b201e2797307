//! Session boundary: one table, its state, and the messages that drive it.
//!
//! A `Session` is the single exclusive owner of a `GameState`. Hosts route
//! each inbound `ActionCommand` to `Session::handle` one at a time and send
//! the returned `ActionOutcome` back. When the game is decided the session
//! moves to `GameOver` and reports one `SessionResult` per seat to its sink.
//!
//! ```
//! use tongits_engine::core::{Action, GameRng, PlayerId, PlayerMap};
//! use tongits_engine::rules::TongitsRules;
//! use tongits_engine::session::{ActionCommand, ResultLog, Session};
//!
//! let mut rng = GameRng::new(1);
//! let seats = PlayerMap::new(|p| format!("seat-{}", p.index()));
//! let mut session =
//!     Session::start("t-1", TongitsRules::default(), seats, false, &mut rng, ResultLog::new())
//!         .unwrap();
//!
//! let outcome = session.handle(&ActionCommand::new("t-1", PlayerId::FIRST, Action::draw_from_deck()));
//! assert!(outcome.is_accepted());
//! assert_eq!(outcome.snapshot().unwrap().hand.len(), 13);
//! ```

pub mod protocol;
pub mod sink;
pub mod snapshot;

pub use protocol::{ActionCommand, ActionOutcome};
pub use sink::{
    PlayerStats, ResultLog, ResultSink, SeatOutcome, SessionResult, DEFAULT_RECENT_LIMIT,
};
pub use snapshot::GameStateSnapshot;

use chrono::Utc;
use log::{debug, info, trace};

use crate::core::{ActionError, CheckpointError, ErrorKind, GameRng, GameState, PlayerId, PlayerMap};
use crate::rules::{GameResult, TongitsRules};

/// One table.
#[derive(Debug)]
pub struct Session<S: ResultSink = ResultLog> {
    id: String,
    rules: TongitsRules,
    seats: PlayerMap<String>,
    state: GameState,
    sink: S,
}

impl<S: ResultSink> Session<S> {
    /// Shuffle, deal, and open a new table.
    pub fn start(
        id: impl Into<String>,
        rules: TongitsRules,
        seats: PlayerMap<String>,
        player_advantage: bool,
        rng: &mut GameRng,
        sink: S,
    ) -> Result<Self, ActionError> {
        let id = id.into();
        debug!("session {id} starting with seed {}", rng.seed());
        let state = rules.initialize_game(rng);
        let state = rules.deal_initial_cards(&state, player_advantage, rng)?;
        Ok(Self::resume(id, rules, seats, state, sink))
    }

    /// Reopen a table from a saved state.
    ///
    /// A state that is already decided is finished immediately and its
    /// results reported; one already in `GameOver` is left as is.
    pub fn resume(
        id: impl Into<String>,
        rules: TongitsRules,
        seats: PlayerMap<String>,
        state: GameState,
        sink: S,
    ) -> Self {
        let mut session = Self {
            id: id.into(),
            rules,
            seats,
            state,
            sink,
        };
        session.settle();
        session
    }

    /// Reopen a table from [`Session::checkpoint`] bytes.
    pub fn restore(
        id: impl Into<String>,
        rules: TongitsRules,
        seats: PlayerMap<String>,
        bytes: &[u8],
        sink: S,
    ) -> Result<Self, CheckpointError> {
        let state = GameState::from_bytes(bytes)?;
        Ok(Self::resume(id, rules, seats, state, sink))
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The authoritative state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The table rules.
    #[must_use]
    pub fn rules(&self) -> &TongitsRules {
        &self.rules
    }

    /// The result sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The state as `viewer` may see it.
    #[must_use]
    pub fn snapshot(&self, viewer: PlayerId) -> GameStateSnapshot {
        GameStateSnapshot::for_viewer(&self.state, viewer)
    }

    /// Serialize the current state.
    pub fn checkpoint(&self) -> Result<Vec<u8>, CheckpointError> {
        self.state.to_bytes()
    }

    /// Apply one command.
    pub fn handle(&mut self, command: &ActionCommand) -> ActionOutcome {
        if command.session_id != self.id {
            trace!("session {} ignored command for {}", self.id, command.session_id);
            return ActionOutcome::Rejected {
                reason: ErrorKind::UnknownSession,
            };
        }

        match self.rules.apply(&self.state, command.player, &command.action) {
            Ok(next) => {
                self.state = next;
                self.settle();
                ActionOutcome::Accepted {
                    new_state: Box::new(self.snapshot(command.player)),
                }
            }
            Err(err) => ActionOutcome::Rejected { reason: err.kind() },
        }
    }

    /// Submit the fallback action for the player whose turn it is.
    ///
    /// For hosts whose inactivity timer fired. `None` if nobody can act.
    pub fn act_for_idle_player(&mut self) -> Option<ActionOutcome> {
        let player = self.state.current_player;
        let action = self.rules.fallback_action(&self.state, player)?;
        Some(self.handle(&ActionCommand::new(self.id.clone(), player, action)))
    }

    /// Finish the game if it is decided, reporting results once.
    fn settle(&mut self) {
        let Some(over) = self.rules.finish(&self.state) else {
            return;
        };
        self.state = over;

        let Some(result) = self.state.result else {
            return;
        };
        info!("session {} finished: {result}", self.id);

        let timestamp = Utc::now();
        for (seat, name) in self.seats.iter() {
            let outcome = match result {
                GameResult::Winner(winner, _) if winner == seat => SeatOutcome::Win,
                GameResult::Winner(..) => SeatOutcome::Loss,
                GameResult::Draw => SeatOutcome::Draw,
            };
            self.sink.record(SessionResult {
                player: name.clone(),
                result: outcome,
                timestamp,
            });
        }
    }
}
