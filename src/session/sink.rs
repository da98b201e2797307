//! Terminal result events.
//!
//! When a session ends, one `SessionResult` per seat goes to a `ResultSink`.
//! Durable storage lives outside the engine; `ResultLog` is the in-memory
//! sink, keeping recent history plus per-player tallies for stats and a
//! leaderboard.

use std::cmp::Reverse;
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Default number of results returned for a "recent games" listing.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// How the game ended for one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeatOutcome {
    Win,
    Loss,
    /// Exhausted deck with equal totals.
    Draw,
}

/// One seat's result, emitted once when the session ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Seat name.
    pub player: String,
    pub result: SeatOutcome,
    pub timestamp: DateTime<Utc>,
}

/// Win / loss / draw tally for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl PlayerStats {
    /// Games recorded.
    #[must_use]
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Wins as a rounded percentage of decided games; 0 before any.
    #[must_use]
    pub fn win_rate(&self) -> u32 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            return 0;
        }
        (self.wins * 100 + decided / 2) / decided
    }

    fn tally(&mut self, outcome: SeatOutcome) {
        match outcome {
            SeatOutcome::Win => self.wins += 1,
            SeatOutcome::Loss => self.losses += 1,
            SeatOutcome::Draw => self.draws += 1,
        }
    }
}

/// Receives terminal result events.
pub trait ResultSink {
    /// Record one result.
    fn record(&mut self, result: SessionResult);
}

/// In-memory sink: results newest first, plus running tallies.
#[derive(Clone, Debug, Default)]
pub struct ResultLog {
    results: VecDeque<SessionResult>,
    stats: FxHashMap<String, PlayerStats>,
}

impl ResultLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Up to `limit` results, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &SessionResult> {
        self.results.iter().take(limit)
    }

    /// Tally for `player`; all zero if they have no results.
    #[must_use]
    pub fn stats(&self, player: &str) -> PlayerStats {
        self.stats.get(player).copied().unwrap_or_default()
    }

    /// Up to `limit` players by most wins, then fewest losses, then name.
    #[must_use]
    pub fn leaderboard(&self, limit: usize) -> Vec<(&str, PlayerStats)> {
        let mut ranked: Vec<_> = self
            .stats
            .iter()
            .map(|(name, stats)| (name.as_str(), *stats))
            .collect();
        ranked.sort_by_key(|&(name, stats)| (Reverse(stats.wins), stats.losses, name));
        ranked.truncate(limit);
        ranked
    }

    /// Total results recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl ResultSink for ResultLog {
    fn record(&mut self, result: SessionResult) {
        self.stats
            .entry(result.player.clone())
            .or_default()
            .tally(result.result);
        self.results.push_front(result);
    }
}

impl ResultSink for Vec<SessionResult> {
    fn record(&mut self, result: SessionResult) {
        self.push(result);
    }
}
