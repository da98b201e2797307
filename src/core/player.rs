//! Seat identification and per-seat storage for a two-player table.
//!
//! ## PlayerId
//!
//! Seat 0 or seat 1. Seat 0 deals first and acts first.
//!
//! ## PlayerMap
//!
//! One value per seat, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Number of seats at a Tongits table handled by this engine.
pub const PLAYER_COUNT: usize = 2;

/// Seat identifier, 0 or 1.
///
/// Serializes as a bare integer so `currentPlayer` reads `0` / `1` on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// Seat 0.
    pub const FIRST: PlayerId = PlayerId(0);
    /// Seat 1.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player ID.
    ///
    /// Panics if `id` is not a valid seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < PLAYER_COUNT, "Seat must be 0 or 1");
        Self(id)
    }

    /// Raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn other(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats in evaluation order (0, then 1).
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A seat number outside `0..2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid seat {0}, expected 0 or 1")]
pub struct InvalidSeat(pub u8);

impl TryFrom<u8> for PlayerId {
    type Error = InvalidSeat;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if usize::from(value) < PLAYER_COUNT {
            Ok(Self(value))
        } else {
            Err(InvalidSeat(value))
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

/// Per-seat data storage.
///
/// ```
/// use tongits_engine::core::{PlayerId, PlayerMap};
///
/// let mut points: PlayerMap<u32> = PlayerMap::with_value(0);
/// points[PlayerId::SECOND] = 15;
/// assert_eq!(points[PlayerId::FIRST], 0);
/// assert_eq!(points[PlayerId::SECOND], 15);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Build both entries from a factory that receives the seat.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Mutable references to both seats at once.
    pub fn pair_mut(&mut self) -> (&mut T, &mut T) {
        let [first, second] = &mut self.data;
        (first, second)
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }

    /// Apply `f` to each entry.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PlayerMap<U> {
        PlayerMap::new(|player| f(self.get(player)))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::FIRST.index(), 0);
        assert_eq!(PlayerId::SECOND.index(), 1);
        assert_eq!(PlayerId::FIRST.other(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.other(), PlayerId::FIRST);
        assert_eq!(format!("{}", PlayerId::new(1)), "Player 1");
    }

    #[test]
    #[should_panic(expected = "Seat must be 0 or 1")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_player_id_serde() {
        assert_eq!(serde_json::to_string(&PlayerId::SECOND).unwrap(), "1");
        assert_eq!(serde_json::from_str::<PlayerId>("0").unwrap(), PlayerId::FIRST);
        assert!(serde_json::from_str::<PlayerId>("2").is_err());
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<usize> = PlayerMap::new(|p| p.index() * 10);

        assert_eq!(map[PlayerId::FIRST], 0);
        assert_eq!(map[PlayerId::SECOND], 10);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<Vec<i32>> = PlayerMap::default();
        map[PlayerId::FIRST].push(1);

        let (first, second) = map.pair_mut();
        second.push(first[0] + 1);

        assert_eq!(map[PlayerId::FIRST], vec![1]);
        assert_eq!(map[PlayerId::SECOND], vec![2]);
    }

    #[test]
    fn test_player_map_iter_and_map() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::FIRST, &1), (PlayerId::SECOND, &2)]);

        let doubled = map.map(|v| v * 2);
        assert_eq!(doubled[PlayerId::SECOND], 4);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[1,2]");
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
