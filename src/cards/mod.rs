//! Card model: ranks, suits, cards, and the 52-card deck.
//!
//! ## Key Types
//!
//! - `Rank`: A..K, ace low by value (`Rank::high_value` for ace-high runs)
//! - `Suit`: Clubs, Diamonds, Hearts, Spades
//! - `Card`: tagged `(rank, suit)` value with total ordering
//! - `Deck`: remaining undealt cards, top = last

pub mod card;
pub mod deck;

pub use card::{parse_cards, Card, ParseCardError, Rank, Suit};
pub use deck::{generate_deck, rank_value, Deck, DECK_SIZE};
