//! The standard 52-card deck.
//!
//! `Deck` is backed by an `im::Vector` so that cloning a game state for an
//! atomic transition is O(1). The top of the deck is the back of the vector.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// An ordered pile of undealt cards (top = last).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// A full deck in canonical order: suit major (C, D, H, S), rank minor (A..K).
    #[must_use]
    pub fn standard() -> Self {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
            .collect()
    }

    /// Create an empty deck.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if no cards remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Look at the top card without removing it.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Put a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Iterate from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Copy the cards out, bottom first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        cards.into_iter().collect()
    }
}

/// Generate all 52 cards, each exactly once, in canonical order.
#[must_use]
pub fn generate_deck() -> Deck {
    Deck::standard()
}

/// Scoring value of a rank: A=1 .. K=13.
#[must_use]
pub const fn rank_value(rank: Rank) -> u8 {
    rank.value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_generate_deck_is_complete() {
        let deck = generate_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let unique: BTreeSet<_> = deck.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);

        for rank in Rank::ALL {
            for suit in Suit::ALL {
                assert!(unique.contains(&Card::new(rank, suit)));
            }
        }
    }

    #[test]
    fn test_canonical_order() {
        let deck = generate_deck().to_vec();
        assert_eq!(deck[0], Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(deck[12], Card::new(Rank::King, Suit::Clubs));
        assert_eq!(deck[13], Card::new(Rank::Ace, Suit::Diamonds));
        assert_eq!(deck[51], Card::new(Rank::King, Suit::Spades));
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = generate_deck();
        assert_eq!(deck.top(), Some(&Card::new(Rank::King, Suit::Spades)));
        assert_eq!(deck.draw(), Some(Card::new(Rank::King, Suit::Spades)));
        assert_eq!(deck.len(), 51);

        let mut empty = Deck::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.draw(), None);
    }

    #[test]
    fn test_rank_value() {
        assert_eq!(rank_value(Rank::Ace), 1);
        assert_eq!(rank_value(Rank::Seven), 7);
        assert_eq!(rank_value(Rank::Queen), 12);
    }
}
