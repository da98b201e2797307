//! Playing cards: rank, suit, and the tagged `(rank, suit)` card value.
//!
//! Cards are plain `Copy` values with a total order by rank, then suit.
//! On the wire a card is its short token (`"AH"`, `"10C"`, `"QS"`), which
//! [`Card::from_str`] parses without the `"10"` vs `"1"`+`"0"` ambiguity of
//! concatenated strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card rank, ace low.
///
/// The discriminant is the point value used for scoring (A=1 .. K=13).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in ascending order (ace low).
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Low value: A=1, 2..10 face value, J=11, Q=12, K=13.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Value with the ace counted high (14). Only runs use this.
    #[must_use]
    pub const fn high_value(self) -> u8 {
        match self {
            Rank::Ace => 14,
            other => other as u8,
        }
    }

    /// Rank for a low value in `1..=13`.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// Token used in card strings.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Single-letter token used in card strings.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        };
        f.write_str(symbol)
    }
}

/// A playing card.
///
/// Ordering is by rank first, then suit, so sorting a hand groups ranks.
///
/// ```
/// use tongits_engine::cards::{Card, Rank, Suit};
///
/// let ten: Card = "10H".parse().unwrap();
/// assert_eq!(ten, Card::new(Rank::Ten, Suit::Hearts));
/// assert_eq!(ten.to_string(), "10H");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Point value of this card (ace low).
    #[must_use]
    pub const fn points(self) -> u8 {
        self.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.letter())
    }
}

/// Error parsing a card token.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseCardError {
    #[error("empty card token")]
    Empty,
    #[error("unknown rank {0:?}")]
    UnknownRank(String),
    #[error("unknown suit {0:?}")]
    UnknownSuit(char),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_letter = s.chars().last().ok_or(ParseCardError::Empty)?;
        let suit = Suit::from_letter(suit_letter).ok_or(ParseCardError::UnknownSuit(suit_letter))?;
        let rank_token = &s[..s.len() - suit_letter.len_utf8()];
        let rank = Rank::ALL
            .into_iter()
            .find(|r| r.symbol().eq_ignore_ascii_case(rank_token))
            .ok_or_else(|| ParseCardError::UnknownRank(rank_token.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse a whitespace-separated list of card tokens.
///
/// Convenience for tests and tooling: `"QS KS AS"`.
pub fn parse_cards(tokens: &str) -> Result<Vec<Card>, ParseCardError> {
    tokens.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_values() {
        assert_eq!(Rank::Ace.value(), 1);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 11);
        assert_eq!(Rank::King.value(), 13);
        assert_eq!(Rank::Ace.high_value(), 14);
        assert_eq!(Rank::King.high_value(), 13);
    }

    #[test]
    fn test_rank_from_value() {
        assert_eq!(Rank::from_value(1), Some(Rank::Ace));
        assert_eq!(Rank::from_value(13), Some(Rank::King));
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(14), None);
    }

    #[test]
    fn test_parse_ten_is_unambiguous() {
        let card: Card = "10D".parse().unwrap();
        assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));

        assert_eq!("1D".parse::<Card>(), Err(ParseCardError::UnknownRank("1".into())));
        assert_eq!("0D".parse::<Card>(), Err(ParseCardError::UnknownRank("0".into())));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Card>(), Err(ParseCardError::Empty));
        assert_eq!("AX".parse::<Card>(), Err(ParseCardError::UnknownSuit('X')));
        assert!("H".parse::<Card>().is_err());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("qs".parse::<Card>().unwrap(), Card::new(Rank::Queen, Suit::Spades));
    }

    #[test]
    fn test_ordering_rank_then_suit() {
        let mut cards = parse_cards("KC 2S 2C AH").unwrap();
        cards.sort();
        assert_eq!(cards, parse_cards("AH 2C 2S KC").unwrap());
    }

    #[test]
    fn test_display_every_card_parses_back() {
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                let card = Card::new(rank, suit);
                assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
            }
        }
    }

    #[test]
    fn test_serde_uses_tokens() {
        let cards = parse_cards("10H QS").unwrap();
        let json = serde_json::to_string(&cards).unwrap();
        assert_eq!(json, r#"["10H","QS"]"#);

        let back: Vec<Card> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cards);

        assert!(serde_json::from_str::<Card>(r#""ZZ""#).is_err());
    }
}
