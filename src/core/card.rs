//! Playing cards in Big Two order.
//!
//! Ranks climb `3 < 4 < ... < K < A < 2` and suits climb `♦ < ♣ < ♥ < ♠`.
//! The derived `Ord` on [`Card`] compares rank first, then suit, which is the
//! order the codec uses to sort a hand into its 13 slots.
//!
//! Cards cross the engine boundary as string symbols (`"10"`, `"♥"`), so this
//! module also owns parsing them back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of distinct cards in the deck.
pub const DECK_SIZE: usize = 52;

/// Card rank, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Three = 0,
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
    Ace,
    Two,
}

impl Rank {
    /// All ranks in climbing order.
    pub const ALL: [Rank; 13] = [
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
        Rank::Ace,
        Rank::Two,
    ];

    /// Position in climbing order (`Three` = 0, `Two` = 12).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Symbol used by the engine (`"3"`..`"10"`, `"J"`, `"Q"`, `"K"`, `"A"`, `"2"`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
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
            Rank::Ace => "A",
            Rank::Two => "2",
        }
    }

    /// Parse an engine rank symbol.
    pub fn from_symbol(symbol: &str) -> Result<Self, CardParseError> {
        Rank::ALL
            .iter()
            .copied()
            .find(|rank| rank.symbol() == symbol)
            .ok_or_else(|| CardParseError::Rank(symbol.to_string()))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Card suit, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Diamond = 0,
    Club,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamond, Suit::Club, Suit::Heart, Suit::Spade];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Glyph used by the engine.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Suit::Diamond => "♦",
            Suit::Club => "♣",
            Suit::Heart => "♥",
            Suit::Spade => "♠",
        }
    }

    /// Single-letter code (`D`, `C`, `H`, `S`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Diamond => 'D',
            Suit::Club => 'C',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
        }
    }

    /// Parse either the glyph or the letter code.
    pub fn from_symbol(symbol: &str) -> Result<Self, CardParseError> {
        Suit::ALL
            .iter()
            .copied()
            .find(|suit| {
                suit.symbol() == symbol
                    || (symbol.len() == 1 && symbol.starts_with(suit.letter()))
            })
            .ok_or_else(|| CardParseError::Suit(symbol.to_string()))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Failure to read a card from its string form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("unexpected rank value: {0:?}")]
    Rank(String),
    #[error("unexpected suit value: {0:?}")]
    Suit(String),
    #[error("card index {0} out of range")]
    Index(usize),
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Dense id in `0..52`, ordered the same way as `Ord`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.rank.index() * 4 + self.suit.index()
    }

    pub fn from_index(index: usize) -> Result<Self, CardParseError> {
        match (Rank::from_index(index / 4), Suit::from_index(index % 4)) {
            (Some(rank), Some(suit)) if index < DECK_SIZE => Ok(Self { rank, suit }),
            _ => Err(CardParseError::Index(index)),
        }
    }

    /// Build a card from the engine's rank and suit symbols.
    pub fn from_symbols(rank: &str, suit: &str) -> Result<Self, CardParseError> {
        Ok(Self {
            rank: Rank::from_symbol(rank)?,
            suit: Suit::from_symbol(suit)?,
        })
    }

    /// Every card, lowest first.
    pub fn deck() -> impl Iterator<Item = Card> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(rank, suit)))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Accepts `"10♥"` as well as `"10H"`; the suit is the last character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| CardParseError::Rank(s.to_string()))?;
        let (rank, suit) = s.split_at(split);
        Card::from_symbols(rank, suit)
    }
}
