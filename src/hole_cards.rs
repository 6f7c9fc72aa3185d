/*
 * Hole cards and card text helpers
 *
 * Cards are stored as u8 indexes
 * the value of a card is 4 * rank + suit
 */

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::hand_evaluator::{Hand, CARDS};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} characters, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("invalid rank '{0}'")]
    InvalidRank(char),
    #[error("invalid suit '{0}'")]
    InvalidSuit(char),
    #[error("card index {0} is out of range")]
    OutOfRange(u8),
    #[error("card {0} appears more than once")]
    RepeatedCard(String),
}

/// A single player's two private cards
///
/// Always stored with the stronger card first so that `AhKd` and `KdAh`
/// are the same hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HoleCards(u8, u8);

impl HoleCards {
    /// Create hole cards from two card indexes
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_equity::hole_cards::HoleCards;
    /// // ace of spades, ace of hearts
    /// let aces = HoleCards::new(48, 49).unwrap();
    /// assert_eq!(aces.to_string(), "AhAs");
    /// ```
    pub fn new(c1: u8, c2: u8) -> Result<Self, ParseError> {
        if c1 >= CARD_COUNT {
            return Err(ParseError::OutOfRange(c1));
        }
        if c2 >= CARD_COUNT {
            return Err(ParseError::OutOfRange(c2));
        }
        if c1 == c2 {
            return Err(ParseError::RepeatedCard(card_to_string(c1)));
        }
        // card >> 2 rips the suit bits off, so we can compare rank
        // card & 3, only views the last 2 bits so we can compare suit
        if c1 >> 2 < c2 >> 2 || (c1 >> 2 == c2 >> 2 && (c1 & 3) < (c2 & 3)) {
            Ok(HoleCards(c2, c1))
        } else {
            Ok(HoleCards(c1, c2))
        }
    }

    /// Parse a list of hands such as `["AhAd", "7c2s"]`
    pub fn from_strings<S: AsRef<str>>(arr: &[S]) -> Result<Vec<Self>, ParseError> {
        arr.iter().map(|s| s.as_ref().parse()).collect()
    }

    /// Both card indexes, stronger card first
    pub const fn cards(self) -> (u8, u8) {
        (self.0, self.1)
    }

    /// 64 bit mask of both cards
    pub const fn mask(self) -> u64 {
        (1u64 << self.0) | (1u64 << self.1)
    }

    /// Canonical identity of the two cards
    ///
    /// Maps every distinct pair of cards onto `1..=1326`.
    pub fn id(self) -> u64 {
        let (hi, lo) = (u64::from(self.0), u64::from(self.1));
        ((hi * (hi - 1)) >> 1) + lo + 1
    }

    /// Evaluator representation of the hole cards
    pub fn to_hand(self) -> Hand {
        CARDS[usize::from(self.0)] + CARDS[usize::from(self.1)]
    }
}

impl fmt::Display for HoleCards {
    /// Writes hole cards to string
    ///
    /// # Example
    /// ```
    /// // prints '2h2s'
    /// use holdem_equity::hole_cards::HoleCards;
    /// let hand = HoleCards::new(0, 1).unwrap();
    /// println!("{}", hand);
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", card_to_string(self.0), card_to_string(self.1))
    }
}

impl FromStr for HoleCards {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        if cards.len() != HOLE_CARDS {
            return Err(ParseError::InvalidLength {
                expected: 2 * HOLE_CARDS,
                found: s.chars().count(),
            });
        }
        HoleCards::new(cards[0], cards[1])
    }
}

impl TryFrom<String> for HoleCards {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HoleCards> for String {
    fn from(hand: HoleCards) -> Self {
        hand.to_string()
    }
}

impl Ord for HoleCards {
    fn cmp(&self, other: &Self) -> Ordering {
        if (self.0 >> 2) != (other.0 >> 2) {
            // compare first ranks
            return (self.0 >> 2).cmp(&(other.0 >> 2));
        }
        if (self.1 >> 2) != (other.1 >> 2) {
            // compare second ranks
            return (self.1 >> 2).cmp(&(other.1 >> 2));
        }
        if (self.0 & 3) != (other.0 & 3) {
            // compare first suit
            return (self.0 & 3).cmp(&(other.0 & 3));
        }
        // compare second suit
        (self.1 & 3).cmp(&(other.1 & 3))
    }
}

impl PartialOrd for HoleCards {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Convert lowercase rank char to u8
///
/// # Example
///
/// ```
/// use holdem_equity::hole_cards::char_to_rank;
/// assert_eq!(char_to_rank('a'), 12);
/// ```
pub fn char_to_rank(c: char) -> u8 {
    match c {
        'a' => 12,
        'k' => 11,
        'q' => 10,
        'j' => 9,
        't' => 8,
        '9' => 7,
        '8' => 6,
        '7' => 5,
        '6' => 4,
        '5' => 3,
        '4' => 2,
        '3' => 1,
        '2' => 0,
        _ => u8::MAX,
    }
}

/// Convert lowercase suit char to u8
///
/// # Example
///
/// ```
/// use holdem_equity::hole_cards::char_to_suit;
/// assert_eq!(char_to_suit('s'), 0);
/// ```
pub fn char_to_suit(c: char) -> u8 {
    match c {
        's' => 0,
        'h' => 1,
        'd' => 2,
        'c' => 3,
        _ => u8::MAX,
    }
}

/// Write a card index as rank and suit, e.g. `Ac`
pub fn card_to_string(card: u8) -> String {
    let mut s = String::with_capacity(2);
    s.push(RANK_TO_CHAR[usize::from(card >> 2)]);
    s.push(SUIT_TO_CHAR[usize::from(card & 3)]);
    s
}

/// Converts a string of cards into card indexes
///
/// Fails on odd length, unknown characters, or a card listed twice.
///
/// # Example
///
/// ```
/// use holdem_equity::hole_cards::parse_cards;
/// let cards = parse_cards("As2hQd").unwrap();
/// assert_eq!(cards, vec![48, 1, 42]);
/// ```
pub fn parse_cards(text: &str) -> Result<Vec<u8>, ParseError> {
    let char_vec: Vec<char> = text.trim().to_lowercase().chars().collect();
    let len = char_vec.len();
    if len % 2 != 0 {
        return Err(ParseError::InvalidLength {
            expected: len + 1,
            found: len,
        });
    }
    let mut used = 0u64;
    let mut cards = Vec::with_capacity(len / 2);
    for pair in char_vec.chunks(2) {
        let rank = char_to_rank(pair[0]);
        if rank == u8::MAX {
            return Err(ParseError::InvalidRank(pair[0]));
        }
        let suit = char_to_suit(pair[1]);
        if suit == u8::MAX {
            return Err(ParseError::InvalidSuit(pair[1]));
        }
        let card = 4 * rank + suit;
        if used & (1u64 << card) != 0 {
            return Err(ParseError::RepeatedCard(card_to_string(card)));
        }
        used |= 1u64 << card;
        cards.push(card);
    }
    Ok(cards)
}
