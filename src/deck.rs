use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::{BOARD_CARDS, CARD_COUNT};
use crate::equity_calculator::EquityError;
use crate::hand_evaluator::Hand;
use crate::hole_cards::{card_to_string, parse_cards, HoleCards, ParseError};

/// A single 52 card deck, dealt from the back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<u8>,
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

impl Deck {
    /// Full deck in index order
    pub fn new() -> Self {
        Deck {
            cards: (0..CARD_COUNT).collect(),
        }
    }

    /// Full deck permuted by the generator
    ///
    /// The permutation depends only on the generator state,
    /// which advances as the deck is shuffled.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Deck::new();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: u8) -> bool {
        self.cards.contains(&card)
    }

    /// Remove a player's hole cards from the deck
    ///
    /// Fails without touching the deck if either card is missing.
    pub fn pop(&mut self, hand: HoleCards) -> Result<HoleCards, EquityError> {
        let (c1, c2) = hand.cards();
        for &c in &[c1, c2] {
            if !self.contains(c) {
                return Err(EquityError::DuplicateCard(card_to_string(c)));
            }
        }
        self.cards.retain(|&c| c != c1 && c != c2);
        Ok(hand)
    }

    /// Deal the next card
    pub fn draw(&mut self) -> Option<u8> {
        self.cards.pop()
    }
}

/// The five community cards at showdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([u8; BOARD_CARDS]);

impl Board {
    /// Create a board from five distinct card indexes
    pub fn new(cards: [u8; BOARD_CARDS]) -> Result<Self, ParseError> {
        let mut used = 0u64;
        for &c in &cards {
            if c >= CARD_COUNT {
                return Err(ParseError::OutOfRange(c));
            }
            if used & (1u64 << c) != 0 {
                return Err(ParseError::RepeatedCard(card_to_string(c)));
            }
            used |= 1u64 << c;
        }
        Ok(Board(cards))
    }

    /// Deal a complete board from what is left of the deck
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_equity::deck::{Board, Deck};
    /// let mut deck = Deck::new();
    /// let board = Board::complete(&mut deck).unwrap();
    /// assert_eq!(deck.len(), 47);
    /// assert_eq!(board.to_string(), "AcAdAhAsKc");
    /// ```
    pub fn complete(deck: &mut Deck) -> Result<Board, EquityError> {
        if deck.len() < BOARD_CARDS {
            return Err(EquityError::DeckExhausted);
        }
        let mut cards = [0u8; BOARD_CARDS];
        for c in cards.iter_mut() {
            *c = deck.draw().ok_or(EquityError::DeckExhausted)?;
        }
        Ok(Board(cards))
    }

    pub fn cards(&self) -> &[u8; BOARD_CARDS] {
        &self.0
    }

    /// 64 bit mask of the board cards
    pub fn mask(&self) -> u64 {
        self.0.iter().fold(0u64, |mask, &c| mask | (1u64 << c))
    }

    /// Evaluator representation of the board
    pub fn to_hand(&self) -> Hand {
        Hand::from_cards(&self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            write!(f, "{}", card_to_string(c))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        if cards.len() != BOARD_CARDS {
            return Err(ParseError::InvalidLength {
                expected: 2 * BOARD_CARDS,
                found: s.chars().count(),
            });
        }
        let mut board = [0u8; BOARD_CARDS];
        board.copy_from_slice(&cards);
        Board::new(board)
    }
}
