mod evaluator;
mod hand;

pub use evaluator::evaluate;
pub use hand::{Hand, CARDS};

use serde::{Deserialize, Serialize};

use crate::constants::HAND_CATEGORY_SHIFT;
use crate::deck::Board;
use crate::hole_cards::HoleCards;

/// Ranks a player's hole cards against a complete board
///
/// Lower ranks are stronger hands. Two hands with the same rank on the
/// same board tie at showdown. Implementations must be pure: the same
/// hole cards and board always give the same rank.
pub trait Evaluator: Send + Sync {
    fn rank(&self, hole_cards: &HoleCards, board: &Board) -> u32;
}

/// Default evaluator, best five of the seven available cards
/// scored with the static lookup tables
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupEvaluator;

impl Evaluator for LookupEvaluator {
    fn rank(&self, hole_cards: &HoleCards, board: &Board) -> u32 {
        let hand = board.to_hand() + hole_cards.to_hand();
        u32::from(u16::MAX - evaluate(&hand))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    /// Category of a score returned by `evaluate`
    ///
    /// Scores of incomplete hands below the table fall back to `HighCard`.
    pub fn from_score(score: u16) -> Self {
        match score >> HAND_CATEGORY_SHIFT {
            2 => HandCategory::Pair,
            3 => HandCategory::TwoPair,
            4 => HandCategory::ThreeOfAKind,
            5 => HandCategory::Straight,
            6 => HandCategory::Flush,
            7 => HandCategory::FullHouse,
            8 => HandCategory::FourOfAKind,
            9 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}
