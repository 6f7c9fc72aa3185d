//! # Hold'em Equity
//! Monte carlo equity for texas holdem starting hands
//!
//! Currently supports
//!  - hand vs hand win / lose / split frequencies over random boards
//!  - fast seven card hand evaluation
//!
//! ## Equity Calculator
//!
//! ```
//! use holdem_equity::equity_calculator::EquityCalculator;
//! use holdem_equity::hole_cards::HoleCards;
//! let hands = HoleCards::from_strings(&["AhAd", "7c2s"]).unwrap();
//! let calculator = EquityCalculator::builder()
//!     .sample_size(5000)
//!     .build()
//!     .unwrap();
//! let equities = calculator.calculate(&hands).unwrap();
//! for (hand, equity) in equities.iter() {
//!     println!("{} {}", hand, equity);
//! }
//! ```
//!
//! ## Hand Evaluator
//!
//! ```
//! use holdem_equity::hand_evaluator::{Hand, CARDS, evaluate};
//! // cards are indexed 0->51 where index is 4 * rank + suit
//! let hand = Hand::empty() + CARDS[0] + CARDS[1];
//! let score = evaluate(&hand);
//! ```

#[macro_use]
extern crate lazy_static;

pub mod constants;
pub mod deck;
pub mod hand_evaluator;
pub mod hole_cards;

pub mod equity_calculator;
