use std::ops::Add;
use std::ops::AddAssign;

use crate::constants::*;

const CARD_COUNT_SHIFT: u8 = 32;
const SUITS_SHIFT: u8 = 48;
const FLUSH_CHECK_MASK64: u64 = 0x8888u64 << SUITS_SHIFT;
const FLUSH_CHECK_MASK32: u32 = 0x8888u32 << (SUITS_SHIFT - 32) as u32;

/// 64 bit representation of poker hand for use in evaluator
///
/// Bits 0-31: key to non flush lookup table
/// Bits 32-35: card counter
/// Bits 48-63: suit counter
/// Bits 64-128: Bit mask for all cards (suits in 16 bit groups)
#[derive(Debug, Copy, Clone)]
pub struct Hand {
    key: u64,
    mask: u64,
}

lazy_static! {
    /// Table for bit card representation to 64bit one
    pub static ref CARDS: [Hand; 52] = init_card_constants();
}

impl Hand {
    /// construct the empty hand
    ///
    /// every evaluated hand must start from here,
    /// it initializes the suit counters
    pub fn empty() -> Hand {
        Hand {
            key: 0x3333u64 << SUITS_SHIFT,
            mask: 0,
        }
    }

    /// construct a Hand from a list of card indexes
    pub fn from_cards(cards: &[u8]) -> Hand {
        cards
            .iter()
            .fold(Hand::empty(), |hand, &c| hand + CARDS[usize::from(c)])
    }

    /// Return first 64 bits
    pub const fn get_key(self) -> u64 {
        self.key
    }
    /// Return last 64 bits
    pub const fn get_mask(self) -> u64 {
        self.mask
    }
    /// get rank key of card for lookup table
    pub const fn get_rank_key(self) -> u32 {
        self.key as u32
    }
    /// Return counter bits
    pub const fn get_counters(self) -> u32 {
        (self.key >> 32) as u32
    }
    /// Get flush key of card for lookup table
    ///
    /// Returns 0 if there is no flush
    pub fn get_flush_key(self) -> usize {
        if self.has_flush() {
            // find which suit has flush
            let flush_check_bits = self.get_counters() & FLUSH_CHECK_MASK32;
            let shift = flush_check_bits.leading_zeros() << 2;
            // return mask for suit
            let key = (self.mask >> shift) as u16;
            usize::from(key)
        } else {
            0
        }
    }
    pub fn has_flush(self) -> bool {
        (self.get_key() & FLUSH_CHECK_MASK64) != 0
    }
    // Return number of cards in hand
    pub fn count(self) -> u32 {
        (self.get_counters() >> (CARD_COUNT_SHIFT - 32)) & 0xf
    }

    /// Get the number of cards for a suit
    pub fn suit_count(self, suit: u8) -> i32 {
        let shift = 4 * suit + (SUITS_SHIFT - 32);
        (((self.get_counters() >> shift) & 0xf) as i32) - 3
    }
}

impl Default for Hand {
    fn default() -> Self {
        Hand::empty()
    }
}

impl Add for Hand {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            key: self.key + other.key,
            mask: self.mask | other.mask,
        }
    }
}

impl AddAssign for Hand {
    fn add_assign(&mut self, rhs: Hand) {
        self.key += rhs.key;
        self.mask |= rhs.mask;
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        (self.get_mask() == other.get_mask()) && (self.get_key() == other.get_key())
    }
}

impl Eq for Hand {}

fn init_card_constants() -> [Hand; 52] {
    let mut hands = [Hand { key: 0, mask: 0 }; 52];

    for c in 0..CARD_COUNT {
        let rank = c / 4;
        let suit = c % 4;
        // suit counter
        let x: u64 = 1u64 << (4 * suit + SUITS_SHIFT);
        // card counter
        let y: u64 = 1u64 << CARD_COUNT_SHIFT;
        // unique rank key
        let z: u64 = RANKS[usize::from(rank)];
        // suits are in 16 bit groups
        let mask: u64 = 1u64 << ((3 - suit) * 16 + rank);

        hands[usize::from(c)] = Hand {
            key: x + y + z,
            mask,
        };
    }

    hands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_constants() {
        // test a single card
        let rank: usize = 0; // 2
        let suit: usize = 0; // spade
        let h = CARDS[4 * rank + suit];
        assert_eq!(h.get_mask(), 1u64 << ((3 - suit) * 16 + rank));
        assert_eq!(h.count(), 1); // one card
        assert_eq!(h.has_flush(), false);
    }

    #[test]
    fn test_from_cards() {
        // 2 of spades, 2 of hearts
        let h = Hand::from_cards(&[0, 1]);
        assert_eq!(h.count(), 2);
        assert_eq!(h.has_flush(), false);
        assert_eq!(h, Hand::empty() + CARDS[0] + CARDS[1]);
    }

    #[test]
    fn test_rank_key() {
        let h = Hand::from_cards(&[0, 1]);
        assert_eq!(u64::from(h.get_rank_key()), RANKS[0] + RANKS[0]);
    }

    #[test]
    fn test_flush_key() {
        let h_flush = Hand::from_cards(&[0, 4, 8, 12, 16]);
        assert_eq!(h_flush.get_flush_key(), 0b11111);

        let h_noflush = Hand::from_cards(&[0, 4, 8, 12]);
        assert_eq!(h_noflush.get_flush_key(), 0);
    }

    #[test]
    fn test_has_flush() {
        let h_flush = Hand::from_cards(&[0, 8, 12, 16, 20]);
        assert_eq!(h_flush.has_flush(), true);
        let h_noflush = Hand::from_cards(&[0, 8, 12, 16, 21]);
        assert_eq!(h_noflush.has_flush(), false);
    }

    #[test]
    fn test_suit_count() {
        let h_4_spades = Hand::from_cards(&[0, 8, 12, 16, 21]);
        assert_eq!(h_4_spades.suit_count(0), 4);
        let h_3_hearts = Hand::from_cards(&[1, 9, 13]);
        assert_eq!(h_3_hearts.suit_count(1), 3);
    }
}
