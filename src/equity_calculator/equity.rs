use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::EquityError;
use crate::constants::MAX_SHOWDOWN_HANDS;
use crate::hole_cards::HoleCards;

/// A hand's showdown frequencies over a simulation
///
/// `win` is how often the hand won alone, `lose` how often it lost, and
/// `split` how often it was one of several hands sharing the best rank.
/// A split is credited in full to every tied hand, so `split` is not
/// the hand's share of the pot. `win + lose + split` is 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Equity {
    win: f64,
    lose: f64,
    split: f64,
}

impl Equity {
    pub fn win(&self) -> f64 {
        self.win
    }

    pub fn lose(&self) -> f64 {
        self.lose
    }

    pub fn split(&self) -> f64 {
        self.split
    }
}

impl fmt::Display for Equity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[win={} lose={} split={}]",
            self.win, self.lose, self.split
        )
    }
}

/// Outcome counters for a batch of trials
///
/// Indexed by the position of the hand in the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquityAccumulator {
    wins: Vec<u64>,
    losses: Vec<u64>,
    splits: Vec<u64>,
    trials: u64,
}

impl EquityAccumulator {
    /// # Panics
    ///
    /// If `n_hands` is more than the 64 hands a winner mask can hold
    pub fn init(n_hands: usize) -> EquityAccumulator {
        assert!(
            n_hands <= MAX_SHOWDOWN_HANDS,
            "at most {} hands fit a winner mask, got {}",
            MAX_SHOWDOWN_HANDS,
            n_hands
        );
        EquityAccumulator {
            wins: vec![0u64; n_hands],
            losses: vec![0u64; n_hands],
            splits: vec![0u64; n_hands],
            trials: 0,
        }
    }

    /// Apply one trial given the bit mask of its winning hands
    ///
    /// Bit `i` stands for hand `i`. Hands outside the mask lose. A single
    /// winner wins, otherwise every winner is credited a split.
    pub fn record(&mut self, winner_mask: u64) {
        let split = winner_mask.count_ones() > 1;
        for i in 0..self.wins.len() {
            if winner_mask & (1u64 << i) == 0 {
                self.losses[i] += 1;
            } else if split {
                self.splits[i] += 1;
            } else {
                self.wins[i] += 1;
            }
        }
        self.trials += 1;
    }

    /// Fold another batch over the same hands into this one
    pub fn merge(&mut self, other: &EquityAccumulator) {
        debug_assert_eq!(self.wins.len(), other.wins.len());
        for i in 0..self.wins.len() {
            self.wins[i] += other.wins[i];
            self.losses[i] += other.losses[i];
            self.splits[i] += other.splits[i];
        }
        self.trials += other.trials;
    }

    /// Number of trials recorded
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Convert counters into frequencies over the recorded trials
    ///
    /// `hands` must be the hands the counters were built for, in the same
    /// order. With no trials recorded every frequency is zero.
    pub fn finalize(&self, hands: &[HoleCards]) -> Result<EquityResults, EquityError> {
        if hands.len() != self.wins.len() {
            return Err(EquityError::InvalidInput(hands.len()));
        }
        let n = std::cmp::max(self.trials, 1) as f64;
        let equities = hands
            .iter()
            .enumerate()
            .map(|(i, hand)| {
                let equity = Equity {
                    win: self.wins[i] as f64 / n,
                    lose: self.losses[i] as f64 / n,
                    split: self.splits[i] as f64 / n,
                };
                (*hand, equity)
            })
            .collect();
        Ok(EquityResults {
            hands: hands.to_vec(),
            equities,
        })
    }
}

/// Finished equities keyed by hand
#[derive(Debug, Clone, PartialEq)]
pub struct EquityResults {
    /// input order
    hands: Vec<HoleCards>,
    equities: HashMap<HoleCards, Equity>,
}

impl EquityResults {
    pub fn get(&self, hand: &HoleCards) -> Option<&Equity> {
        self.equities.get(hand)
    }

    /// Hands and their equities in input order
    pub fn iter(&self) -> impl Iterator<Item = (&HoleCards, &Equity)> {
        self.hands.iter().map(move |h| (h, &self.equities[h]))
    }

    pub fn hands(&self) -> &[HoleCards] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// JSON object mapping each hand to its equity
    pub fn to_json(&self) -> Result<String, EquityError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Index<&HoleCards> for EquityResults {
    type Output = Equity;

    fn index(&self, hand: &HoleCards) -> &Equity {
        &self.equities[hand]
    }
}

impl Serialize for EquityResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (hand, equity) in self.iter() {
            map.serialize_entry(hand, equity)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hands() -> Vec<HoleCards> {
        HoleCards::from_strings(&["AhAd", "7c2s", "KsKh"]).unwrap()
    }

    #[test]
    fn test_record_single_winner() {
        let mut acc = EquityAccumulator::init(3);
        acc.record(0b010);
        assert_eq!(acc.wins, vec![0, 1, 0]);
        assert_eq!(acc.losses, vec![1, 0, 1]);
        assert_eq!(acc.splits, vec![0, 0, 0]);
        assert_eq!(acc.trials(), 1);
    }

    #[test]
    fn test_record_split_credits_every_winner() {
        let mut acc = EquityAccumulator::init(3);
        acc.record(0b101);
        assert_eq!(acc.wins, vec![0, 0, 0]);
        assert_eq!(acc.losses, vec![0, 1, 0]);
        assert_eq!(acc.splits, vec![1, 0, 1]);
    }

    #[test]
    fn test_merge() {
        let mut a = EquityAccumulator::init(3);
        let mut b = EquityAccumulator::init(3);
        a.record(0b001);
        b.record(0b011);
        b.record(0b100);
        a.merge(&b);
        assert_eq!(a.trials(), 3);
        assert_eq!(a.wins, vec![1, 0, 1]);
        assert_eq!(a.splits, vec![1, 1, 0]);
        assert_eq!(a.losses, vec![1, 2, 2]);
    }

    #[test]
    fn test_finalize() {
        let h = hands();
        let mut acc = EquityAccumulator::init(3);
        acc.record(0b001);
        acc.record(0b001);
        acc.record(0b011);
        acc.record(0b100);
        let results = acc.finalize(&h).unwrap();
        assert_eq!(results.len(), 3);
        let aces = results[&h[0]];
        assert_eq!(aces.win(), 0.5);
        assert_eq!(aces.split(), 0.25);
        assert_eq!(aces.lose(), 0.25);
        for (_, e) in results.iter() {
            assert!((e.win() + e.lose() + e.split() - 1.0).abs() < 1e-12);
        }
        let order: Vec<HoleCards> = results.iter().map(|(h, _)| *h).collect();
        assert_eq!(order, h);
    }

    #[test]
    fn test_finalize_divides_by_trials() {
        let h = hands();
        let mut a = EquityAccumulator::init(3);
        let mut b = EquityAccumulator::init(3);
        a.record(0b001);
        b.record(0b010);
        b.record(0b010);
        b.record(0b010);
        a.merge(&b);
        let results = a.finalize(&h).unwrap();
        assert_eq!(results[&h[0]].win(), 0.25);
        assert_eq!(results[&h[1]].win(), 0.75);
        assert_eq!(results[&h[2]].lose(), 1.0);
    }

    #[test]
    fn test_finalize_without_trials() {
        let h = hands();
        let results = EquityAccumulator::init(3).finalize(&h).unwrap();
        for (_, e) in results.iter() {
            assert_eq!(*e, Equity::default());
        }
    }

    #[test]
    fn test_finalize_hand_count_mismatch() {
        let h = hands();
        let mut acc = EquityAccumulator::init(2);
        acc.record(0b01);
        assert!(matches!(
            acc.finalize(&h),
            Err(EquityError::InvalidInput(3))
        ));
        assert!(matches!(
            acc.finalize(&h[..1]),
            Err(EquityError::InvalidInput(1))
        ));
    }

    #[test]
    fn test_init_at_mask_width() {
        let mut acc = EquityAccumulator::init(MAX_SHOWDOWN_HANDS);
        acc.record(1u64 << 63);
        assert_eq!(acc.wins[63], 1);
        assert_eq!(acc.losses[0], 1);
    }

    #[test]
    #[should_panic]
    fn test_init_wider_than_mask() {
        EquityAccumulator::init(MAX_SHOWDOWN_HANDS + 1);
    }

    #[test]
    fn test_display() {
        let e = Equity {
            win: 0.5,
            lose: 0.25,
            split: 0.25,
        };
        assert_eq!(e.to_string(), "[win=0.5 lose=0.25 split=0.25]");
    }

    #[test]
    fn test_to_json() {
        let h = hands();
        let mut acc = EquityAccumulator::init(3);
        acc.record(0b001);
        let json = acc.finalize(&h).unwrap().to_json().unwrap();
        // hands print normalized, higher card first
        assert_eq!(
            json,
            "{\"AdAh\":{\"win\":1.0,\"lose\":0.0,\"split\":0.0},\
             \"7c2s\":{\"win\":0.0,\"lose\":1.0,\"split\":0.0},\
             \"KhKs\":{\"win\":0.0,\"lose\":1.0,\"split\":0.0}}"
        );
    }
}
