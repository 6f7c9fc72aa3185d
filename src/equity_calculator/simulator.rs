use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::equity::{EquityAccumulator, EquityResults};
use super::seed::derive_seed;
use super::{EquityConfig, EquityError};
use crate::constants::{BOARD_CARDS, CARD_COUNT, MAX_SHOWDOWN_HANDS};
use crate::deck::{Board, Deck};
use crate::hand_evaluator::Evaluator;
use crate::hole_cards::{card_to_string, HoleCards};

/// Runs a monte carlo simulation to calculate hand vs hand equity
///
/// Every trial shuffles a fresh deck, removes the hole cards, deals a
/// board and ranks each hand on it. Returns the win, lose and split
/// frequency of each hand.
///
/// The run is seeded from the hands, so the same hands in the same order
/// with the same config and evaluator always give the same result.
///
/// # Arguments
///
/// * `hands` Hole cards of each player, at least two
/// * `config` Sample size and thread count
/// * `evaluator` Ranks a hand on a board, lower is stronger
///
/// # Example
/// ```
/// use holdem_equity::equity_calculator::{calculate_equity, EquityConfig};
/// use holdem_equity::hand_evaluator::LookupEvaluator;
/// use holdem_equity::hole_cards::HoleCards;
/// let hands = HoleCards::from_strings(&["AhAd", "KsKc"]).unwrap();
/// let config = EquityConfig { sample_size: 1000, threads: 1 };
/// let equities = calculate_equity(&hands, &config, &LookupEvaluator).unwrap();
/// println!("{}", equities[&hands[0]]);
/// ```
pub fn calculate_equity(
    hands: &[HoleCards],
    config: &EquityConfig,
    evaluator: &dyn Evaluator,
) -> Result<EquityResults, EquityError> {
    config.validate()?;
    let seed = derive_seed(hands)?;
    validate_hands(hands)?;

    let sample_size = u64::from(config.sample_size);
    log::debug!(
        "simulating {} boards for {} hands (seed {:#018x}, {} threads)",
        sample_size,
        hands.len(),
        seed,
        config.threads
    );

    let results = if config.threads > 1 {
        run_sharded(hands, evaluator, sample_size, seed, u64::from(config.threads))?
    } else {
        let mut rng = SmallRng::seed_from_u64(seed);
        run_trials(hands, evaluator, sample_size, &mut rng)?
    };

    log::debug!("finished {} trials", results.trials());
    debug_assert_eq!(results.trials(), sample_size);
    results.finalize(hands)
}

/// Returns the bit mask of the hands holding the lowest rank
///
/// Bit `i` is set when hand `i` is among the winners. Every hand with the
/// best rank wins, ties are never broken.
///
/// # Panics
///
/// If given more than 64 ranks, since the mask has one bit per hand
pub fn resolve_showdown(ranks: &[u32]) -> u64 {
    assert!(
        ranks.len() <= MAX_SHOWDOWN_HANDS,
        "at most {} hands fit a winner mask, got {}",
        MAX_SHOWDOWN_HANDS,
        ranks.len()
    );
    let mut winner_mask = 0u64;
    let mut best_rank = u32::MAX;
    for (i, &rank) in ranks.iter().enumerate() {
        let player_mask = 1u64 << i;
        match rank.cmp(&best_rank) {
            Ordering::Less => {
                best_rank = rank;
                winner_mask = player_mask;
            }
            Ordering::Equal => {
                winner_mask |= player_mask;
            }
            Ordering::Greater => {}
        }
    }
    winner_mask
}

/// Check the hands can be dealt from one deck with a board to spare
fn validate_hands(hands: &[HoleCards]) -> Result<(), EquityError> {
    let mut used_cards_mask = 0u64;
    for hand in hands {
        let (c1, c2) = hand.cards();
        for &c in &[c1, c2] {
            if c >= CARD_COUNT {
                return Err(EquityError::DuplicateCard(format!("#{}", c)));
            }
            if (used_cards_mask & (1u64 << c)) != 0 {
                return Err(EquityError::DuplicateCard(card_to_string(c)));
            }
            used_cards_mask |= 1u64 << c;
        }
    }
    let cards_remaining = usize::from(CARD_COUNT) - used_cards_mask.count_ones() as usize;
    if cards_remaining < BOARD_CARDS {
        return Err(EquityError::DeckExhausted);
    }
    Ok(())
}

/// Run `n_trials` trials on one random stream
fn run_trials<R: Rng>(
    hands: &[HoleCards],
    evaluator: &dyn Evaluator,
    n_trials: u64,
    rng: &mut R,
) -> Result<EquityAccumulator, EquityError> {
    let mut batch = EquityAccumulator::init(hands.len());
    let mut ranks = vec![0u32; hands.len()];
    for _ in 0..n_trials {
        let mut deck = Deck::shuffled(rng);
        for hand in hands {
            deck.pop(*hand)?;
        }
        let board = Board::complete(&mut deck)?;
        for (rank, hand) in ranks.iter_mut().zip(hands) {
            *rank = evaluator.rank(hand, &board);
        }
        batch.record(resolve_showdown(&ranks));
    }
    Ok(batch)
}

/// Split the trials across worker threads
///
/// A generator seeded with the run seed hands out one seed per shard in
/// shard order, and each shard fills its own accumulator. The merged
/// result depends only on the run seed and the shard count.
fn run_sharded(
    hands: &[HoleCards],
    evaluator: &dyn Evaluator,
    sample_size: u64,
    seed: u64,
    n_threads: u64,
) -> Result<EquityAccumulator, EquityError> {
    let n_shards = std::cmp::min(n_threads, sample_size);
    let mut rng = SmallRng::seed_from_u64(seed);
    let shards: Vec<(u64, u64)> = (0..n_shards)
        .map(|i| {
            let n_trials = sample_size / n_shards + u64::from(i < sample_size % n_shards);
            (rng.gen::<u64>(), n_trials)
        })
        .collect();

    // spawn threads
    let batches = crossbeam::scope(|scope| {
        let handles: Vec<_> = shards
            .iter()
            .enumerate()
            .map(|(i, &(shard_seed, n_trials))| {
                scope.spawn(move |_| {
                    log::trace!("shard {} running {} trials", i, n_trials);
                    let mut rng = SmallRng::seed_from_u64(shard_seed);
                    run_trials(hands, evaluator, n_trials, &mut rng)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<Vec<_>>()
    })
    .map_err(|_| EquityError::WorkerPanicked)?;

    let mut results = EquityAccumulator::init(hands.len());
    for batch in batches {
        let batch = batch.map_err(|_| EquityError::WorkerPanicked)??;
        results.merge(&batch);
    }
    Ok(results)
}
