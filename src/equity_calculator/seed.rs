use super::EquityError;
use crate::constants::MIN_PLAYERS;
use crate::hole_cards::HoleCards;

/// FNV-1a 64 bit offset basis
const SEED_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
/// FNV-1a 64 bit prime
const SEED_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Derives the simulation seed from the input hands
///
/// Folds each hand's canonical id (`HoleCards::id`) into the FNV-1a
/// offset basis in input order: `seed = (seed ^ id) * prime` with 64 bit
/// wraparound. The same hands in the same order always give the same
/// seed, so a calculation is reproducible from its input.
///
/// # Example
///
/// ```
/// use holdem_equity::equity_calculator::derive_seed;
/// use holdem_equity::hole_cards::HoleCards;
/// let hands = HoleCards::from_strings(&["AhAd", "7c2s"]).unwrap();
/// assert_eq!(derive_seed(&hands).unwrap(), derive_seed(&hands).unwrap());
/// ```
pub fn derive_seed(hands: &[HoleCards]) -> Result<u64, EquityError> {
    if hands.len() < MIN_PLAYERS {
        return Err(EquityError::InvalidInput(hands.len()));
    }
    Ok(hands
        .iter()
        .fold(SEED_BASIS, |seed, h| (seed ^ h.id()).wrapping_mul(SEED_PRIME)))
}
