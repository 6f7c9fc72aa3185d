use thiserror::Error;

use crate::constants::MIN_PLAYERS;

#[derive(Debug, Error)]
pub enum EquityError {
    #[error("at least {} hands are required, got {0}", MIN_PLAYERS)]
    InvalidInput(usize),
    #[error("card {0} is used twice or missing from the deck")]
    DuplicateCard(String),
    #[error("not enough cards left to complete the board")]
    DeckExhausted,
    #[error("sample size must be positive")]
    InvalidSampleSize,
    #[error("thread count must be positive")]
    InvalidThreadCount,
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("simulation worker panicked")]
    WorkerPanicked,
}
