mod config;
mod equity;
mod error;
mod seed;
mod simulator;

pub use config::{EquityCalculator, EquityCalculatorBuilder, EquityConfig};
pub use equity::{Equity, EquityAccumulator, EquityResults};
pub use error::EquityError;
pub use seed::derive_seed;
pub use simulator::{calculate_equity, resolve_showdown};
