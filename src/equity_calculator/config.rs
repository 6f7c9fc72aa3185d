use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::simulator::calculate_equity;
use super::{EquityError, EquityResults};
use crate::constants::DEFAULT_SAMPLE_SIZE;
use crate::hand_evaluator::{Evaluator, LookupEvaluator};
use crate::hole_cards::HoleCards;

/// Simulation settings, fixed for the duration of a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// Number of boards to simulate
    pub sample_size: u32,
    /// Number of worker threads, each with its own random stream
    pub threads: u8,
}

impl Default for EquityConfig {
    fn default() -> Self {
        EquityConfig {
            sample_size: DEFAULT_SAMPLE_SIZE,
            threads: 1,
        }
    }
}

impl EquityConfig {
    /// Load settings from a JSON object
    ///
    /// Missing fields take their default value.
    ///
    /// # Example
    ///
    /// ```
    /// use holdem_equity::equity_calculator::EquityConfig;
    /// let config = EquityConfig::from_json(r#"{ "sample_size": 5000 }"#).unwrap();
    /// assert_eq!(config.sample_size, 5000);
    /// assert_eq!(config.threads, 1);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, EquityError> {
        let config: EquityConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EquityError> {
        if self.sample_size == 0 {
            return Err(EquityError::InvalidSampleSize);
        }
        if self.threads == 0 {
            return Err(EquityError::InvalidThreadCount);
        }
        Ok(())
    }
}

/// Monte carlo equity calculator
///
/// Holds an immutable config and evaluator. Build one with
/// `EquityCalculator::builder()` or use the defaults.
///
/// # Example
///
/// ```
/// use holdem_equity::equity_calculator::EquityCalculator;
/// use holdem_equity::hole_cards::HoleCards;
/// let calculator = EquityCalculator::builder().sample_size(2000).build().unwrap();
/// let hands = HoleCards::from_strings(&["AhAd", "7c2s"]).unwrap();
/// let equities = calculator.calculate(&hands).unwrap();
/// assert!(equities[&hands[0]].win() > equities[&hands[1]].win());
/// ```
#[derive(Clone)]
pub struct EquityCalculator {
    config: EquityConfig,
    evaluator: Arc<dyn Evaluator>,
}

impl Default for EquityCalculator {
    fn default() -> Self {
        EquityCalculator {
            config: EquityConfig::default(),
            evaluator: Arc::new(LookupEvaluator),
        }
    }
}

impl fmt::Debug for EquityCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EquityCalculator")
            .field("config", &self.config)
            .finish()
    }
}

impl EquityCalculator {
    pub fn builder() -> EquityCalculatorBuilder {
        EquityCalculatorBuilder::default()
    }

    /// Calculator with the given settings and the default evaluator
    pub fn from_config(config: EquityConfig) -> Result<Self, EquityError> {
        EquityCalculator::builder().config(config).build()
    }

    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    /// Simulate boards for the hands and return each hand's equity
    pub fn calculate(&self, hands: &[HoleCards]) -> Result<EquityResults, EquityError> {
        calculate_equity(hands, &self.config, self.evaluator.as_ref())
    }
}

/// Chained construction of an `EquityCalculator`
#[derive(Default)]
pub struct EquityCalculatorBuilder {
    config: EquityConfig,
    evaluator: Option<Arc<dyn Evaluator>>,
}

impl EquityCalculatorBuilder {
    pub fn sample_size(mut self, sample_size: u32) -> Self {
        self.config.sample_size = sample_size;
        self
    }

    pub fn threads(mut self, threads: u8) -> Self {
        self.config.threads = threads;
        self
    }

    pub fn evaluator<E: Evaluator + 'static>(mut self, evaluator: E) -> Self {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }

    pub fn config(mut self, config: EquityConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<EquityCalculator, EquityError> {
        self.config.validate()?;
        Ok(EquityCalculator {
            config: self.config,
            evaluator: self
                .evaluator
                .unwrap_or_else(|| Arc::new(LookupEvaluator)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let calculator = EquityCalculator::default();
        assert_eq!(calculator.config().sample_size, 10_000);
        assert_eq!(calculator.config().threads, 1);
        let built = EquityCalculator::builder().build().unwrap();
        assert_eq!(built.config(), calculator.config());
    }

    #[test]
    fn test_builder_chaining() {
        let calculator = EquityCalculator::builder()
            .sample_size(500)
            .threads(4)
            .evaluator(LookupEvaluator)
            .build()
            .unwrap();
        assert_eq!(
            *calculator.config(),
            EquityConfig {
                sample_size: 500,
                threads: 4
            }
        );
    }

    #[test]
    fn test_builder_rejects_zero() {
        assert!(matches!(
            EquityCalculator::builder().sample_size(0).build(),
            Err(EquityError::InvalidSampleSize)
        ));
        assert!(matches!(
            EquityCalculator::builder().threads(0).build(),
            Err(EquityError::InvalidThreadCount)
        ));
    }

    #[test]
    fn test_from_json() {
        let config = EquityConfig::from_json(r#"{"sample_size": 250, "threads": 2}"#).unwrap();
        assert_eq!(config.sample_size, 250);
        assert_eq!(config.threads, 2);
        assert_eq!(EquityConfig::from_json("{}").unwrap(), EquityConfig::default());
        assert!(matches!(
            EquityConfig::from_json(r#"{"sample_size": 0}"#),
            Err(EquityError::InvalidSampleSize)
        ));
        assert!(matches!(
            EquityConfig::from_json("not json"),
            Err(EquityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = EquityConfig {
            sample_size: 42,
            threads: 1,
        };
        let calculator = EquityCalculator::from_config(config).unwrap();
        assert_eq!(*calculator.config(), config);
    }
}
