//! Trading strategies.
//!
//! Every strategy is a pure decision function over a window of records,
//! exposed through the [`Strategy`] trait. The concrete implementation is
//! picked once at startup from [`StrategyConfig`].

pub mod sma_crossover;
pub mod threshold;

use std::fmt;

use crate::domain::error::ValidationError;
use crate::domain::market_data::MarketDataRecord;
use crate::domain::order::{OrderIntent, Side};

pub use sma_crossover::SmaCrossover;
pub use threshold::ThresholdStrategy;

pub trait Strategy {
    fn name(&self) -> &str;

    /// Minimum window length that can produce a decision.
    fn warmup(&self) -> usize {
        1
    }

    /// Decide on the trailing window, oldest record first.
    fn decide(&self, window: &[MarketDataRecord]) -> Option<OrderIntent>;
}

/// Position indication: 1 (long), -1 (short), 0 (flat).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Long,
    Short,
    Flat,
}

impl Signal {
    pub fn as_int(&self) -> i8 {
        match self {
            Signal::Long => 1,
            Signal::Short => -1,
            Signal::Flat => 0,
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Signal::Long => Some(Side::Buy),
            Signal::Short => Some(Side::Sell),
            Signal::Flat => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_int())
    }
}

/// Strategy selection and parameters, as loaded from `[strategy]`.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyConfig {
    Threshold {
        quantity: f64,
        buy_above: f64,
        sell_below: Option<f64>,
    },
    SmaCrossover {
        quantity: f64,
        short_window: usize,
        long_window: usize,
    },
}

impl StrategyConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            StrategyConfig::Threshold { .. } => "threshold",
            StrategyConfig::SmaCrossover { .. } => "sma_crossover",
        }
    }
}

pub fn build_strategy(config: &StrategyConfig) -> Result<Box<dyn Strategy>, ValidationError> {
    match *config {
        StrategyConfig::Threshold {
            quantity,
            buy_above,
            sell_below,
        } => Ok(Box::new(ThresholdStrategy::new(
            quantity, buy_above, sell_below,
        )?)),
        StrategyConfig::SmaCrossover {
            quantity,
            short_window,
            long_window,
        } => Ok(Box::new(SmaCrossover::new(
            short_window,
            long_window,
            quantity,
        )?)),
    }
}

/// Intent on the window's last record, priced at its close.
pub(crate) fn intent_at_last_close(
    window: &[MarketDataRecord],
    side: Side,
    quantity: f64,
) -> Option<OrderIntent> {
    let last = window.last()?;
    OrderIntent::new(last.symbol(), side, quantity, Some(last.close())).ok()
}

pub(crate) fn check_quantity(quantity: f64) -> Result<(), ValidationError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ValidationError::new(
            "quantity",
            format!("must be a positive number, got {quantity}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_int_form() {
        assert_eq!(Signal::Long.as_int(), 1);
        assert_eq!(Signal::Short.as_int(), -1);
        assert_eq!(Signal::Flat.as_int(), 0);
        assert_eq!(Signal::Short.to_string(), "-1");
    }

    #[test]
    fn signal_side() {
        assert_eq!(Signal::Long.side(), Some(Side::Buy));
        assert_eq!(Signal::Short.side(), Some(Side::Sell));
        assert_eq!(Signal::Flat.side(), None);
    }

    #[test]
    fn build_threshold() {
        let config = StrategyConfig::Threshold {
            quantity: 10.0,
            buy_above: 50.0,
            sell_below: None,
        };
        let strategy = build_strategy(&config).unwrap();
        assert_eq!(strategy.name(), "threshold");
        assert_eq!(strategy.warmup(), 1);
    }

    #[test]
    fn build_sma_crossover() {
        let config = StrategyConfig::SmaCrossover {
            quantity: 1.0,
            short_window: 10,
            long_window: 30,
        };
        let strategy = build_strategy(&config).unwrap();
        assert_eq!(strategy.name(), "sma_crossover");
        assert_eq!(strategy.warmup(), 30);
    }

    #[test]
    fn build_rejects_bad_parameters() {
        let config = StrategyConfig::SmaCrossover {
            quantity: 1.0,
            short_window: 30,
            long_window: 10,
        };
        assert!(build_strategy(&config).is_err());
    }

    #[test]
    fn kind_names() {
        let config = StrategyConfig::Threshold {
            quantity: 1.0,
            buy_above: 1.0,
            sell_below: None,
        };
        assert_eq!(config.kind(), "threshold");
    }
}
