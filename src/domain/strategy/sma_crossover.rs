//! Simple moving-average crossover.
//!
//! Long while SMA(short) is above SMA(long), short while it is below, flat on
//! equality and until both averages have warmed up.

use crate::domain::error::ValidationError;
use crate::domain::market_data::MarketDataRecord;
use crate::domain::moving_average::sma;
use crate::domain::order::OrderIntent;

use super::{Signal, Strategy, check_quantity, intent_at_last_close};

#[derive(Debug, Clone, PartialEq)]
pub struct SmaCrossover {
    short_window: usize,
    long_window: usize,
    quantity: f64,
}

impl SmaCrossover {
    pub fn new(
        short_window: usize,
        long_window: usize,
        quantity: f64,
    ) -> Result<Self, ValidationError> {
        if short_window == 0 {
            return Err(ValidationError::new("short_window", "must be at least 1"));
        }
        if short_window >= long_window {
            return Err(ValidationError::new(
                "short_window",
                format!("must be smaller than long_window ({short_window} >= {long_window})"),
            ));
        }
        check_quantity(quantity)?;
        Ok(Self {
            short_window,
            long_window,
            quantity,
        })
    }

    /// One signal per close.
    pub fn signals(&self, closes: &[f64]) -> Vec<Signal> {
        let short = sma(closes, self.short_window);
        let long = sma(closes, self.long_window);

        short
            .iter()
            .zip(long.iter())
            .map(|pair| match pair {
                (Some(s), Some(l)) if s > l => Signal::Long,
                (Some(s), Some(l)) if s < l => Signal::Short,
                _ => Signal::Flat,
            })
            .collect()
    }
}

impl Strategy for SmaCrossover {
    fn name(&self) -> &str {
        "sma_crossover"
    }

    fn warmup(&self) -> usize {
        self.long_window
    }

    fn decide(&self, window: &[MarketDataRecord]) -> Option<OrderIntent> {
        if window.len() < self.long_window {
            return None;
        }
        // Only the last signal matters; the tail of long_window closes suffices.
        let tail = &window[window.len() - self.long_window..];
        let closes: Vec<f64> = tail.iter().map(MarketDataRecord::close).collect();
        let side = self.signals(&closes).last()?.side()?;
        intent_at_last_close(window, side, self.quantity)
    }
}
