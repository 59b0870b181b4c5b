//! Synthetic market data for demos and dry runs.
//!
//! A seeded random walk: each step applies a small positive drift plus
//! uniform noise to the previous close. Output depends only on the seed, the
//! symbol and the requested range.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::app_config::{MAX_SYNTHETIC_BARS, SyntheticConfig};
use crate::domain::error::TradekitError;
use crate::domain::market_data::MarketDataRecord;
use crate::domain::time_range::TimeRange;
use crate::ports::data_port::DataPort;

const DRIFT: f64 = 0.0005;
const NOISE: f64 = 0.02;

pub struct SyntheticAdapter {
    config: SyntheticConfig,
}

impl SyntheticAdapter {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }

    /// Per-symbol seed so different symbols get different paths.
    fn seed_for(&self, symbol: &str) -> u64 {
        symbol.bytes().fold(self.config.seed, |acc, b| {
            acc.wrapping_mul(31).wrapping_add(u64::from(b))
        })
    }
}

impl DataPort for SyntheticAdapter {
    fn fetch(
        &self,
        symbol: &str,
        range: &TimeRange,
    ) -> Result<Vec<MarketDataRecord>, TradekitError> {
        if self.config.interval_minutes <= 0 {
            return Err(TradekitError::data_unavailable(
                symbol,
                "interval_minutes must be positive",
            ));
        }
        let step = Duration::try_minutes(self.config.interval_minutes).ok_or_else(|| {
            TradekitError::data_unavailable(symbol, "interval_minutes is out of range")
        })?;

        let span = (range.end() - range.start()).num_minutes();
        let needed = span / self.config.interval_minutes + 1;
        if needed > MAX_SYNTHETIC_BARS {
            return Err(TradekitError::data_unavailable(
                symbol,
                format!(
                    "{} needs {needed} bars at {} min, limit is {MAX_SYNTHETIC_BARS}",
                    range, self.config.interval_minutes
                ),
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.seed_for(symbol));
        let mut records = Vec::with_capacity(needed as usize);
        let mut timestamp = range.start();
        let mut prev_close = self.config.start_price;

        while range.contains(timestamp) {
            let change = DRIFT + rng.gen_range(-NOISE..NOISE);
            let close = prev_close * (1.0 + change);
            let open = prev_close;
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.005));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.005));
            let volume = rng.gen_range(1_000.0..100_000.0_f64).round();

            let record = MarketDataRecord::new(timestamp, symbol, open, high, low, close, volume)?;
            records.push(record);

            prev_close = close;
            match timestamp.checked_add_signed(step) {
                Some(next) => timestamp = next,
                None => break,
            }
        }

        if records.is_empty() {
            return Err(TradekitError::data_unavailable(
                symbol,
                format!("no bars generated between {}", range),
            ));
        }

        tracing::debug!(symbol, count = records.len(), "synthetic records generated");
        Ok(records)
    }

    fn list_symbols(&self) -> Result<Vec<String>, TradekitError> {
        let mut symbols = self.config.symbols.clone();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}
