//! Immutable run configuration, built once at startup.

use std::path::PathBuf;

use super::execution::ExecutionConfig;
use super::strategy::StrategyConfig;
use super::time_range::TimeRange;

/// Largest accepted bar interval: one leap year.
pub const MAX_INTERVAL_MINUTES: i64 = 366 * 24 * 60;
/// Most bars one synthetic fetch may produce; longer series are refused, never truncated.
pub const MAX_SYNTHETIC_BARS: i64 = 100_000;

/// Random-walk generator parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub seed: u64,
    pub start_price: f64,
    pub interval_minutes: i64,
    pub symbols: Vec<String>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_price: 100.0,
            interval_minutes: 1440,
            symbols: vec!["FAKE".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Csv { data_dir: PathBuf },
    Synthetic(SyntheticConfig),
}

impl DataSource {
    pub fn name(&self) -> &'static str {
        match self {
            DataSource::Csv { .. } => "csv",
            DataSource::Synthetic(_) => "synthetic",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data: DataSource,
    pub range: TimeRange,
    pub symbol: String,
    /// Trailing records handed to the strategy; 0 means all.
    pub window: usize,
    pub strategy: StrategyConfig,
    pub execution: ExecutionConfig,
}
