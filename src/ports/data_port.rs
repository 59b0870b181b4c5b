//! Market data access port trait.

use crate::domain::error::TradekitError;
use crate::domain::market_data::MarketDataRecord;
use crate::domain::time_range::TimeRange;

pub trait DataPort {
    /// Validated records for `symbol` inside `range`, oldest first.
    ///
    /// One attempt per call. An unreachable source or an empty result is
    /// [`TradekitError::DataUnavailable`].
    fn fetch(
        &self,
        symbol: &str,
        range: &TimeRange,
    ) -> Result<Vec<MarketDataRecord>, TradekitError>;

    fn list_symbols(&self) -> Result<Vec<String>, TradekitError>;
}
