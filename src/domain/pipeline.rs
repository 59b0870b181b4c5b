//! One decision cycle: fetch, decide, execute.

use chrono::NaiveDateTime;

use crate::domain::error::TradekitError;
use crate::domain::order::{OrderIntent, OrderResult};
use crate::domain::strategy::Strategy;
use crate::domain::time_range::TimeRange;
use crate::ports::data_port::DataPort;
use crate::ports::execution_port::ExecutionPort;

#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub symbol: String,
    pub range: TimeRange,
    /// Trailing records handed to the strategy; 0 means all.
    pub window: usize,
}

/// What happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub symbol: String,
    pub strategy: String,
    pub records: usize,
    pub window: usize,
    pub first_timestamp: NaiveDateTime,
    pub last_timestamp: NaiveDateTime,
    pub last_close: f64,
    pub intent: Option<OrderIntent>,
    pub result: Option<OrderResult>,
}

pub fn run(
    request: &RunRequest,
    data_port: &dyn DataPort,
    strategy: &dyn Strategy,
    executor: &mut dyn ExecutionPort,
) -> Result<RunReport, TradekitError> {
    tracing::info!(symbol = %request.symbol, range = %request.range, "fetching market data");
    let records = data_port.fetch(&request.symbol, &request.range)?;

    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(TradekitError::data_unavailable(
                &request.symbol,
                "provider returned no records",
            ));
        }
    };

    let start = if request.window == 0 {
        0
    } else {
        records.len().saturating_sub(request.window)
    };
    let window = &records[start..];

    if window.len() < strategy.warmup() {
        tracing::warn!(
            have = window.len(),
            need = strategy.warmup(),
            strategy = strategy.name(),
            "window shorter than strategy warmup"
        );
    }

    tracing::info!(
        records = records.len(),
        window = window.len(),
        strategy = strategy.name(),
        "deciding"
    );
    let intent = strategy.decide(window);

    let result = match &intent {
        Some(intent) => Some(executor.execute(intent)),
        None => {
            tracing::info!("strategy holds, nothing to execute");
            None
        }
    };

    Ok(RunReport {
        symbol: request.symbol.clone(),
        strategy: strategy.name().to_string(),
        records: records.len(),
        window: window.len(),
        first_timestamp: first.timestamp(),
        last_timestamp: last.timestamp(),
        last_close: last.close(),
        intent,
        result,
    })
}
