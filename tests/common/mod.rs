#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::io::Write;
use tradekit::domain::error::TradekitError;
pub use tradekit::domain::market_data::MarketDataRecord;
use tradekit::domain::time_range::TimeRange;
use tradekit::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<MarketDataRecord>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_records(mut self, symbol: &str, records: Vec<MarketDataRecord>) -> Self {
        self.data.insert(symbol.to_string(), records);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch(
        &self,
        symbol: &str,
        range: &TimeRange,
    ) -> Result<Vec<MarketDataRecord>, TradekitError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TradekitError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        let records: Vec<MarketDataRecord> = self
            .data
            .get(symbol)
            .map(|r| {
                r.iter()
                    .filter(|rec| range.contains(rec.timestamp()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if records.is_empty() {
            return Err(TradekitError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no records".to_string(),
            });
        }
        Ok(records)
    }

    fn list_symbols(&self) -> Result<Vec<String>, TradekitError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(date_str: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(16, 0, 0)
        .unwrap()
}

pub fn make_record(symbol: &str, date_str: &str, close: f64) -> MarketDataRecord {
    MarketDataRecord::new(
        at(date_str),
        symbol,
        close,
        close + 1.0,
        close - 1.0,
        close,
        1000.0,
    )
    .unwrap()
}

pub fn generate_records(
    symbol: &str,
    start_date: &str,
    closes: &[f64],
) -> Vec<MarketDataRecord> {
    let start = at(start_date);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            MarketDataRecord::new(
                start + chrono::Duration::days(i as i64),
                symbol,
                close,
                close,
                close,
                close,
                1000.0,
            )
            .unwrap()
        })
        .collect()
}

pub fn year_2024() -> TimeRange {
    TimeRange::from_dates(date(2024, 1, 1), date(2024, 12, 31)).unwrap()
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
