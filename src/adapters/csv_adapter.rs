//! CSV file data adapter.
//!
//! One file per symbol, `<base_path>/<SYMBOL>.csv`, with a header row naming
//! `timestamp` (or `date`), `open`, `high`, `low`, `close` and `volume` in any
//! order.

use crate::domain::error::{TradekitError, ValidationError};
use crate::domain::market_data::{MarketDataRecord, RawRecord};
use crate::domain::time_range::TimeRange;
use crate::ports::data_port::DataPort;
use csv::StringRecord;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    base_path: PathBuf,
}

/// Column positions resolved from the header row.
struct Columns {
    timestamp: Option<usize>,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: Option<usize>,
    volume: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };
        Self {
            timestamp: find(&["timestamp", "date", "datetime"]),
            open: find(&["open"]),
            high: find(&["high"]),
            low: find(&["low"]),
            close: find(&["close"]),
            volume: find(&["volume"]),
        }
    }

    fn raw(&self, symbol: &str, row: &StringRecord) -> RawRecord {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::to_string);
        RawRecord {
            timestamp: cell(self.timestamp),
            symbol: Some(symbol.to_string()),
            open: cell(self.open),
            high: cell(self.high),
            low: cell(self.low),
            close: cell(self.close),
            volume: cell(self.volume),
        }
    }
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// `<SYMBOL>.csv`, falling back to a file whose stem matches ignoring case.
    fn csv_path(&self, symbol: &str) -> PathBuf {
        let exact = self.base_path.join(format!("{}.csv", symbol));
        if exact.is_file() {
            return exact;
        }
        fs::read_dir(&self.base_path)
            .ok()
            .and_then(|entries| {
                entries.filter_map(Result::ok).map(|e| e.path()).find(|path| {
                    is_csv(path)
                        && path
                            .file_stem()
                            .is_some_and(|stem| stem.to_string_lossy().eq_ignore_ascii_case(symbol))
                })
            })
            .unwrap_or(exact)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

impl DataPort for CsvAdapter {
    fn fetch(
        &self,
        symbol: &str,
        range: &TimeRange,
    ) -> Result<Vec<MarketDataRecord>, TradekitError> {
        let path = self.csv_path(symbol);
        tracing::debug!(path = %path.display(), "reading csv");

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| {
                TradekitError::data_unavailable(
                    symbol,
                    format!("failed to open {}: {}", path.display(), e),
                )
            })?;

        let headers = rdr.headers().map_err(|e| {
            TradekitError::data_unavailable(symbol, format!("failed to read header: {}", e))
        })?;
        let columns = Columns::from_headers(headers);

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result.map_err(|e| {
                if e.is_io_error() {
                    return TradekitError::data_unavailable(symbol, format!("read error: {}", e));
                }
                TradekitError::InvalidRecord {
                    symbol: symbol.to_string(),
                    line: e.position().map(|p| p.line()).unwrap_or(0),
                    source: ValidationError::new("row", e.to_string()),
                }
            })?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            let record = MarketDataRecord::from_raw(&columns.raw(symbol, &row)).map_err(
                |source| TradekitError::InvalidRecord {
                    symbol: symbol.to_string(),
                    line,
                    source,
                },
            )?;

            if range.contains(record.timestamp()) {
                records.push(record);
            }
        }

        if records.is_empty() {
            return Err(TradekitError::data_unavailable(
                symbol,
                format!("no records between {}", range),
            ));
        }

        records.sort_by_key(|r| r.timestamp());
        tracing::debug!(symbol, count = records.len(), "csv records loaded");
        Ok(records)
    }

    fn list_symbols(&self) -> Result<Vec<String>, TradekitError> {
        let entries = fs::read_dir(&self.base_path)?;

        let mut symbols = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !is_csv(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                symbols.push(stem.to_string_lossy().to_uppercase());
            }
        }

        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}
