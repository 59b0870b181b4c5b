//! Market data records and their validation.
//!
//! A [`RawRecord`] is what a provider reads off the wire or disk: every field
//! optional, every value still a string. [`MarketDataRecord::from_raw`] is the
//! only way from one to the other, so a record that exists is a valid record.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::error::ValidationError;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unvalidated observation as read from a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub timestamp: Option<String>,
    pub symbol: Option<String>,
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub close: Option<String>,
    pub volume: Option<String>,
}

/// A single timestamped price/volume observation for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketDataRecord {
    timestamp: NaiveDateTime,
    symbol: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl MarketDataRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        symbol: &str,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, ValidationError> {
        if symbol.trim().is_empty() {
            return Err(ValidationError::new("symbol", "must not be blank"));
        }
        check_price("open", open)?;
        check_price("high", high)?;
        check_price("low", low)?;
        check_price("close", close)?;
        if !volume.is_finite() || volume < 0.0 {
            return Err(ValidationError::new(
                "volume",
                format!("must be a non-negative number, got {volume}"),
            ));
        }
        if high < low {
            return Err(ValidationError::new(
                "high",
                format!("high {high} is below low {low}"),
            ));
        }
        if high < open.max(close) {
            return Err(ValidationError::new(
                "high",
                format!("high {high} is below open/close"),
            ));
        }
        if low > open.min(close) {
            return Err(ValidationError::new(
                "low",
                format!("low {low} is above open/close"),
            ));
        }

        Ok(Self {
            timestamp,
            symbol: symbol.to_string(),
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Type-check and range-check a raw record.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, ValidationError> {
        let symbol = raw
            .symbol
            .as_deref()
            .ok_or_else(|| ValidationError::missing("symbol"))?;
        let timestamp = parse_timestamp(
            raw.timestamp
                .as_deref()
                .ok_or_else(|| ValidationError::missing("timestamp"))?,
        )?;

        Self::new(
            timestamp,
            symbol,
            parse_number("open", raw.open.as_deref())?,
            parse_number("high", raw.high.as_deref())?,
            parse_number("low", raw.low.as_deref())?,
            parse_number("close", raw.close.as_deref())?,
            parse_number("volume", raw.volume.as_deref())?,
        )
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

fn check_price(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new(
            field,
            format!("must be a positive number, got {value}"),
        ));
    }
    Ok(())
}

fn parse_number(field: &str, value: Option<&str>) -> Result<f64, ValidationError> {
    let text = value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::missing(field))?;
    text.parse::<f64>()
        .map_err(|_| ValidationError::new(field, format!("not a number: {text:?}")))
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` or a bare date (midnight).
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let text = value.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            ValidationError::new(
                "timestamp",
                format!("expected YYYY-MM-DD[ HH:MM:SS], got {text:?}"),
            )
        })
}
