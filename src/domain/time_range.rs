//! Inclusive time range for data requests.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

use crate::domain::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::new(
                "time_range",
                format!("start {start} is after end {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Whole days: `start` at midnight through `end` at 23:59:59.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        let start = start
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ValidationError::new("time_range", "invalid start date"))?;
        let end = end
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ValidationError::new("time_range", "invalid end date"))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
