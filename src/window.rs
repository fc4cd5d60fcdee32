use crate::error::FetchError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date format accepted for range bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start > end {
            tracing::warn!(%start, %end, "start date is after end date; nothing can match");
        }
        DateRange { start, end }
    }

    /// Parses two `YYYY-MM-DD` strings into a range.
    pub fn parse(start: &str, end: &str) -> Result<Self, FetchError> {
        Ok(DateRange::new(parse_date(start)?, parse_date(end)?))
    }

    /// Start of the first day, inclusive.
    pub fn window_start(&self) -> NaiveDateTime {
        self.start.and_time(chrono::NaiveTime::MIN)
    }

    /// Start of the day after `end`, exclusive.
    ///
    /// Returns `None` when `end` is the last representable date, in which case
    /// the window has no upper bound.
    pub fn window_end(&self) -> Option<NaiveDateTime> {
        self.end
            .succ_opt()
            .map(|next| next.and_time(chrono::NaiveTime::MIN))
    }

    /// Whether `timestamp` falls in `[window_start, window_end)`.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.window_start() && self.window_end().is_none_or(|end| timestamp < end)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, FetchError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        FetchError::Parse(format!("invalid date `{value}` (expected YYYY-MM-DD): {e}"))
    })
}

/// Parses a GitHub timestamp such as `2023-09-17T23:59:59Z` into UTC.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, FetchError> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc).naive_utc())
        .map_err(|e| FetchError::Parse(format!("invalid timestamp `{value}`: {e}")))
}
