//! Inclusive date range for filtering scholarships by due date.

use chrono::NaiveDate;

use crate::error::{ScholarError, ScholarResult};

/// Inclusive date range.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> ScholarResult<Self> {
        Self::bounded(Some(from), Some(to))
    }

    /// Unbounded in both directions.
    pub fn all() -> Self {
        DateRange::default()
    }

    fn bounded(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ScholarResult<Self> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(ScholarError::InvalidDate(format!(
                    "start date {} is after end date {}",
                    f, t
                )));
            }
        }
        Ok(DateRange { from, to })
    }

    /// Parse command-line style bounds.
    /// - `from`: "start" for unbounded, or YYYY-MM-DD
    /// - `to`: "end" for unbounded, or YYYY-MM-DD
    ///
    /// A missing argument falls back to the matching bound of `default`.
    pub fn from_args(from: Option<&str>, to: Option<&str>, default: DateRange) -> ScholarResult<Self> {
        let from = match from {
            Some("start") => None,
            Some(s) => Some(parse_date(s)?),
            None => default.from,
        };

        let to = match to {
            Some("end") => None,
            Some(s) => Some(parse_date(s)?),
            None => default.to,
        };

        Self::bounded(from, to)
    }

    /// Whether `date` falls within the range (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> ScholarResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ScholarError::InvalidDate(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}
