//! Calendar month arithmetic.
//!
//! Forecast dates are whole calendar months, represented as the first day of
//! the month. Month advancement is a pure function of `(year, month, offset)`
//! so the wrap and year-rollover behavior is testable without any date
//! library involvement.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// A calendar month, ordered chronologically.
///
/// Displayed and serialized as `YYYY-MM-01`, matching the wire format of the
/// forecast output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    /// 1..=12
    month: u32,
}

impl Month {
    /// Anchor used when a forecast has no observed month to start from.
    pub const EPOCH: Month = Month {
        year: 1970,
        month: 1,
    };

    /// Create a month, validating the month number.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidDate(format!(
                "{year:04}-{month:02} is not a calendar month"
            )));
        }
        Ok(Self { year, month })
    }

    /// The calendar month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a `YYYY-MM-DD` date and truncate it to its month.
    pub fn parse(text: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| ForecastError::InvalidDate(text.trim().to_string()))?;
        Ok(Self::from_date(date))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Advance by `offset` months, wrapping the month index 1..=12 and
    /// incrementing the year on overflow.
    pub fn advance(self, offset: usize) -> Self {
        let total = (self.month - 1) as usize + offset;
        Self {
            year: self.year + (total / 12) as i32,
            month: (total % 12) as u32 + 1,
        }
    }

    /// Number of whole months from `self` to `other` (other >= self).
    pub fn months_until(self, other: Month) -> usize {
        let a = self.year as i64 * 12 + (self.month - 1) as i64;
        let b = other.year as i64 * 12 + (other.month - 1) as i64;
        (b - a).max(0) as usize
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-01", self.year, self.month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_rejects_out_of_range() {
        assert!(Month::new(2024, 0).is_err());
        assert!(Month::new(2024, 13).is_err());
        assert!(Month::new(2024, 12).is_ok());
    }

    #[test]
    fn advance_within_year() {
        let m = Month::new(2024, 3).unwrap();
        assert_eq!(m.advance(2), Month::new(2024, 5).unwrap());
        assert_eq!(m.advance(0), m);
    }

    #[test]
    fn advance_wraps_december_into_next_year() {
        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.advance(1), Month::new(2025, 1).unwrap());
        assert_eq!(dec.advance(2), Month::new(2025, 2).unwrap());
    }

    #[test]
    fn advance_spans_multiple_years() {
        let m = Month::new(2024, 6).unwrap();
        assert_eq!(m.advance(12), Month::new(2025, 6).unwrap());
        assert_eq!(m.advance(31), Month::new(2027, 1).unwrap());
    }

    #[test]
    fn months_until_counts_whole_months() {
        let a = Month::new(2024, 11).unwrap();
        let b = Month::new(2025, 2).unwrap();
        assert_eq!(a.months_until(b), 3);
        assert_eq!(a.months_until(a), 0);
        // Reversed order saturates at zero.
        assert_eq!(b.months_until(a), 0);
    }

    #[test]
    fn parse_truncates_to_month() {
        let m = Month::parse("2024-03-15").unwrap();
        assert_eq!(m, Month::new(2024, 3).unwrap());
        assert_eq!(m.to_string(), "2024-03-01");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Month::parse("not-a-date").is_err());
        assert!(Month::parse("2024-13-01").is_err());
        assert!(Month::parse("").is_err());
    }

    #[test]
    fn display_pads_year_and_month() {
        let m = Month::new(987, 4).unwrap();
        assert_eq!(m.to_string(), "0987-04-01");
    }

    #[test]
    fn serializes_as_first_of_month_string() {
        let m = Month::new(2025, 9).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2025-09-01\"");
    }

    #[test]
    fn ordering_is_chronological() {
        let a = Month::new(2024, 12).unwrap();
        let b = Month::new(2025, 1).unwrap();
        assert!(a < b);
    }
}
