//! Monthly series data structure.

use std::collections::BTreeMap;

use crate::core::calendar::Month;
use crate::error::{ForecastError, Result};

/// An observed monthly time series at strict monthly frequency.
///
/// Construction normalizes raw observations: points are sorted ascending by
/// month, duplicate months are collapsed (the last value wins), and every
/// missing month between the first and last observation is filled with `0.0`.
/// The resulting series has exactly one point per calendar month over its
/// span, with no gaps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlySeries {
    months: Vec<Month>,
    values: Vec<f64>,
}

impl MonthlySeries {
    /// Build a normalized series from raw `(month, value)` observations.
    ///
    /// Observations may arrive unsorted and may repeat a month; both are
    /// resolved here. An empty input produces an empty series.
    pub fn from_observations(observations: Vec<(Month, f64)>) -> Self {
        if observations.is_empty() {
            return Self::default();
        }

        // Last value wins for a repeated month.
        let mut by_month: BTreeMap<Month, f64> = BTreeMap::new();
        for (month, value) in observations {
            by_month.insert(month, value);
        }

        let first = *by_month.keys().next().expect("non-empty map");
        let last = *by_month.keys().next_back().expect("non-empty map");
        let span = first.months_until(last) + 1;

        let mut months = Vec::with_capacity(span);
        let mut values = Vec::with_capacity(span);
        for offset in 0..span {
            let month = first.advance(offset);
            months.push(month);
            values.push(by_month.get(&month).copied().unwrap_or(0.0));
        }

        Self { months, values }
    }

    /// Build a series from parallel month/value vectors that are already at
    /// strict monthly frequency.
    pub fn from_parts(months: Vec<Month>, values: Vec<f64>) -> Result<Self> {
        if months.len() != values.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "months/values length mismatch: {} vs {}",
                months.len(),
                values.len()
            )));
        }
        for pair in months.windows(2) {
            if pair[0].advance(1) != pair[1] {
                return Err(ForecastError::InvalidParameter(format!(
                    "months must be consecutive: {} is not followed by {}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self { months, values })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Observed months, ascending.
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    /// Observed values, aligned with [`Self::months`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The final observation, if any.
    pub fn last(&self) -> Option<(Month, f64)> {
        match (self.months.last(), self.values.last()) {
            (Some(&m), Some(&v)) => Some((m, v)),
            _ => None,
        }
    }

    /// Iterate over `(month, value)` points.
    pub fn iter(&self) -> impl Iterator<Item = (Month, f64)> + '_ {
        self.months.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, m: u32) -> Month {
        Month::new(year, m).unwrap()
    }

    #[test]
    fn empty_observations_make_empty_series() {
        let series = MonthlySeries::from_observations(vec![]);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert!(series.last().is_none());
    }

    #[test]
    fn observations_are_sorted_by_month() {
        let series = MonthlySeries::from_observations(vec![
            (month(2024, 3), 3.0),
            (month(2024, 1), 1.0),
            (month(2024, 2), 2.0),
        ]);
        assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(
            series.months(),
            &[month(2024, 1), month(2024, 2), month(2024, 3)]
        );
    }

    #[test]
    fn duplicate_month_keeps_last_value() {
        let series = MonthlySeries::from_observations(vec![
            (month(2024, 1), 10.0),
            (month(2024, 2), 20.0),
            (month(2024, 1), 99.0),
        ]);
        assert_eq!(series.values(), &[99.0, 20.0]);
    }

    #[test]
    fn gaps_are_filled_with_zero() {
        let series = MonthlySeries::from_observations(vec![
            (month(2024, 1), 5.0),
            (month(2024, 4), 8.0),
        ]);
        assert_eq!(series.len(), 4);
        assert_eq!(series.values(), &[5.0, 0.0, 0.0, 8.0]);
        assert_eq!(series.months()[1], month(2024, 2));
        assert_eq!(series.months()[2], month(2024, 3));
    }

    #[test]
    fn span_crosses_year_boundary() {
        let series = MonthlySeries::from_observations(vec![
            (month(2024, 11), 1.0),
            (month(2025, 2), 4.0),
        ]);
        assert_eq!(
            series.months(),
            &[
                month(2024, 11),
                month(2024, 12),
                month(2025, 1),
                month(2025, 2)
            ]
        );
        assert_eq!(series.values(), &[1.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn single_observation_is_its_own_span() {
        let series = MonthlySeries::from_observations(vec![(month(2024, 6), 42.0)]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.last(), Some((month(2024, 6), 42.0)));
    }

    #[test]
    fn from_parts_validates_alignment() {
        let ok = MonthlySeries::from_parts(vec![month(2024, 1), month(2024, 2)], vec![1.0, 2.0]);
        assert!(ok.is_ok());

        let mismatched = MonthlySeries::from_parts(vec![month(2024, 1)], vec![1.0, 2.0]);
        assert!(matches!(
            mismatched,
            Err(ForecastError::InvalidParameter(_))
        ));

        let gapped = MonthlySeries::from_parts(vec![month(2024, 1), month(2024, 3)], vec![1.0, 2.0]);
        assert!(matches!(gapped, Err(ForecastError::InvalidParameter(_))));
    }

    #[test]
    fn iter_yields_aligned_points() {
        let series = MonthlySeries::from_observations(vec![
            (month(2024, 1), 1.0),
            (month(2024, 2), 2.0),
        ]);
        let points: Vec<_> = series.iter().collect();
        assert_eq!(points, vec![(month(2024, 1), 1.0), (month(2024, 2), 2.0)]);
    }
}
