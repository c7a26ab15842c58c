//! Naive forecasting model.
//!
//! Repeats the last observed value for every future period. Unlike the richer
//! models it accepts arbitrarily short histories, including an empty series,
//! where the repeated value is `0.0`.

use crate::core::{Forecast, MonthlySeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;

/// Naive forecaster that repeats the last known value.
#[derive(Debug, Clone, Default)]
pub struct LastValue {
    last_value: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl LastValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value the model will repeat, once fitted.
    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }
}

impl Forecaster for LastValue {
    fn fit(&mut self, series: &MonthlySeries) -> Result<()> {
        let values = series.values();
        self.last_value = Some(values.last().copied().unwrap_or(0.0));

        // Fitted values are shifted history (y_hat[t] = y[t-1]); the first
        // fitted value is undefined.
        let mut fitted = Vec::with_capacity(values.len());
        let mut residuals = Vec::with_capacity(values.len());
        for (i, &y) in values.iter().enumerate() {
            if i == 0 {
                fitted.push(f64::NAN);
                residuals.push(f64::NAN);
            } else {
                fitted.push(values[i - 1]);
                residuals.push(y - values[i - 1]);
            }
        }
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let last = self.last_value.ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        Ok(Forecast::from_values(vec![last; horizon]))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "Naive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::Month;

    fn make_series(values: &[f64]) -> MonthlySeries {
        let start = Month::new(2024, 1).unwrap();
        MonthlySeries::from_observations(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (start.advance(i), v))
                .collect(),
        )
    }

    #[test]
    fn repeats_last_value() {
        let mut model = LastValue::new();
        model.fit(&make_series(&[1.0, 2.0, 5.0])).unwrap();

        let forecast = model.predict(3).unwrap();
        assert_eq!(forecast.values(), &[5.0, 5.0, 5.0]);
    }

    #[test]
    fn empty_series_repeats_zero() {
        let mut model = LastValue::new();
        model.fit(&MonthlySeries::default()).unwrap();

        assert_eq!(model.last_value(), Some(0.0));
        let forecast = model.predict(4).unwrap();
        assert_eq!(forecast.values(), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn single_observation_is_repeated() {
        let mut model = LastValue::new();
        model.fit(&make_series(&[100.0])).unwrap();

        let forecast = model.predict(2).unwrap();
        assert_eq!(forecast.values(), &[100.0, 100.0]);
    }

    #[test]
    fn fitted_values_are_shifted_history() {
        let mut model = LastValue::new();
        model.fit(&make_series(&[1.0, 2.0, 3.0])).unwrap();

        let fitted = model.fitted_values().unwrap();
        assert!(fitted[0].is_nan());
        assert_eq!(&fitted[1..], &[1.0, 2.0]);

        let residuals = model.residuals().unwrap();
        assert!(residuals[0].is_nan());
        assert_eq!(&residuals[1..], &[1.0, 1.0]);
    }

    #[test]
    fn requires_fit_before_predict() {
        let model = LastValue::new();
        assert!(matches!(model.predict(5), Err(ForecastError::FitRequired)));
    }

    #[test]
    fn zero_horizon_returns_empty() {
        let mut model = LastValue::new();
        model.fit(&make_series(&[1.0])).unwrap();

        let forecast = model.predict(0).unwrap();
        assert!(forecast.is_empty());
    }
}
