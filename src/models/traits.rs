//! Forecaster trait defining the common interface for the models.

use crate::core::{Forecast, MonthlySeries};
use crate::error::Result;

/// Common interface for the forecasting models.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the series.
    fn fit(&mut self, series: &MonthlySeries) -> Result<()>;

    /// Generate predictions for the specified horizon.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Get the fitted values (in-sample predictions).
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the residuals (actual - fitted).
    fn residuals(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::Month;
    use crate::models::LastValue;

    fn make_series(values: &[f64]) -> MonthlySeries {
        let start = Month::new(2024, 1).unwrap();
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (start.advance(i), v))
            .collect();
        MonthlySeries::from_observations(observations)
    }

    #[test]
    fn boxed_forecaster_fit_predict() {
        let mut model: BoxedForecaster = Box::new(LastValue::new());
        assert!(!model.is_fitted());

        let series = make_series(&[1.0, 2.0, 3.0]);
        model.fit(&series).unwrap();
        assert!(model.is_fitted());

        let forecast = model.predict(5).unwrap();
        assert_eq!(forecast.horizon(), 5);
    }

    #[test]
    fn trait_exposes_name_and_residuals() {
        let mut model = LastValue::new();
        let series = make_series(&[1.0, 2.0]);

        assert!(model.residuals().is_none());
        model.fit(&series).unwrap();
        assert!(model.residuals().is_some());
        assert_eq!(model.name(), "Naive");
    }
}
