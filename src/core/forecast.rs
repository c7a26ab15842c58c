//! Forecast value container produced by the models.

/// Point predictions for a forecast horizon.
///
/// Values are ordered by step; the month each step lands on is attached later
/// by the engine, which knows the last observed month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    values: Vec<f64>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Check if the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Point predictions, one per step.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Whether every predicted value is a finite number.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Consume the forecast, returning its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}
