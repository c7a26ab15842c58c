//! Average-growth forecasting model.
//!
//! Projects a series forward by compounding the mean month-over-month
//! proportional change. A zero-valued previous month contributes a growth
//! rate of `0.0` for that step; downstream consumers depend on this exact
//! treatment, so it must not be replaced with a statistically nicer one.

use crate::core::{Forecast, MonthlySeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;

/// Round to two decimal places, the precision of the emitted amounts.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average-growth forecaster.
///
/// Each projected value is `previous * (1 + avg_growth)`; compounding uses
/// the unrounded value while the emitted value is rounded to 2 decimals.
#[derive(Debug, Clone, Default)]
pub struct AverageGrowth {
    avg_growth: Option<f64>,
    last_value: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl AverageGrowth {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mean month-over-month growth rate, once fitted.
    pub fn avg_growth(&self) -> Option<f64> {
        self.avg_growth
    }

    fn step_growth(prev: f64, curr: f64) -> f64 {
        if prev == 0.0 {
            0.0
        } else {
            (curr - prev) / prev
        }
    }
}

impl Forecaster for AverageGrowth {
    fn fit(&mut self, series: &MonthlySeries) -> Result<()> {
        let values = series.values();
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }

        let growths: Vec<f64> = values
            .windows(2)
            .map(|w| Self::step_growth(w[0], w[1]))
            .collect();
        let avg_growth = growths.iter().sum::<f64>() / growths.len() as f64;

        // In-sample fit: apply the averaged rate to each previous value.
        let mut fitted = Vec::with_capacity(values.len());
        let mut residuals = Vec::with_capacity(values.len());
        for (i, &y) in values.iter().enumerate() {
            if i == 0 {
                fitted.push(f64::NAN);
                residuals.push(f64::NAN);
            } else {
                let predicted = values[i - 1] * (1.0 + avg_growth);
                fitted.push(predicted);
                residuals.push(y - predicted);
            }
        }

        self.avg_growth = Some(avg_growth);
        self.last_value = values.last().copied();
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let avg_growth = self.avg_growth.ok_or(ForecastError::FitRequired)?;
        let mut running = self.last_value.ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let mut values = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            running *= 1.0 + avg_growth;
            values.push(round2(running));
        }

        Ok(Forecast::from_values(values))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "AverageGrowth"
    }
}
