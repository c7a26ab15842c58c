//! Forecasting strategies and the fallback pipeline.
//!
//! Two interchangeable strategies sit behind the [`Engine`] trait: the
//! smoothing strategy (compiled behind the `smoothing` feature) and the
//! growth-rate strategy. The pipeline probes capability once at startup and
//! from then on follows a fixed policy: try the primary strategy, absorb any
//! model failure into a fallback run, and keep the failure reason in the
//! report's `details`.

use tracing::warn;

use crate::core::{Month, MonthlySeries};
use crate::error::Result;
use crate::models::{AverageGrowth, Forecaster, LastValue};
use crate::report::{Details, ForecastPoint, ForecastReport, Method};

#[cfg(feature = "smoothing")]
use crate::error::ForecastError;
#[cfg(feature = "smoothing")]
use crate::models::{HoltLinearTrend, HoltWinters};
#[cfg(feature = "smoothing")]
use crate::report::FitDetails;
#[cfg(feature = "smoothing")]
use tracing::debug;

/// A forecasting strategy producing a complete report.
pub trait Engine {
    fn name(&self) -> &'static str;

    /// Forecast `horizon` months past the end of `series`.
    fn forecast(&self, series: &MonthlySeries, horizon: usize) -> Result<ForecastReport>;
}

/// Months in one seasonal cycle of monthly data.
pub const SEASONAL_PERIOD: usize = 12;

/// Primary strategy: exponential smoothing.
///
/// Seasonality is only identifiable with two full cycles of history, so the
/// seasonal model is used at 24+ observations and the trend-only model below
/// that. Either way the report is labeled `holt_winters`.
#[cfg(feature = "smoothing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothingEngine;

#[cfg(feature = "smoothing")]
impl SmoothingEngine {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "smoothing")]
impl Engine for SmoothingEngine {
    fn name(&self) -> &'static str {
        "smoothing"
    }

    fn forecast(&self, series: &MonthlySeries, horizon: usize) -> Result<ForecastReport> {
        let seasonal = series.len() >= 2 * SEASONAL_PERIOD;
        debug!(
            observations = series.len(),
            seasonal, horizon, "fitting smoothing model"
        );

        let (forecast, aic, params) = if seasonal {
            let mut model = HoltWinters::auto(SEASONAL_PERIOD);
            model.fit(series)?;
            (model.predict(horizon)?, model.aic(), model.params())
        } else {
            let mut model = HoltLinearTrend::auto();
            model.fit(series)?;
            (model.predict(horizon)?, model.aic(), model.params())
        };

        if !forecast.is_finite() {
            return Err(ForecastError::ComputationError(
                "forecast contains non-finite values".to_string(),
            ));
        }

        // fit() rejects series shorter than two points, so an anchor exists.
        let (anchor, _) = series.last().ok_or(ForecastError::EmptyData)?;

        let history = series
            .iter()
            .map(|(month, value)| ForecastPoint::new(month, value))
            .collect();
        let points = forecast
            .values()
            .iter()
            .enumerate()
            .map(|(i, &value)| ForecastPoint::new(anchor.advance(i + 1), value))
            .collect();

        Ok(ForecastReport {
            method: Method::HoltWinters,
            history: Some(history),
            forecast: points,
            details: Details::Fit(FitDetails { aic, params }),
        })
    }
}

/// Fallback strategy: average-growth projection, or a repeated last value
/// when there is not enough history to estimate growth.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthEngine;

impl GrowthEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for GrowthEngine {
    fn name(&self) -> &'static str {
        "growth"
    }

    fn forecast(&self, series: &MonthlySeries, horizon: usize) -> Result<ForecastReport> {
        if series.len() < 2 {
            let mut model = LastValue::new();
            model.fit(series)?;
            let forecast = model.predict(horizon)?;

            // No future months can be derived from this little history; the
            // last observed month (or a fixed epoch) is repeated instead.
            let anchor = series
                .months()
                .last()
                .copied()
                .unwrap_or(Month::EPOCH);
            let points = forecast
                .values()
                .iter()
                .map(|&value| ForecastPoint::new(anchor, value))
                .collect();

            return Ok(ForecastReport {
                method: Method::Naive,
                history: None,
                forecast: points,
                details: Details::text("Not enough history; returning last value repeated."),
            });
        }

        let mut model = AverageGrowth::new();
        model.fit(series)?;
        let forecast = model.predict(horizon)?;
        let avg_growth = model.avg_growth().unwrap_or(0.0);

        // len() >= 2 here, so an anchor month exists.
        let anchor = series
            .months()
            .last()
            .copied()
            .unwrap_or(Month::EPOCH);
        let points = forecast
            .values()
            .iter()
            .enumerate()
            .map(|(i, &value)| ForecastPoint::new(anchor.advance(i + 1), value))
            .collect();

        Ok(ForecastReport {
            method: Method::AvgGrowth,
            history: None,
            forecast: points,
            details: Details::text(format!("Average monthly growth rate: {avg_growth:.4}")),
        })
    }
}

/// The startup capability probe: the smoothing strategy when it is compiled
/// in, otherwise nothing.
fn probe_primary() -> Option<Box<dyn Engine>> {
    #[cfg(feature = "smoothing")]
    return Some(Box::new(SmoothingEngine::new()));

    #[cfg(not(feature = "smoothing"))]
    None
}

/// The forecasting pipeline: an optional primary strategy and the always
/// available growth fallback.
pub struct Pipeline {
    primary: Option<Box<dyn Engine>>,
    fallback: GrowthEngine,
}

impl Pipeline {
    /// Build the pipeline the binary uses, probing for the primary strategy.
    pub fn from_probe() -> Self {
        Self {
            primary: probe_primary(),
            fallback: GrowthEngine::new(),
        }
    }

    /// A pipeline without the primary strategy, as when the smoothing
    /// capability is absent.
    pub fn degraded() -> Self {
        Self {
            primary: None,
            fallback: GrowthEngine::new(),
        }
    }

    /// Whether a primary strategy is available.
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Run the pipeline.
    ///
    /// A primary-model failure is not an error: the fallback runs on the same
    /// series and the failure reason replaces the report's `details`. Only a
    /// fallback failure propagates.
    pub fn run(&self, series: &MonthlySeries, horizon: usize) -> Result<ForecastReport> {
        if let Some(primary) = &self.primary {
            match primary.forecast(series, horizon) {
                Ok(report) => return Ok(report),
                Err(err) => {
                    warn!(engine = primary.name(), %err, "primary model failed; falling back");
                    let mut report = self.fallback.forecast(series, horizon)?;
                    report.details = Details::text(format!("Holt-Winters failed: {err}"));
                    return Ok(report);
                }
            }
        }
        self.fallback.forecast(series, horizon)
    }
}
