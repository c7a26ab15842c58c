//! Holt's linear trend forecasting model.
//!
//! Double exponential smoothing for data with a trend but no usable seasonal
//! signal. The engine selects it when the history is too short to identify a
//! twelve-month seasonal component.

use std::collections::BTreeMap;

use crate::core::{Forecast, MonthlySeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::optimization::{minimize_bounded, SimplexOptions};

const PARAM_BOUNDS: (f64, f64) = (0.0001, 0.9999);

/// Holt's linear trend forecaster.
///
/// Model equations:
/// - Level: `l_t = alpha * y_t + (1-alpha) * (l_{t-1} + b_{t-1})`
/// - Trend: `b_t = beta * (l_t - l_{t-1}) + (1-beta) * b_{t-1}`
/// - Forecast: `y_{t+h} = l_t + h * b_t`
#[derive(Debug, Clone)]
pub struct HoltLinearTrend {
    /// Level smoothing parameter (0 < alpha < 1).
    alpha: Option<f64>,
    /// Trend smoothing parameter (0 < beta < 1).
    beta: Option<f64>,
    /// Whether to optimize parameters when fitting.
    optimize: bool,
    /// Current level state.
    level: Option<f64>,
    /// Current trend state.
    trend: Option<f64>,
    /// Initial states, kept for the fit diagnostics.
    initial_level: Option<f64>,
    initial_trend: Option<f64>,
    /// Fitted values.
    fitted: Option<Vec<f64>>,
    /// Residuals.
    residuals: Option<Vec<f64>>,
    /// AIC-like criterion from the Gaussian residual likelihood.
    aic: Option<f64>,
}

impl HoltLinearTrend {
    /// Create a model with fixed smoothing parameters.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha: Some(alpha.clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1)),
            beta: Some(beta.clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1)),
            optimize: false,
            level: None,
            trend: None,
            initial_level: None,
            initial_trend: None,
            fitted: None,
            residuals: None,
            aic: None,
        }
    }

    /// Create a model whose parameters are chosen by SSE minimization.
    pub fn auto() -> Self {
        Self {
            alpha: None,
            beta: None,
            optimize: true,
            level: None,
            trend: None,
            initial_level: None,
            initial_trend: None,
            fitted: None,
            residuals: None,
            aic: None,
        }
    }

    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    pub fn beta(&self) -> Option<f64> {
        self.beta
    }

    pub fn level(&self) -> Option<f64> {
        self.level
    }

    pub fn trend(&self) -> Option<f64> {
        self.trend
    }

    /// AIC-like goodness-of-fit score, available after fitting.
    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    /// Fitted parameters keyed by their conventional names.
    pub fn params(&self) -> BTreeMap<String, f64> {
        let mut params = BTreeMap::new();
        if let Some(alpha) = self.alpha {
            params.insert("smoothing_level".to_string(), alpha);
        }
        if let Some(beta) = self.beta {
            params.insert("smoothing_trend".to_string(), beta);
        }
        if let Some(level) = self.initial_level {
            params.insert("initial_level".to_string(), level);
        }
        if let Some(trend) = self.initial_trend {
            params.insert("initial_trend".to_string(), trend);
        }
        params
    }

    /// Initial level and trend from the first observations.
    fn initialize_state(values: &[f64]) -> (f64, f64) {
        (values[0], values[1] - values[0])
    }

    /// In-sample SSE for a candidate parameter pair.
    fn calculate_sse(values: &[f64], alpha: f64, beta: f64) -> f64 {
        let (mut level, mut trend) = Self::initialize_state(values);
        let mut sse = 0.0;

        for &y in values.iter().skip(1) {
            let forecast = level + trend;
            let error = y - forecast;
            sse += error * error;

            let level_prev = level;
            level = alpha * y + (1.0 - alpha) * (level_prev + trend);
            trend = beta * (level - level_prev) + (1.0 - beta) * trend;
        }

        sse
    }

    fn optimize_params(values: &[f64]) -> (f64, f64) {
        let outcome = minimize_bounded(
            |params| Self::calculate_sse(values, params[0], params[1]),
            &[0.3, 0.1],
            &[PARAM_BOUNDS, PARAM_BOUNDS],
            SimplexOptions::default(),
        );
        (outcome.point[0], outcome.point[1])
    }
}

impl Default for HoltLinearTrend {
    fn default() -> Self {
        Self::auto()
    }
}

impl Forecaster for HoltLinearTrend {
    fn fit(&mut self, series: &MonthlySeries) -> Result<()> {
        let values = series.values();
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }

        if self.optimize {
            let (alpha, beta) = Self::optimize_params(values);
            self.alpha = Some(alpha);
            self.beta = Some(beta);
        }
        let alpha = self.alpha.ok_or(ForecastError::FitRequired)?;
        let beta = self.beta.ok_or(ForecastError::FitRequired)?;

        let (mut level, mut trend) = Self::initialize_state(values);
        self.initial_level = Some(level);
        self.initial_trend = Some(trend);

        let mut fitted = Vec::with_capacity(values.len());
        let mut residuals = Vec::with_capacity(values.len());

        // The first observation seeds the state and has no one-step forecast.
        fitted.push(level);
        residuals.push(0.0);

        for &y in values.iter().skip(1) {
            let forecast = level + trend;
            fitted.push(forecast);
            residuals.push(y - forecast);

            let level_prev = level;
            level = alpha * y + (1.0 - alpha) * (level_prev + trend);
            trend = beta * (level - level_prev) + (1.0 - beta) * trend;
        }

        if !level.is_finite() || !trend.is_finite() {
            return Err(ForecastError::ComputationError(
                "smoothing state diverged".to_string(),
            ));
        }

        self.level = Some(level);
        self.trend = Some(trend);

        // Gaussian likelihood of the one-step residuals; k counts the two
        // smoothing parameters plus the two initial states.
        let valid = &residuals[1..];
        if !valid.is_empty() {
            let n = valid.len() as f64;
            let variance = valid.iter().map(|r| r * r).sum::<f64>() / n;
            if variance > 0.0 {
                let k = 4.0;
                let ll = -0.5 * n * (1.0 + variance.ln() + (2.0 * std::f64::consts::PI).ln());
                self.aic = Some(-2.0 * ll + 2.0 * k);
            }
        }

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let level = self.level.ok_or(ForecastError::FitRequired)?;
        let trend = self.trend.ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let predictions: Vec<f64> = (1..=horizon)
            .map(|h| level + (h as f64) * trend)
            .collect();

        Ok(Forecast::from_values(predictions))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "HoltLinearTrend"
    }
}
