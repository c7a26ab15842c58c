//! Holt-Winters forecasting model.
//!
//! Triple exponential smoothing with additive trend and additive seasonality.
//! Needs two full seasonal cycles of history; shorter series fall to the
//! trend-only model instead.

use std::collections::BTreeMap;

use crate::core::{Forecast, MonthlySeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::optimization::{minimize_bounded, SimplexOptions};

const PARAM_BOUNDS: (f64, f64) = (0.0001, 0.9999);

/// Additive Holt-Winters forecaster.
///
/// Model equations:
/// - Level: `l_t = alpha * (y_t - s_{t-m}) + (1-alpha) * (l_{t-1} + b_{t-1})`
/// - Trend: `b_t = beta * (l_t - l_{t-1}) + (1-beta) * b_{t-1}`
/// - Seasonal: `s_t = gamma * (y_t - l_t) + (1-gamma) * s_{t-m}`
/// - Forecast: `y_{t+h} = l_t + h * b_t + s_{t+h-m}`
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Level smoothing parameter (0 < alpha < 1).
    alpha: Option<f64>,
    /// Trend smoothing parameter (0 < beta < 1).
    beta: Option<f64>,
    /// Seasonal smoothing parameter (0 < gamma < 1).
    gamma: Option<f64>,
    /// Seasonal period (12 for monthly data with a yearly cycle).
    seasonal_period: usize,
    /// Whether to optimize parameters when fitting.
    optimize: bool,
    /// Current level state.
    level: Option<f64>,
    /// Current trend state.
    trend: Option<f64>,
    /// Seasonal indices.
    seasonals: Option<Vec<f64>>,
    /// Initial states, kept for the fit diagnostics.
    initial_level: Option<f64>,
    initial_trend: Option<f64>,
    /// Fitted values.
    fitted: Option<Vec<f64>>,
    /// Residuals.
    residuals: Option<Vec<f64>>,
    /// AIC-like criterion from the Gaussian residual likelihood.
    aic: Option<f64>,
    /// Series length at fit time.
    n: usize,
}

impl HoltWinters {
    /// Create a model with fixed smoothing parameters.
    pub fn new(alpha: f64, beta: f64, gamma: f64, seasonal_period: usize) -> Self {
        Self {
            alpha: Some(alpha.clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1)),
            beta: Some(beta.clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1)),
            gamma: Some(gamma.clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1)),
            seasonal_period,
            optimize: false,
            level: None,
            trend: None,
            seasonals: None,
            initial_level: None,
            initial_trend: None,
            fitted: None,
            residuals: None,
            aic: None,
            n: 0,
        }
    }

    /// Create a model whose parameters are chosen by SSE minimization.
    pub fn auto(seasonal_period: usize) -> Self {
        Self {
            alpha: None,
            beta: None,
            gamma: None,
            seasonal_period,
            optimize: true,
            level: None,
            trend: None,
            seasonals: None,
            initial_level: None,
            initial_trend: None,
            fitted: None,
            residuals: None,
            aic: None,
            n: 0,
        }
    }

    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    pub fn beta(&self) -> Option<f64> {
        self.beta
    }

    pub fn gamma(&self) -> Option<f64> {
        self.gamma
    }

    pub fn seasonal_period(&self) -> usize {
        self.seasonal_period
    }

    pub fn seasonals(&self) -> Option<&[f64]> {
        self.seasonals.as_deref()
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
        if let Some(gamma) = self.gamma {
            params.insert("smoothing_seasonal".to_string(), gamma);
        }
        if let Some(level) = self.initial_level {
            params.insert("initial_level".to_string(), level);
        }
        if let Some(trend) = self.initial_trend {
            params.insert("initial_trend".to_string(), trend);
        }
        params
    }

    /// Initialize state from the first complete season(s).
    fn initialize_state(values: &[f64], period: usize) -> (f64, f64, Vec<f64>) {
        // Initial level: average of the first season.
        let level = values.iter().take(period).sum::<f64>() / period as f64;

        // Initial trend: average seasonal difference across the first two
        // cycles.
        let trend = if values.len() >= 2 * period {
            let sum: f64 = (0..period)
                .map(|i| (values[period + i] - values[i]) / period as f64)
                .sum();
            sum / period as f64
        } else {
            0.0
        };

        // Initial seasonal indices, normalized to sum to zero.
        let mut seasonals: Vec<f64> = values.iter().take(period).map(|y| y - level).collect();
        let adjustment = seasonals.iter().sum::<f64>() / period as f64;
        for s in &mut seasonals {
            *s -= adjustment;
        }

        (level, trend, seasonals)
    }

    /// Run the smoothing recursion, accumulating squared one-step errors and
    /// optionally recording fitted values.
    fn smooth(
        values: &[f64],
        alpha: f64,
        beta: f64,
        gamma: f64,
        period: usize,
        mut record: Option<&mut Vec<f64>>,
    ) -> (f64, f64, Vec<f64>, f64) {
        let (mut level, mut trend, mut seasonals) = Self::initialize_state(values, period);
        let mut sse = 0.0;

        for (t, &y) in values.iter().enumerate().skip(period) {
            let season_idx = t % period;
            let s = seasonals[season_idx];

            let forecast = level + trend + s;
            let error = y - forecast;
            sse += error * error;
            if let Some(fitted) = record.as_deref_mut() {
                fitted.push(forecast);
            }

            let level_prev = level;
            level = alpha * (y - s) + (1.0 - alpha) * (level_prev + trend);
            trend = beta * (level - level_prev) + (1.0 - beta) * trend;
            seasonals[season_idx] = gamma * (y - level) + (1.0 - gamma) * s;
        }

        (level, trend, seasonals, sse)
    }

    fn calculate_sse(values: &[f64], alpha: f64, beta: f64, gamma: f64, period: usize) -> f64 {
        if values.len() < period {
            return f64::MAX;
        }
        Self::smooth(values, alpha, beta, gamma, period, None).3
    }

    fn optimize_params(values: &[f64], period: usize) -> (f64, f64, f64) {
        let outcome = minimize_bounded(
            |params| Self::calculate_sse(values, params[0], params[1], params[2], period),
            &[0.3, 0.1, 0.1],
            &[PARAM_BOUNDS, PARAM_BOUNDS, PARAM_BOUNDS],
            SimplexOptions::default(),
        );
        (outcome.point[0], outcome.point[1], outcome.point[2])
    }
}

impl Default for HoltWinters {
    fn default() -> Self {
        Self::auto(12)
    }
}

impl Forecaster for HoltWinters {
    fn fit(&mut self, series: &MonthlySeries) -> Result<()> {
        let values = series.values();
        let period = self.seasonal_period;
        if period == 0 {
            return Err(ForecastError::InvalidParameter(
                "seasonal period must be positive".to_string(),
            ));
        }
        if values.len() < 2 * period {
            return Err(ForecastError::InsufficientData {
                needed: 2 * period,
                got: values.len(),
            });
        }

        self.n = values.len();

        if self.optimize {
            let (alpha, beta, gamma) = Self::optimize_params(values, period);
            self.alpha = Some(alpha);
            self.beta = Some(beta);
            self.gamma = Some(gamma);
        }
        let alpha = self.alpha.ok_or(ForecastError::FitRequired)?;
        let beta = self.beta.ok_or(ForecastError::FitRequired)?;
        let gamma = self.gamma.ok_or(ForecastError::FitRequired)?;

        let (initial_level, initial_trend, _) = Self::initialize_state(values, period);
        self.initial_level = Some(initial_level);
        self.initial_trend = Some(initial_trend);

        // The first season seeds the state; its points carry the observed
        // values as "fitted".
        let mut fitted: Vec<f64> = values.iter().take(period).copied().collect();
        let (level, trend, seasonals, _) =
            Self::smooth(values, alpha, beta, gamma, period, Some(&mut fitted));

        if !level.is_finite() || !trend.is_finite() || seasonals.iter().any(|s| !s.is_finite()) {
            return Err(ForecastError::ComputationError(
                "smoothing state diverged".to_string(),
            ));
        }

        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .enumerate()
            .map(|(t, (&y, &f))| if t < period { 0.0 } else { y - f })
            .collect();

        // Gaussian likelihood of the one-step residuals; k counts the three
        // smoothing parameters, the two initial states, and one index per
        // seasonal position.
        let valid = &residuals[period..];
        if !valid.is_empty() {
            let n = valid.len() as f64;
            let variance = valid.iter().map(|r| r * r).sum::<f64>() / n;
            if variance > 0.0 {
                let k = (3 + 2 + period) as f64;
                let ll = -0.5 * n * (1.0 + variance.ln() + (2.0 * std::f64::consts::PI).ln());
                self.aic = Some(-2.0 * ll + 2.0 * k);
            }
        }

        self.level = Some(level);
        self.trend = Some(trend);
        self.seasonals = Some(seasonals);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let level = self.level.ok_or(ForecastError::FitRequired)?;
        let trend = self.trend.ok_or(ForecastError::FitRequired)?;
        let seasonals = self.seasonals.as_ref().ok_or(ForecastError::FitRequired)?;
        let period = self.seasonal_period;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let predictions: Vec<f64> = (1..=horizon)
            .map(|h| {
                let season_idx = (self.n + h - 1) % period;
                level + (h as f64) * trend + seasonals[season_idx]
            })
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
        "HoltWinters(additive)"
    }
}
