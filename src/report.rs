//! Forecast report: the JSON document emitted on success.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::Month;

/// Forecasting method that produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Exponential smoothing (with or without the seasonal component).
    HoltWinters,
    /// Average-growth projection.
    AvgGrowth,
    /// Last value repeated.
    Naive,
}

/// A dated point, observed or predicted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: Month,
    pub value: f64,
}

impl ForecastPoint {
    pub fn new(date: Month, value: f64) -> Self {
        Self { date, value }
    }
}

/// Model fit diagnostics for the primary method.
///
/// `params` is a sorted map so repeated runs serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct FitDetails {
    pub aic: Option<f64>,
    pub params: BTreeMap<String, f64>,
}

/// Diagnostic payload: structured fit statistics from the primary method, or
/// a human-readable explanation on the fallback paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Details {
    Fit(FitDetails),
    Text(String),
}

impl Details {
    pub fn text(message: impl Into<String>) -> Self {
        Details::Text(message.into())
    }
}

/// The complete forecast document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub method: Method,
    /// Normalized observed history; present only for the primary method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<ForecastPoint>>,
    pub forecast: Vec<ForecastPoint>,
    pub details: Details,
}

impl ForecastReport {
    /// Serialize as the single-line JSON document written to stdout.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("report serialization cannot fail")
    }
}
