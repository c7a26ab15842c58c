//! # budget-forecast
//!
//! Monthly budget forecasting: ingests a monthly time series of amounts and
//! projects it forward with triple exponential smoothing, degrading to an
//! average-growth projection when the smoothing model is unavailable or
//! fails to fit.

pub mod core;
pub mod engine;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Month, MonthlySeries};
    pub use crate::engine::{Engine, GrowthEngine, Pipeline};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::Forecaster;
    pub use crate::report::{Details, ForecastPoint, ForecastReport, Method};
}
