//! Forecasting models.

mod traits;

pub mod growth;
#[cfg(feature = "smoothing")]
pub mod holt;
#[cfg(feature = "smoothing")]
pub mod holt_winters;
pub mod naive;

pub use growth::AverageGrowth;
#[cfg(feature = "smoothing")]
pub use holt::HoltLinearTrend;
#[cfg(feature = "smoothing")]
pub use holt_winters::HoltWinters;
pub use naive::LastValue;
pub use traits::{BoxedForecaster, Forecaster};
