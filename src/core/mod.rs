//! Core data structures: calendar months, monthly series, forecast values.

pub mod calendar;
pub mod forecast;
pub mod series;

pub use calendar::Month;
pub use forecast::Forecast;
pub use series::MonthlySeries;
