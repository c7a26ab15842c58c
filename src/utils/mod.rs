//! Numeric utilities.

#[cfg(feature = "smoothing")]
pub mod optimization;

#[cfg(feature = "smoothing")]
pub use optimization::{minimize_bounded, SimplexOptions, SimplexOutcome};
