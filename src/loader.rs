//! Series loading from delimited files.
//!
//! Two parsing modes over the same `date,amount` format: a strict mode for
//! the primary path, where any malformed row fails the whole load, and a
//! lenient mode for the degraded path, which keeps whatever rows it can.
//! Both feed [`MonthlySeries`] normalization.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::{calendar::Month, MonthlySeries};
use crate::error::{ForecastError, Result};

/// Load a series with the strict csv reader.
///
/// The file must have a header row naming `date` and `amount` columns (extra
/// columns are ignored), and every data row must parse.
pub fn load_strict(path: &Path) -> Result<MonthlySeries> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| ForecastError::InputError(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| ForecastError::InputError(e.to_string()))?
        .clone();
    let date_idx = headers
        .iter()
        .position(|h| h.trim() == "date")
        .ok_or_else(|| ForecastError::InputError("missing 'date' column".to_string()))?;
    let amount_idx = headers
        .iter()
        .position(|h| h.trim() == "amount")
        .ok_or_else(|| ForecastError::InputError("missing 'amount' column".to_string()))?;

    let mut observations = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ForecastError::InputError(e.to_string()))?;
        let date_field = record.get(date_idx).ok_or_else(|| {
            ForecastError::InputError(format!("row {}: missing date field", row + 1))
        })?;
        let amount_field = record.get(amount_idx).ok_or_else(|| {
            ForecastError::InputError(format!("row {}: missing amount field", row + 1))
        })?;

        let month = Month::parse(date_field)?;
        let value: f64 = amount_field.trim().parse().map_err(|_| {
            ForecastError::InputError(format!(
                "row {}: invalid amount {:?}",
                row + 1,
                amount_field
            ))
        })?;
        observations.push((month, value));
    }

    debug!(rows = observations.len(), "loaded series (strict)");
    Ok(MonthlySeries::from_observations(observations))
}

/// Load a series leniently: split each line on commas, take the first two
/// fields, skip rows that fail to parse.
///
/// Fails only when data rows were present but none of them parsed.
pub fn load_lenient(path: &Path) -> Result<MonthlySeries> {
    let text = fs::read_to_string(path).map_err(|e| ForecastError::InputError(e.to_string()))?;

    let mut observations = Vec::new();
    let mut candidates = 0usize;
    for line in text.trim().lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        candidates += 1;

        let mut fields = line.split(',');
        let (Some(date_field), Some(amount_field)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Ok(month) = Month::parse(date_field) else {
            continue;
        };
        let Ok(value) = amount_field.trim().parse::<f64>() else {
            continue;
        };
        observations.push((month, value));
    }

    if candidates > 0 && observations.is_empty() {
        return Err(ForecastError::InputError(
            "no parseable rows in input".to_string(),
        ));
    }

    debug!(
        rows = observations.len(),
        skipped = candidates - observations.len(),
        "loaded series (lenient)"
    );
    Ok(MonthlySeries::from_observations(observations))
}
