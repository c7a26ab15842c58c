//! Command-line entry point: forecast a monthly budget series.
//!
//! Every invocation writes exactly one JSON document to stdout. Diagnostics
//! go to stderr via `tracing` and never mix into the output.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use budget_forecast::engine::Pipeline;
use budget_forecast::error::ForecastError;
use budget_forecast::loader;
use budget_forecast::report::ForecastReport;

const DEFAULT_PERIODS: i64 = 12;

#[derive(Parser)]
#[command(name = "budget-forecast", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Input file with a header row and `date,amount` columns.
    input: PathBuf,

    /// Months to forecast. A non-integer silently becomes 12; zero or a
    /// negative count produces an empty forecast.
    #[arg(allow_hyphen_values = true)]
    predict_months: String,
}

/// Process-level failures, each with its JSON rendering and exit code.
#[derive(Error, Debug)]
enum CliError {
    #[error("Usage: budget-forecast <input_csv> <predict_months>")]
    Usage,

    #[error("Input file not found")]
    InputNotFound,

    #[error("Forecast processing failed")]
    Processing(#[source] ForecastError),

    #[error("Fallback forecast failed")]
    Fallback(#[source] ForecastError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage | CliError::InputNotFound | CliError::Processing(_) => 1,
            CliError::Fallback(_) => 2,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            CliError::Usage | CliError::InputNotFound => json!({ "error": self.to_string() }),
            CliError::Processing(source) | CliError::Fallback(source) => {
                json!({ "error": self.to_string(), "exc": source.to_string() })
            }
        }
    }
}

/// Interpret the horizon argument: non-integers default to 12, negatives
/// clamp to an empty horizon.
fn parse_periods(raw: &str) -> usize {
    raw.trim()
        .parse::<i64>()
        .unwrap_or(DEFAULT_PERIODS)
        .max(0) as usize
}

fn execute(input: &Path, horizon: usize) -> Result<ForecastReport, CliError> {
    if !input.is_file() {
        return Err(CliError::InputNotFound);
    }

    let pipeline = Pipeline::from_probe();
    if pipeline.has_primary() {
        let series = loader::load_strict(input).map_err(CliError::Processing)?;
        pipeline.run(&series, horizon).map_err(CliError::Processing)
    } else {
        let series = loader::load_lenient(input).map_err(CliError::Fallback)?;
        pipeline.run(&series, horizon).map_err(CliError::Fallback)
    }
}

fn fail(err: CliError) -> ExitCode {
    println!("{}", err.to_json());
    ExitCode::from(err.exit_code())
}

fn main() -> ExitCode {
    // Quiet by default: stdout carries exactly one JSON document, and the
    // fallback path is a normal outcome, not worth a default-level warning.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "error".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => return fail(CliError::Usage),
    };
    let horizon = parse_periods(&cli.predict_months);

    match execute(&cli.input, horizon) {
        Ok(report) => {
            println!("{}", report.to_json());
            ExitCode::SUCCESS
        }
        Err(err) => fail(err),
    }
}
