//! Utils

use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;

use crate::calculator::CalculateRebateRequest;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Arguments for the rebate runner
#[derive(Debug, Parser)]
#[command(name = "rebates-runner", about = "Calculate rebates for a fixture set", long_about = None)]
pub struct RunnerArgs {
    /// Fixture set to load rebates, products and requests from
    #[arg(short, long, default_value = "default")]
    pub fixture: String,

    /// Directory containing the `rebates`, `products` and `requests` fixture folders
    #[arg(long, env = "REBATES_FIXTURES_DIR", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Rebate identifier; with `--product`, calculates this request instead of the fixture's
    #[arg(long, requires = "product")]
    pub rebate: Option<String>,

    /// Product identifier for a single request
    #[arg(long, requires = "rebate")]
    pub product: Option<String>,

    /// Volume for a single request
    #[arg(long, default_value_t = Decimal::ONE)]
    pub volume: Decimal,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl RunnerArgs {
    /// The single request given on the command line, if any
    pub fn request(&self) -> Option<CalculateRebateRequest> {
        let (Some(rebate), Some(product)) = (&self.rebate, &self.product) else {
            return None;
        };

        Some(CalculateRebateRequest::new(
            rebate.clone(),
            product.clone(),
            self.volume,
        ))
    }
}
