//! Rebate Runner
//!
//! Calculates every request in a fixture set and prints a report.
//!
//! Use `-f` to load a fixture set by name
//! Use `--rebate`, `--product` and `--volume` to calculate a single request instead

use std::io;

use anyhow::Result;
use clap::Parser;
use rebates::{
    calculator::RebateCalculator,
    fixtures::Fixture,
    report::CalculationReport,
    utils::{LogFormat, RunnerArgs},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Rebate Runner
pub fn main() -> Result<()> {
    let args = RunnerArgs::parse();

    init_subscriber(&args)?;

    let fixture = Fixture::from_set_in(&args.fixtures_dir, &args.fixture)?;

    let rebates = fixture.rebate_store();
    let products = fixture.product_store();
    let calculator = RebateCalculator::new(&rebates, &products, &rebates);

    let requests = match args.request() {
        Some(request) => vec![request],
        None => fixture.requests().to_vec(),
    };

    let mut report = CalculationReport::new(fixture.currency()?);

    for request in requests {
        let result = calculator.calculate(Some(&request))?;

        report.push(request, result);
    }

    info!(
        stored = calculator.results().stored_calculations()?.len(),
        "calculations complete"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    report.write_to(&mut handle)?;

    Ok(())
}

fn init_subscriber(args: &RunnerArgs) -> Result<()> {
    let filter = EnvFilter::try_new(&args.log_level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match args.log_format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}
