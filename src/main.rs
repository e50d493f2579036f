use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use snwt_lib::args::Args;
use snwt_lib::{convert_export, OutputPaths, TransformerConfig};
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // taken once so both default file names carry the same stamp
    let started_at = Local::now().naive_local();

    let args = Args::parse();
    init_logger(args.log_level());
    trace!("{args:?}");

    let outputs = OutputPaths::resolve(args.output_income(), args.output_expenses(), started_at);
    debug!(
        input = %args.input_file_path().display(),
        income = %outputs.income.display(),
        expenses = %outputs.expenses.display(),
        "converting export"
    );

    match convert_export(
        args.input_file_path(),
        &outputs,
        &TransformerConfig::default(),
    ) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        // RUST_LOG does not exist; use the requested level for this crate only.
        None => EnvFilter::new(format!(
            "snwt_lib={},{}={}",
            level,
            env!("CARGO_CRATE_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
