//! Command-line interface of the `snwt` binary.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

/// snwt: Spendee to Net-Worth-Tracker.
///
/// Converts a Spendee CSV export into two CSV ledgers, one for income and one for expenses,
/// each with the columns Month, Day, Note, Amount, Category name and Labels. Expense amounts
/// are written as negative numbers. Transactions that are neither income nor expense are
/// skipped.
#[derive(Debug, Parser, Clone)]
#[command(name = "snwt", version)]
pub struct Args {
    /// Path to the Spendee CSV export.
    input_file_path: PathBuf,

    /// Where to write the income ledger. Defaults to output-income-<timestamp>.csv.
    #[arg(long, visible_alias = "out-income", env = "SNWT_OUTPUT_INCOME")]
    output_income: Option<PathBuf>,

    /// Where to write the expenses ledger. Defaults to output-expenses-<timestamp>.csv.
    #[arg(long, visible_alias = "out-expenses", env = "SNWT_OUTPUT_EXPENSES")]
    output_expenses: Option<PathBuf>,

    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Args {
    pub fn input_file_path(&self) -> &Path {
        &self.input_file_path
    }

    pub fn output_income(&self) -> Option<&Path> {
        self.output_income.as_deref()
    }

    pub fn output_expenses(&self) -> Option<&Path> {
        self.output_expenses.as_deref()
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use tracing_subscriber::filter::LevelFilter;

    use super::Args;

    #[test]
    fn only_input_is_required() {
        let args = Args::try_parse_from(["snwt", "export.csv"]).unwrap();
        assert_eq!(args.input_file_path(), Path::new("export.csv"));
        assert_eq!(args.log_level(), LevelFilter::INFO);
        assert!(Args::try_parse_from(["snwt"]).is_err());
    }

    #[test]
    fn outputs_accept_long_and_short_names() {
        let args = Args::try_parse_from([
            "snwt",
            "export.csv",
            "--output-income",
            "in.csv",
            "--out-expenses",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(args.output_income(), Some(Path::new("in.csv")));
        assert_eq!(args.output_expenses(), Some(Path::new("out.csv")));
    }

    #[test]
    fn log_level_is_parsed() {
        let args =
            Args::try_parse_from(["snwt", "export.csv", "--log-level", "debug"]).unwrap();
        assert_eq!(args.log_level(), LevelFilter::DEBUG);
    }
}
