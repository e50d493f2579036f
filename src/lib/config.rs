use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

pub const DATE_COLUMN: &str = "Date";
pub const TYPE_COLUMN: &str = "Type";
pub const AMOUNT_COLUMN: &str = "Amount";
pub const MONTH_COLUMN: &str = "Month";
pub const DAY_COLUMN: &str = "Day";

/// Columns of the export that are not carried past date decomposition.
pub const PRUNED_COLUMNS: [&str; 4] = ["Date", "Wallet", "Author", "Currency"];

const SPENDEE_COLUMNS: [&str; 9] = [
    "Date",
    "Wallet",
    "Type",
    "Category name",
    "Amount",
    "Currency",
    "Note",
    "Labels",
    "Author",
];

const OUTPUT_COLUMNS: [&str; 6] = ["Month", "Day", "Note", "Amount", "Category name", "Labels"];

/// chrono formats tried in order after RFC 3339.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformerConfig {
    /// The exact header an export must carry, in order.
    pub expected_input_columns: Vec<String>,
    /// Columns of both output ledgers, in order.
    pub output_column_order: Vec<String>,
    pub date_formats: Vec<String>,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            expected_input_columns: to_strings(&SPENDEE_COLUMNS),
            output_column_order: to_strings(&OUTPUT_COLUMNS),
            date_formats: to_strings(&DATE_FORMATS),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Where the two ledgers get written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub income: PathBuf,
    pub expenses: PathBuf,
}

impl OutputPaths {
    /// Uses the given paths, falling back to `output-income-<stamp>.csv` and
    /// `output-expenses-<stamp>.csv` in the working directory.
    pub fn resolve(
        income: Option<&Path>,
        expenses: Option<&Path>,
        started_at: NaiveDateTime,
    ) -> Self {
        let stamp = started_at.format("%Y%m%dT%H%M%S").to_string();
        Self {
            income: income
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(format!("output-income-{}.csv", stamp))),
            expenses: expenses
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(format!("output-expenses-{}.csv", stamp))),
        }
    }
}
