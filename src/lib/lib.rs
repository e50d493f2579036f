pub mod args;
pub mod config;
mod error;
pub mod io;
pub mod transform;
pub mod types;
mod utils;

use std::path::Path;

use tracing::info;

pub use config::{OutputPaths, TransformerConfig};
pub use error::{LedgerError, Result};
pub use transform::transform;
pub use types::Ledgers;

/// Reads a Spendee export, transforms it and writes both ledgers.
///
/// Neither output is written unless the whole export transforms cleanly.
pub fn convert_export(
    input: &Path,
    outputs: &OutputPaths,
    config: &TransformerConfig,
) -> Result<Ledgers> {
    io::check_input_path(input)?;
    let table = io::read_export(input)?;

    let ledgers = transform(&table, config)?;

    io::write_table(&ledgers.income, &outputs.income)?;
    io::write_table(&ledgers.expenses, &outputs.expenses)?;
    info!(
        income = %outputs.income.display(),
        expenses = %outputs.expenses.display(),
        "wrote ledgers"
    );

    Ok(ledgers)
}
