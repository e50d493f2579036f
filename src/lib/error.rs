//! Error type shared by every stage of an export conversion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Provided input file path {} is not a file", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Provided input file path {} is not a CSV file", path.display())]
    InputFormat { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The export header differs from the expected column sequence.
    #[error("Unexpected columns {actual:?}, expected {expected:?}")]
    SchemaValidation {
        actual: Vec<String>,
        expected: Vec<String>,
    },

    /// `row` is the 1-based position of the data row, not counting the header.
    #[error("Row {row}: cannot parse date {value:?}")]
    DateParse { row: usize, value: String },

    #[error("Row {row}: cannot parse amount {value:?}")]
    AmountParse { row: usize, value: String },

    #[error("Column {column:?} is not available for output")]
    MissingColumn { column: String },

    #[error("Failed to encode output table: {0}")]
    OutputEncode(#[from] csv::Error),

    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
