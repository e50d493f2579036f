use std::{ffi::OsStr, fs, fs::File, io, path::Path};

use im::Vector;
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::types::{Cell, InputTable, OutputTable, Row};

/// The input must be an existing file ending in `.csv`.
pub fn check_input_path(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(LedgerError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    if path.extension() != Some(OsStr::new("csv")) {
        return Err(LedgerError::InputFormat {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Reads an export with its header verbatim; every field is kept as text.
pub fn parse_export<R: io::Read>(input: R) -> std::result::Result<InputTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::None)
        .from_reader(input);

    let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows: Vector<Row> = Vector::new();
    for record in reader.records() {
        // fail if a record cannot be read, no point in a partial ledger
        let record = record?;
        rows.push_back(
            header
                .iter()
                .zip(record.iter())
                .map(|(column, value)| (column.as_str(), Cell::text(value)))
                .collect(),
        );
    }

    Ok(InputTable::new(header, rows))
}

pub fn read_export(path: &Path) -> Result<InputTable> {
    let to_error = |source: csv::Error| LedgerError::InputRead {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|e| to_error(e.into()))?;
    let table = parse_export(file).map_err(to_error)?;
    debug!(path = %path.display(), rows = table.rows.len(), "read export");
    Ok(table)
}

/// Encodes a table with its own column order as the header row and no index column.
pub fn table_to_csv(table: &OutputTable) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    wtr.write_record(&table.columns)?;
    for row in table.rows.iter() {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let data = String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(data)
}

/// The table is fully encoded before the destination is touched.
pub fn write_table(table: &OutputTable, path: &Path) -> Result<()> {
    let data = table_to_csv(table)?;
    fs::write(path, data).map_err(|source| LedgerError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = table.len(), "wrote ledger");
    Ok(())
}
