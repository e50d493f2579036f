use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Serialize)]
struct LedgerRow {
    #[serde(rename = "Month")]
    month: &'static str,
    #[serde(rename = "Day")]
    day: &'static str,
    #[serde(rename = "Note")]
    note: &'static str,
    #[serde(rename = "Amount")]
    amount: &'static str,
    #[serde(rename = "Category name")]
    category: &'static str,
    #[serde(rename = "Labels")]
    labels: &'static str,
}

impl LedgerRow {
    fn new(r: [&'static str; 6]) -> Self {
        Self {
            month: r[0],
            day: r[1],
            note: r[2],
            amount: r[3],
            category: r[4],
            labels: r[5],
        }
    }
}

#[derive(Serialize)]
struct ExportRow {
    #[serde(rename = "Date")]
    date: &'static str,
    #[serde(rename = "Wallet")]
    wallet: &'static str,
    #[serde(rename = "Type")]
    tx_type: &'static str,
    #[serde(rename = "Category name")]
    category: &'static str,
    #[serde(rename = "Amount")]
    amount: &'static str,
    #[serde(rename = "Currency")]
    currency: &'static str,
    #[serde(rename = "Note")]
    note: &'static str,
    #[serde(rename = "Labels")]
    labels: &'static str,
    #[serde(rename = "Author")]
    author: &'static str,
}

impl ExportRow {
    fn new(r: [&'static str; 9]) -> Self {
        Self {
            date: r[0],
            wallet: r[1],
            tx_type: r[2],
            category: r[3],
            amount: r[4],
            currency: r[5],
            note: r[6],
            labels: r[7],
            author: r[8],
        }
    }
}

const LEDGER_HEADER: &str = "Month,Day,Note,Amount,Category name,Labels\n";

fn to_csv<T: Serialize>(rows: Vec<T>, empty_header: &str) -> String {
    if rows.is_empty() {
        // serde only knows the field names once a row is written
        return empty_header.to_string();
    }
    let mut wtr = csv::Writer::from_writer(vec![]);
    for r in rows {
        wtr.serialize(r).unwrap();
    }
    wtr.flush().unwrap();
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}

// Only used during testing so no need to return result
/// Expected ledger text: Month, Day, Note, Amount, Category name, Labels.
pub fn create_csv(rows: Vec<[&'static str; 6]>) -> String {
    to_csv(rows.into_iter().map(LedgerRow::new).collect(), LEDGER_HEADER)
}

/// Spendee export text: Date, Wallet, Type, Category name, Amount, Currency, Note, Labels, Author.
pub fn create_export(rows: Vec<[&'static str; 9]>) -> String {
    to_csv(
        rows.into_iter().map(ExportRow::new).collect(),
        "Date,Wallet,Type,Category name,Amount,Currency,Note,Labels,Author\n",
    )
}

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
