use std::fmt::{self, Display};
use std::ops::Neg;
use std::str::FromStr;

use im::{HashMap, Vector};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Debug, Hash)]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for MonetaryAmount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map(Self)
    }
}

impl Neg for MonetaryAmount {
    type Output = MonetaryAmount;

    /// Zero stays unsigned so an expense of `0.00` is not written as `-0.00`.
    fn neg(self) -> Self::Output {
        if self.0.is_zero() {
            self
        } else {
            MonetaryAmount(-self.0)
        }
    }
}

impl Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Decimal keeps the scale it was parsed with, so "12.50" prints back as "12.50".
        Display::fmt(&self.0, f)
    }
}

/// The `Type` column of an export row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
    /// Transfers and anything else Spendee may emit. Rows of these types are not exported.
    Other(String),
}

impl From<&str> for TransactionType {
    fn from(value: &str) -> Self {
        match value {
            "Income" => TransactionType::Income,
            "Expense" => TransactionType::Expense,
            other => TransactionType::Other(other.to_string()),
        }
    }
}

/// A single value held by a [`Row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(u32),
    Amount(MonetaryAmount),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Amount(a) => write!(f, "{}", a),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(text) => s.serialize_str(text),
            Cell::Number(n) => s.serialize_u32(*n),
            Cell::Amount(a) => s.serialize_str(&a.to_string()),
        }
    }
}

/// One record keyed by column name. Updates return a new row and leave the original untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(HashMap<String, Cell>);

impl Row {
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.0.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn with(&self, column: &str, cell: Cell) -> Self {
        Self(self.0.update(column.to_string(), cell))
    }

    pub fn without(&self, column: &str) -> Self {
        Self(self.0.without(column))
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, Cell)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A parsed export: the header exactly as read plus every data row as text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTable {
    pub header: Vec<String>,
    pub rows: Vector<Row>,
}

impl InputTable {
    pub fn new(header: Vec<String>, rows: Vector<Row>) -> Self {
        Self { header, rows }
    }
}

/// A row that has been projected onto an output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow(pub Vec<Cell>);

impl OutputRow {
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTable {
    pub columns: Vec<String>,
    pub rows: Vector<OutputRow>,
}

impl OutputTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vector::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a cell of row `row` by column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.0.get(idx)
    }
}

/// Result of a transform: both ledgers plus the number of rows whose type was neither
/// income nor expense.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledgers {
    pub income: OutputTable,
    pub expenses: OutputTable,
    pub dropped: usize,
}
