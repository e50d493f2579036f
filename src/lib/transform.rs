use chrono::{DateTime, Datelike, NaiveDate};
use im::{OrdMap, Vector};
use tracing::{debug, info, trace, warn};

use crate::config::{
    TransformerConfig, AMOUNT_COLUMN, DATE_COLUMN, DAY_COLUMN, MONTH_COLUMN, PRUNED_COLUMNS,
    TYPE_COLUMN,
};
use crate::error::{LedgerError, Result};
use crate::types::{
    Cell, InputTable, Ledgers, MonetaryAmount, OutputRow, OutputTable, Row, TransactionType,
};
use crate::utils::{CountImmut, PushImmut};

/// Rows split by transaction type. `dropped` counts rows of every other type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitions {
    pub income: Vector<Row>,
    pub expenses: Vector<Row>,
    pub dropped: OrdMap<String, usize>,
}

pub fn validate_header(header: &[String], expected: &[String]) -> Result<()> {
    if header == expected {
        Ok(())
    } else {
        Err(LedgerError::SchemaValidation {
            actual: header.to_vec(),
            expected: expected.to_vec(),
        })
    }
}

/// Parses a date as RFC 3339 first, then with each format in turn. Timestamps keep the
/// calendar date they were written with; no timezone conversion happens.
pub fn parse_date(value: &str, formats: &[String]) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Adds `Month` and `Day` derived from the row's `Date`. `position` is the 1-based data row,
/// used only for error reporting.
pub fn decompose_date(row: &Row, position: usize, formats: &[String]) -> Result<Row> {
    let raw = row
        .get(DATE_COLUMN)
        .map(|cell| cell.to_string())
        .unwrap_or_default();

    let date = parse_date(&raw, formats).ok_or_else(|| LedgerError::DateParse {
        row: position,
        value: raw.clone(),
    })?;
    trace!(row = position, raw = %raw, %date, "decomposed date");

    Ok(row
        .with(MONTH_COLUMN, Cell::Number(date.month()))
        .with(DAY_COLUMN, Cell::Number(date.day())))
}

/// Replaces the textual `Amount` with its decimal value.
pub fn parse_amount(row: &Row, position: usize) -> Result<Row> {
    match row.get(AMOUNT_COLUMN) {
        Some(Cell::Amount(_)) => Ok(row.clone()),
        Some(Cell::Text(raw)) => {
            let amount = raw.parse::<MonetaryAmount>().map_err(|_| LedgerError::AmountParse {
                row: position,
                value: raw.clone(),
            })?;
            Ok(row.with(AMOUNT_COLUMN, Cell::Amount(amount)))
        }
        other => Err(LedgerError::AmountParse {
            row: position,
            value: other.map(|c| c.to_string()).unwrap_or_default(),
        }),
    }
}

pub fn prune(row: &Row) -> Row {
    PRUNED_COLUMNS
        .iter()
        .fold(row.clone(), |acc, column| acc.without(column))
}

pub fn transaction_type(row: &Row) -> TransactionType {
    row.get(TYPE_COLUMN)
        .and_then(Cell::as_text)
        .map(TransactionType::from)
        .unwrap_or_else(|| TransactionType::Other(String::new()))
}

/// Stable split of `rows` into income and expenses. Rows of any other type are counted and
/// left out.
pub fn partition(rows: &Vector<Row>) -> Partitions {
    rows.iter()
        .fold(Partitions::default(), |acc, row| match transaction_type(row) {
            TransactionType::Income => Partitions {
                income: acc.income.push(row.clone()),
                ..acc
            },
            TransactionType::Expense => Partitions {
                expenses: acc.expenses.push(row.clone()),
                ..acc
            },
            TransactionType::Other(other) => Partitions {
                dropped: acc.dropped.increment(other),
                ..acc
            },
        })
}

pub fn negate(amount: MonetaryAmount) -> MonetaryAmount {
    -amount
}

/// Flips the sign of an expense row's amount.
pub fn normalize_sign(row: &Row) -> Row {
    match row.get(AMOUNT_COLUMN) {
        Some(Cell::Amount(amount)) => row.with(AMOUNT_COLUMN, Cell::Amount(negate(*amount))),
        _ => row.clone(),
    }
}

/// Selects `columns` from `row` in that order. Columns not listed are left behind.
pub fn project(row: &Row, columns: &[String]) -> Result<OutputRow> {
    columns
        .iter()
        .map(|column| {
            row.get(column)
                .cloned()
                .ok_or_else(|| LedgerError::MissingColumn {
                    column: column.clone(),
                })
        })
        .collect::<Result<Vec<Cell>>>()
        .map(OutputRow)
}

fn to_output_table(rows: &Vector<Row>, columns: &[String]) -> Result<OutputTable> {
    let rows = rows
        .iter()
        .map(|row| project(&row.without(TYPE_COLUMN), columns))
        .collect::<Result<Vector<OutputRow>>>()?;
    Ok(OutputTable {
        columns: columns.to_vec(),
        rows,
    })
}

/// Turns a Spendee export into income and expense ledgers.
///
/// The header is checked before any row is looked at. Every row then gets its date decomposed
/// and its amount parsed, regardless of type, so a malformed value anywhere fails the whole
/// transform. Expense amounts come out negated; income amounts are left as they are.
pub fn transform(table: &InputTable, config: &TransformerConfig) -> Result<Ledgers> {
    validate_header(&table.header, &config.expected_input_columns)?;
    debug!(rows = table.rows.len(), "header validated");

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let position = idx + 1;
            let row = decompose_date(row, position, &config.date_formats)?;
            let row = parse_amount(&row, position)?;
            Ok(prune(&row))
        })
        .collect::<Result<Vector<Row>>>()?;

    let partitions = partition(&rows);
    for (transaction_type, count) in partitions.dropped.iter() {
        warn!(%transaction_type, count, "skipping rows that are neither income nor expense");
    }

    let expenses: Vector<Row> = partitions.expenses.iter().map(normalize_sign).collect();

    let ledgers = Ledgers {
        income: to_output_table(&partitions.income, &config.output_column_order)?,
        expenses: to_output_table(&expenses, &config.output_column_order)?,
        dropped: partitions.dropped.values().sum(),
    };
    info!(
        income = ledgers.income.len(),
        expenses = ledgers.expenses.len(),
        dropped = ledgers.dropped,
        "transformed export"
    );
    Ok(ledgers)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;
    use im::Vector;

    use super::{negate, parse_date, partition, project, transform, validate_header};
    use crate::config::TransformerConfig;
    use crate::error::LedgerError;
    use crate::types::{Cell, InputTable, MonetaryAmount, Row};

    fn header() -> Vec<String> {
        TransformerConfig::default().expected_input_columns
    }

    fn export_row(date: &str, tx_type: &str, category: &str, amount: &str, note: &str) -> Row {
        [
            ("Date", date),
            ("Wallet", "W1"),
            ("Type", tx_type),
            ("Category name", category),
            ("Amount", amount),
            ("Currency", "USD"),
            ("Note", note),
            ("Labels", ""),
            ("Author", "me"),
        ]
        .into_iter()
        .map(|(k, v)| (k, Cell::text(v)))
        .collect()
    }

    fn table(rows: Vec<Row>) -> InputTable {
        InputTable::new(header(), rows.into_iter().collect())
    }

    fn cells(table: &crate::types::OutputTable, row: usize) -> Vec<String> {
        table.rows[row].cells().iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn expense_is_negated_and_projected() {
        let input = table(vec![export_row("2024-03-05", "Expense", "Food", "12.50", "lunch")]);

        let ledgers = transform(&input, &TransformerConfig::default()).unwrap();

        assert!(ledgers.income.is_empty());
        assert_eq!(ledgers.expenses.len(), 1);
        assert_eq!(
            ledgers.expenses.columns,
            vec!["Month", "Day", "Note", "Amount", "Category name", "Labels"]
        );
        assert_eq!(cells(&ledgers.expenses, 0), vec!["3", "5", "lunch", "-12.50", "Food", ""]);
        assert_eq!(ledgers.expenses.cell(0, "Month"), Some(&Cell::Number(3)));
    }

    #[test]
    fn income_keeps_its_sign() {
        let input = table(vec![export_row("2024-01-31", "Income", "Salary", "1000.00", "pay")]);

        let ledgers = transform(&input, &TransformerConfig::default()).unwrap();

        assert!(ledgers.expenses.is_empty());
        assert_eq!(cells(&ledgers.income, 0), vec!["1", "31", "pay", "1000.00", "Salary", ""]);
    }

    #[test]
    fn other_types_are_dropped() {
        let input = table(vec![
            export_row("2024-01-01", "Transfer", "Savings", "50", "move"),
            export_row("2024-01-02", "income", "Salary", "50", "lowercase"),
        ]);

        let ledgers = transform(&input, &TransformerConfig::default()).unwrap();

        assert!(ledgers.income.is_empty());
        assert!(ledgers.expenses.is_empty());
        assert_eq!(ledgers.dropped, 2);
    }

    #[test]
    fn partition_preserves_order() {
        let rows: Vector<Row> = vec![
            export_row("2024-01-01", "Expense", "Food", "1", "a"),
            export_row("2024-01-02", "Income", "Salary", "2", "b"),
            export_row("2024-01-03", "Transfer", "Savings", "3", "c"),
            export_row("2024-01-04", "Expense", "Rent", "4", "d"),
            export_row("2024-01-05", "Income", "Gift", "5", "e"),
        ]
        .into_iter()
        .collect();

        let partitions = partition(&rows);

        let notes = |rows: &Vector<Row>| -> Vec<String> {
            rows.iter().map(|r| r.get("Note").unwrap().to_string()).collect()
        };
        assert_eq!(notes(&partitions.expenses), vec!["a", "d"]);
        assert_eq!(notes(&partitions.income), vec!["b", "e"]);
        assert_eq!(partitions.dropped.get("Transfer"), Some(&1));
    }

    #[test]
    fn output_rows_follow_input_order() {
        let input = table(vec![
            export_row("2024-02-01", "Expense", "Food", "1.00", "first"),
            export_row("2024-02-02", "Expense", "Food", "2.00", "second"),
            export_row("2024-02-03", "Expense", "Food", "3.00", "third"),
        ]);

        let ledgers = transform(&input, &TransformerConfig::default()).unwrap();

        let notes: Vec<String> = (0..3)
            .map(|i| ledgers.expenses.cell(i, "Note").unwrap().to_string())
            .collect();
        assert_eq!(notes, vec!["first", "second", "third"]);
    }

    #[test]
    fn short_header_is_rejected_before_rows() {
        let header: Vec<String> = ["Date", "Type", "Amount"].iter().map(|s| s.to_string()).collect();
        // The row would fail date parsing if it were ever looked at.
        let input = InputTable::new(
            header.clone(),
            vec![export_row("not a date", "Expense", "Food", "1", "x")]
                .into_iter()
                .collect(),
        );

        let err = transform(&input, &TransformerConfig::default()).unwrap_err();

        match err {
            LedgerError::SchemaValidation { actual, .. } => assert_eq!(actual, header),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn header_order_and_case_matter() {
        let expected = header();

        let mut swapped = expected.clone();
        swapped.swap(0, 1);
        assert!(validate_header(&swapped, &expected).is_err());

        let mut lowercase = expected.clone();
        lowercase[0] = "date".to_string();
        assert!(validate_header(&lowercase, &expected).is_err());

        let mut extra = expected.clone();
        extra.push("Extra".to_string());
        assert!(validate_header(&extra, &expected).is_err());

        assert!(validate_header(&expected, &expected).is_ok());
    }

    #[test]
    fn malformed_date_reports_row_and_value() {
        let input = table(vec![
            export_row("2024-01-01", "Expense", "Food", "1", "ok"),
            export_row("yesterday", "Expense", "Food", "1", "bad"),
        ]);

        let err = transform(&input, &TransformerConfig::default()).unwrap_err();

        match err {
            LedgerError::DateParse { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn malformed_amount_fails_even_for_dropped_types() {
        let input = table(vec![export_row("2024-01-01", "Transfer", "Savings", "n/a", "x")]);

        let err = transform(&input, &TransformerConfig::default()).unwrap_err();

        assert!(matches!(err, LedgerError::AmountParse { row: 1, .. }));
    }

    #[test]
    fn dates_are_parsed_in_several_formats() {
        let formats = TransformerConfig::default().date_formats;
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        for raw in [
            "2024-03-05",
            "2024-03-05T23:30:00+02:00",
            "2024-03-05T23:30:00",
            "2024-03-05 23:30:00",
            "2024-03-05 23:30:00+00:00",
            "03/05/2024",
            " 2024-03-05 ",
        ] {
            assert_eq!(parse_date(raw, &formats), Some(expected), "{}", raw);
        }
        assert_eq!(parse_date("2024-02-30", &formats), None);
        assert_eq!(parse_date("", &formats), None);
    }

    #[test]
    fn projection_fails_on_unknown_column() {
        let row = export_row("2024-01-01", "Expense", "Food", "1", "x");
        let err = project(&row, &["Balance".to_string()]).unwrap_err();
        assert!(matches!(err, LedgerError::MissingColumn { column } if column == "Balance"));
    }

    #[test]
    fn projection_orders_columns() {
        let row = export_row("2024-01-01", "Expense", "Food", "1", "x");
        let columns = vec!["Note".to_string(), "Date".to_string()];
        let projected = project(&row, &columns).unwrap();
        assert_eq!(projected.cells(), &[Cell::text("x"), Cell::text("2024-01-01")]);
    }

    #[test]
    fn negate_is_its_own_inverse() {
        for raw in ["12.50", "-7", "0", "123456.789"] {
            let amount = MonetaryAmount::from_str(raw).unwrap();
            assert_eq!(negate(negate(amount)), amount);
        }
    }
}
