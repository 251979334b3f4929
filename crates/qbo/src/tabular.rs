//! CSV input for the statement serializer.
//!
//! Rows are read with a header line and kept as `column name -> cell text`
//! maps, so a missing column is only an error once the serializer asks for it.
//!
//! # Format
//!
//! ```csv
//! Date,Description,Amount,Memo
//! 01/15/2024,Coffee Shop,-4.50,Morning
//! 01/16/2024,Payroll,"2,500.00",
//! ```
//!
//! # Example
//!
//! ```
//! use qbo::tabular::read_rows;
//!
//! let csv = "Date,Description,Amount\n01/15/2024,Coffee Shop,-4.50\n";
//! let rows = read_rows(csv.as_bytes()).unwrap();
//! assert_eq!(rows[0].get("Amount"), Some("-4.50"));
//! assert_eq!(rows[0].get("Memo"), None);
//! ```

use std::{collections::HashMap, io::Read};

use tracing::debug;

use crate::error::StatementResult;

/// Required column with the `MM/DD/YYYY` posting date.
pub const DATE_COLUMN: &str = "Date";
/// Required column with the payee / description.
pub const DESCRIPTION_COLUMN: &str = "Description";
/// Required column with the signed amount (commas allowed).
pub const AMOUNT_COLUMN: &str = "Amount";
/// Optional memo column.
pub const MEMO_COLUMN: &str = "Memo";

/// One data row of the CSV input, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularRow {
    cells: HashMap<String, String>,
}

impl TabularRow {
    /// Builds a row from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self { cells: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Returns the cell for `column`, or `None` if the row has no such column.
    ///
    /// Column names are matched exactly. An empty cell is `Some("")`.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Reads every row of a CSV document with a header line.
///
/// Short rows are accepted; their trailing columns are simply absent.
/// Blank lines are skipped.
pub fn read_rows<R: Read>(reader: R) -> StatementResult<Vec<TabularRow>> {
    let mut csv_reader =
        ::csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| (column.to_string(), cell.to_string()))
            .collect();
        rows.push(TabularRow { cells });
    }

    debug!(rows = rows.len(), columns = headers.len(), "read tabular rows");
    Ok(rows)
}
