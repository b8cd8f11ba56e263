use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies which of the three Darwin Core input tables a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Event,
    Occurrence,
    Emof,
}

impl TableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Event => "event",
            TableKind::Occurrence => "occurrence",
            TableKind::Emof => "emof",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to one row of a source table, used to anchor findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub table: TableKind,
    /// Zero-based data row index within the source table.
    pub row: usize,
    /// The eventID / occurrenceID of the row, when one was present.
    pub id: Option<String>,
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} row {} ({id})", self.table, self.row),
            None => write!(f, "{} row {}", self.table, self.row),
        }
    }
}

/// An in-memory tabular input.
///
/// Rows hold raw cell text; a cell that is blank after trimming is the null
/// marker. The loader guarantees every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Returns the cell at (`row`, `column`), or `None` when the column is
    /// absent, the row is out of range, or the cell is blank.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        let cell = self.rows.get(row)?.get(idx)?.trim();
        if cell.is_empty() { None } else { Some(cell) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["eventID".to_string(), "countryCode".to_string()]);
        table.push_row(vec!["ev-1".to_string(), "NL".to_string()]);
        table.push_row(vec!["ev-2".to_string(), "  ".to_string()]);
        table
    }

    #[test]
    fn value_trims_and_treats_blank_as_null() {
        let table = sample();
        assert_eq!(table.value(0, "countryCode"), Some("NL"));
        assert_eq!(table.value(1, "countryCode"), None);
        assert_eq!(table.value(0, "decimalLatitude"), None);
        assert_eq!(table.value(9, "eventID"), None);
    }

    #[test]
    fn record_ref_display_includes_id_when_present() {
        let anchored = RecordRef {
            table: TableKind::Occurrence,
            row: 3,
            id: Some("occ-4".to_string()),
        };
        assert_eq!(anchored.to_string(), "occurrence row 3 (occ-4)");
        let bare = RecordRef {
            table: TableKind::Emof,
            row: 0,
            id: None,
        };
        assert_eq!(bare.to_string(), "emof row 0");
    }
}
