use std::collections::{BTreeMap, BTreeSet};

use dwc_model::{RecordRef, TableKind};

/// One row of the join product: the union of an event row, an occurrence row,
/// and an emof row, plus the source row indices it was assembled from.
#[derive(Debug, Clone)]
pub struct MergedRow {
    pub event_row: usize,
    pub occurrence_row: usize,
    pub emof_row: usize,
    pub event_id: String,
    pub occurrence_id: String,
    cells: BTreeMap<String, String>,
}

impl MergedRow {
    pub(crate) fn new(
        event_row: usize,
        occurrence_row: usize,
        emof_row: usize,
        event_id: String,
        occurrence_id: String,
        cells: BTreeMap<String, String>,
    ) -> Self {
        Self {
            event_row,
            occurrence_row,
            emof_row,
            event_id,
            occurrence_id,
            cells,
        }
    }

    /// Cell value for `column`, with blank treated as null.
    pub fn value(&self, column: &str) -> Option<&str> {
        let cell = self.cells.get(column)?.trim();
        if cell.is_empty() { None } else { Some(cell) }
    }

    /// A reference to the source row of this merged row in the given table.
    pub fn record_for(&self, table: TableKind) -> RecordRef {
        match table {
            TableKind::Event => RecordRef {
                table,
                row: self.event_row,
                id: Some(self.event_id.clone()),
            },
            TableKind::Occurrence => RecordRef {
                table,
                row: self.occurrence_row,
                id: Some(self.occurrence_id.clone()),
            },
            TableKind::Emof => RecordRef {
                table,
                row: self.emof_row,
                id: Some(self.occurrence_id.clone()),
            },
        }
    }
}

/// The join product. One row per emof row that resolved to exactly one
/// occurrence and one event; exposed read-only to the validators.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    /// Union of the three source header sets, first-seen order.
    pub columns: Vec<String>,
    rows: Vec<MergedRow>,
    event_columns: BTreeSet<String>,
    occurrence_columns: BTreeSet<String>,
    emof_columns: BTreeSet<String>,
}

impl MergedTable {
    pub(crate) fn new(
        event_columns: &[String],
        occurrence_columns: &[String],
        emof_columns: &[String],
    ) -> Self {
        let mut columns = Vec::new();
        let mut seen = BTreeSet::new();
        for column in event_columns
            .iter()
            .chain(occurrence_columns)
            .chain(emof_columns)
        {
            if seen.insert(column.clone()) {
                columns.push(column.clone());
            }
        }
        Self {
            columns,
            rows: Vec::new(),
            event_columns: event_columns.iter().cloned().collect(),
            occurrence_columns: occurrence_columns.iter().cloned().collect(),
            emof_columns: emof_columns.iter().cloned().collect(),
        }
    }

    pub(crate) fn push_row(&mut self, row: MergedRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// The most specific source table carrying `column` (emof over occurrence
    /// over event). Row-scoped findings anchor to that table's row.
    pub fn origin_of(&self, column: &str) -> Option<TableKind> {
        if self.emof_columns.contains(column) {
            Some(TableKind::Emof)
        } else if self.occurrence_columns.contains(column) {
            Some(TableKind::Occurrence)
        } else if self.event_columns.contains(column) {
            Some(TableKind::Event)
        } else {
            None
        }
    }
}
