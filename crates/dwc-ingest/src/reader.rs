use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use dwc_model::Table;

use crate::error::{LoadError, Result};

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

fn load_error(path: &Path, source: csv::Error) -> LoadError {
    let path = path.display().to_string();
    if matches!(source.kind(), csv::ErrorKind::Io(_)) {
        if let csv::ErrorKind::Io(io) = source.into_kind() {
            return LoadError::Io { path, source: io };
        }
        unreachable!("kind checked above");
    }
    LoadError::Csv { path, source }
}

/// Read one CSV source into a [`Table`].
///
/// The first record is the header row. Cells are trimmed; blank cells are
/// preserved as empty strings so downstream checks see them as null markers.
/// A data row whose cell count differs from the header count fails the load.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| load_error(path, source))?;

    let mut table: Option<Table> = None;
    for record in reader.records() {
        let record = record.map_err(|source| load_error(path, source))?;
        match table.as_mut() {
            None => {
                let columns: Vec<String> = record.iter().map(normalize_header).collect();
                table = Some(Table::new(columns));
            }
            Some(table) => {
                if record.len() != table.columns.len() {
                    let line = record.position().map(|p| p.line()).unwrap_or(0);
                    return Err(LoadError::RaggedRow {
                        path: path.display().to_string(),
                        line,
                        expected: table.columns.len(),
                        found: record.len(),
                    });
                }
                table.push_row(record.iter().map(normalize_cell).collect());
            }
        }
    }

    let table = table.ok_or_else(|| LoadError::Empty {
        path: path.display().to_string(),
    })?;
    debug!(
        path = %path.display(),
        columns = table.columns.len(),
        rows = table.row_count(),
        "loaded table"
    );
    Ok(table)
}
