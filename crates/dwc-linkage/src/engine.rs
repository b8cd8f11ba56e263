use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use dwc_model::{Finding, FindingCategory, RecordRef, Severity, Table, TableKind};

use crate::merged::{MergedRow, MergedTable};

pub const EVENT_KEY: &str = "eventID";
pub const OCCURRENCE_KEY: &str = "occurrenceID";

/// Which side of a join carries the violated uniqueness precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinSide {
    Event,
    Occurrence,
}

impl fmt::Display for JoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinSide::Event => f.write_str("event"),
            JoinSide::Occurrence => f.write_str("occurrence"),
        }
    }
}

/// Fatal join failures. Either makes the affected merge stage meaningless,
/// so no merged rows are produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CardinalityError {
    #[error("{table} table has no {key} column, cannot join")]
    MissingKeyColumn { table: TableKind, key: &'static str },

    #[error(
        "one-to-many violated on {side} side: {key} value {value:?} appears {count} times, must be unique"
    )]
    DuplicateKey {
        side: JoinSide,
        key: &'static str,
        value: String,
        count: usize,
    },
}

/// What the linkage observed besides the merged rows themselves.
#[derive(Debug, Clone, Default)]
pub struct LinkageReport {
    pub findings: Vec<Finding>,
    /// Occurrence rows excluded in step 1 (blank or unknown eventID).
    pub unmatched_occurrences: usize,
    /// Emof rows excluded in step 2 (blank or unknown occurrenceID).
    pub unmatched_emof: usize,
}

fn unmatched_finding(
    table: TableKind,
    row: usize,
    key: &str,
    id: Option<&str>,
    message: String,
) -> Finding {
    Finding {
        category: FindingCategory::Schema,
        severity: Severity::Error,
        record: Some(RecordRef {
            table,
            row,
            id: id.map(ToString::to_string),
        }),
        column: Some(key.to_string()),
        message,
    }
}

/// Index a key column: key value -> row indices carrying it.
///
/// Rows with a blank key are left out; they can never be referenced and are
/// reported by the callers that care (join steps, completeness check).
fn build_key_index(table: &Table, key: &str) -> BTreeMap<String, Vec<usize>> {
    let mut index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for row in 0..table.row_count() {
        if let Some(value) = table.value(row, key) {
            index.entry(value.to_string()).or_default().push(row);
        }
    }
    index
}

fn require_unique(
    index: &BTreeMap<String, Vec<usize>>,
    side: JoinSide,
    key: &'static str,
) -> Result<(), CardinalityError> {
    for (value, rows) in index {
        if rows.len() > 1 {
            return Err(CardinalityError::DuplicateKey {
                side,
                key,
                value: value.clone(),
                count: rows.len(),
            });
        }
    }
    Ok(())
}

/// Merge one source row into `cells`: a column not yet present is always
/// written; a non-blank value overwrites whatever an earlier (less specific)
/// table wrote; a blank never clobbers an existing value.
fn merge_cells(cells: &mut BTreeMap<String, String>, table: &Table, row: usize) {
    for (idx, column) in table.columns.iter().enumerate() {
        let Some(value) = table.rows[row].get(idx).cloned() else {
            continue;
        };
        match cells.get(column) {
            None => {
                cells.insert(column.clone(), value);
            }
            Some(_) if !value.trim().is_empty() => {
                cells.insert(column.clone(), value);
            }
            Some(_) => {}
        }
    }
}

/// Join the three tables: event -> occurrence on `eventID`, then the result
/// -> emof on `occurrenceID`, with a row-count conservation check.
///
/// Uniqueness of the join key on the "one" side is a precondition checked
/// before any merging, so a violation is attributed to the offending table
/// instead of surfacing as a bare count mismatch afterwards. Unmatched rows
/// on the "many" side are reported as schema findings and excluded, never
/// silently dropped.
pub fn link(
    event: &Table,
    occurrence: &Table,
    emof: &Table,
) -> Result<(MergedTable, LinkageReport), CardinalityError> {
    for (table, kind, key) in [
        (event, TableKind::Event, EVENT_KEY),
        (occurrence, TableKind::Occurrence, EVENT_KEY),
        (occurrence, TableKind::Occurrence, OCCURRENCE_KEY),
        (emof, TableKind::Emof, OCCURRENCE_KEY),
    ] {
        if !table.has_column(key) {
            return Err(CardinalityError::MissingKeyColumn { table: kind, key });
        }
    }

    let mut report = LinkageReport::default();

    // Step 1: event -> occurrence on eventID.
    let event_index = build_key_index(event, EVENT_KEY);
    require_unique(&event_index, JoinSide::Event, EVENT_KEY)?;

    let mut paired: Vec<(usize, usize)> = Vec::new();
    for occ_row in 0..occurrence.row_count() {
        match occurrence.value(occ_row, EVENT_KEY) {
            None => {
                report.unmatched_occurrences += 1;
                report.findings.push(unmatched_finding(
                    TableKind::Occurrence,
                    occ_row,
                    EVENT_KEY,
                    occurrence.value(occ_row, OCCURRENCE_KEY),
                    format!("occurrence row {occ_row} has no eventID, excluded from join"),
                ));
            }
            Some(event_id) => match event_index.get(event_id) {
                Some(rows) => paired.push((occ_row, rows[0])),
                None => {
                    report.unmatched_occurrences += 1;
                    report.findings.push(unmatched_finding(
                        TableKind::Occurrence,
                        occ_row,
                        EVENT_KEY,
                        Some(event_id),
                        format!(
                            "occurrence row {occ_row} references unknown eventID {event_id:?}, excluded from join"
                        ),
                    ));
                }
            },
        }
    }

    // Step 2 precondition: occurrenceID unique across the surviving set.
    let mut occurrence_index: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for &(occ_row, event_row) in &paired {
        if let Some(occurrence_id) = occurrence.value(occ_row, OCCURRENCE_KEY) {
            if let Some((first_row, _)) = occurrence_index.get(occurrence_id) {
                let count = paired
                    .iter()
                    .filter(|&&(row, _)| occurrence.value(row, OCCURRENCE_KEY) == Some(occurrence_id))
                    .count();
                debug!(first_row, occ_row, "duplicate occurrenceID");
                return Err(CardinalityError::DuplicateKey {
                    side: JoinSide::Occurrence,
                    key: OCCURRENCE_KEY,
                    value: occurrence_id.to_string(),
                    count,
                });
            }
            occurrence_index.insert(occurrence_id.to_string(), (occ_row, event_row));
        }
    }

    // Step 2: (event + occurrence) -> emof on occurrenceID.
    let mut merged = MergedTable::new(&event.columns, &occurrence.columns, &emof.columns);
    for emof_row in 0..emof.row_count() {
        match emof.value(emof_row, OCCURRENCE_KEY) {
            None => {
                report.unmatched_emof += 1;
                report.findings.push(unmatched_finding(
                    TableKind::Emof,
                    emof_row,
                    OCCURRENCE_KEY,
                    None,
                    format!("emof row {emof_row} has no occurrenceID, excluded from join"),
                ));
            }
            Some(occurrence_id) => match occurrence_index.get(occurrence_id) {
                Some(&(occ_row, event_row)) => {
                    let mut cells = BTreeMap::new();
                    merge_cells(&mut cells, event, event_row);
                    merge_cells(&mut cells, occurrence, occ_row);
                    merge_cells(&mut cells, emof, emof_row);
                    let event_id = event
                        .value(event_row, EVENT_KEY)
                        .unwrap_or_default()
                        .to_string();
                    merged.push_row(MergedRow::new(
                        event_row,
                        occ_row,
                        emof_row,
                        event_id,
                        occurrence_id.to_string(),
                        cells,
                    ));
                }
                None => {
                    report.unmatched_emof += 1;
                    report.findings.push(unmatched_finding(
                        TableKind::Emof,
                        emof_row,
                        OCCURRENCE_KEY,
                        Some(occurrence_id),
                        format!(
                            "emof row {emof_row} references unknown occurrenceID {occurrence_id:?}, excluded from join"
                        ),
                    ));
                }
            },
        }
    }

    // Step 3: conservation. Derived from the unmatched findings above, kept
    // as an explicit cross-check on the whole arrangement.
    if merged.len() != emof.row_count() {
        warn!(
            expected = emof.row_count(),
            got = merged.len(),
            "merged row count does not conserve emof rows"
        );
        report.findings.push(Finding {
            category: FindingCategory::Schema,
            severity: Severity::Error,
            record: None,
            column: None,
            message: format!(
                "row count mismatch: expected {}, got {}",
                emof.row_count(),
                merged.len()
            ),
        });
    }

    debug!(
        merged = merged.len(),
        unmatched_occurrences = report.unmatched_occurrences,
        unmatched_emof = report.unmatched_emof,
        "linkage complete"
    );
    Ok((merged, report))
}
