use std::collections::BTreeSet;

use dwc_linkage::MergedTable;
use dwc_model::{CheckConfig, Finding, FindingCategory, Severity, TableKind};

use super::origin_record;

/// Every configured critical column must be non-null in every row. One
/// finding per blank source cell, referencing the row and column.
pub fn check_completeness(config: &CheckConfig, merged: &MergedTable) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen: BTreeSet<(TableKind, usize, &str)> = BTreeSet::new();
    for column in &config.critical_columns {
        if !merged.has_column(column) {
            // Presence is the required-columns check's concern.
            continue;
        }
        for row in merged.rows() {
            if row.value(column).is_some() {
                continue;
            }
            let record = origin_record(merged, row, column);
            if !seen.insert((record.table, record.row, column.as_str())) {
                continue;
            }
            findings.push(Finding {
                category: FindingCategory::Completeness,
                severity: Severity::Error,
                record: Some(record),
                column: Some(column.clone()),
                message: format!("critical column {column} is null"),
            });
        }
    }
    findings
}
