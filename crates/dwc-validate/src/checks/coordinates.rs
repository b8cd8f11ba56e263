use std::collections::BTreeSet;

use dwc_linkage::MergedTable;
use dwc_model::{CheckConfig, Finding, FindingCategory, Severity, TableKind};

use super::{origin_record, parse_numeric};

pub const LATITUDE: &str = "decimalLatitude";
pub const LONGITUDE: &str = "decimalLongitude";

/// Latitude and longitude must be numeric and inside the configured bounds
/// (inclusive). Blank coordinates are left to the completeness check.
pub fn check_coordinates(config: &CheckConfig, merged: &MergedTable) -> Vec<Finding> {
    let mut findings = Vec::new();
    check_axis(config.latitude_range, LATITUDE, merged, &mut findings);
    check_axis(config.longitude_range, LONGITUDE, merged, &mut findings);
    findings
}

fn check_axis(
    (min, max): (f64, f64),
    column: &str,
    merged: &MergedTable,
    findings: &mut Vec<Finding>,
) {
    if !merged.has_column(column) {
        return;
    }
    let mut seen: BTreeSet<(TableKind, usize)> = BTreeSet::new();
    for row in merged.rows() {
        let Some(raw) = row.value(column) else {
            continue;
        };
        let record = origin_record(merged, row, column);
        if !seen.insert((record.table, record.row)) {
            continue;
        }
        match parse_numeric(raw) {
            None => findings.push(Finding {
                category: FindingCategory::Geographic,
                severity: Severity::Error,
                record: Some(record),
                column: Some(column.to_string()),
                message: format!("{column} value {raw:?} is not numeric"),
            }),
            Some(value) if value < min || value > max => findings.push(Finding {
                category: FindingCategory::Geographic,
                severity: Severity::Error,
                record: Some(record),
                column: Some(column.to_string()),
                message: format!("{column} {value} outside [{min}, {max}]"),
            }),
            Some(_) => {}
        }
    }
}
