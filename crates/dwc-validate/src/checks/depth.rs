use std::collections::BTreeSet;

use dwc_linkage::MergedTable;
use dwc_model::{Finding, FindingCategory, Severity, TableKind};

use super::{origin_record, parse_numeric};

pub const MIN_DEPTH: &str = "minimumDepthInMeters";
pub const MAX_DEPTH: &str = "maximumDepthInMeters";

/// For rows carrying both depth values: each must be numeric, and the
/// minimum must not exceed the maximum. Equal depths are valid.
pub fn check_depth(merged: &MergedTable) -> Vec<Finding> {
    let mut findings = Vec::new();
    if !merged.has_column(MIN_DEPTH) || !merged.has_column(MAX_DEPTH) {
        return findings;
    }
    let mut seen: BTreeSet<(TableKind, usize)> = BTreeSet::new();
    for row in merged.rows() {
        let (Some(raw_min), Some(raw_max)) = (row.value(MIN_DEPTH), row.value(MAX_DEPTH)) else {
            continue;
        };
        let record = origin_record(merged, row, MIN_DEPTH);
        if !seen.insert((record.table, record.row)) {
            continue;
        }
        let min = parse_numeric(raw_min);
        let max = parse_numeric(raw_max);
        if min.is_none() {
            findings.push(Finding {
                category: FindingCategory::Depth,
                severity: Severity::Error,
                record: Some(record.clone()),
                column: Some(MIN_DEPTH.to_string()),
                message: format!("{MIN_DEPTH} value {raw_min:?} is not numeric"),
            });
        }
        if max.is_none() {
            findings.push(Finding {
                category: FindingCategory::Depth,
                severity: Severity::Error,
                record: Some(record.clone()),
                column: Some(MAX_DEPTH.to_string()),
                message: format!("{MAX_DEPTH} value {raw_max:?} is not numeric"),
            });
        }
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            findings.push(Finding {
                category: FindingCategory::Depth,
                severity: Severity::Error,
                record: Some(record),
                column: Some(MIN_DEPTH.to_string()),
                message: format!("{MIN_DEPTH} {min} exceeds {MAX_DEPTH} {max}"),
            });
        }
    }
    findings
}
