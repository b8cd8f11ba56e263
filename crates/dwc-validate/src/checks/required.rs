use dwc_linkage::MergedTable;
use dwc_model::{CheckConfig, Finding, FindingCategory, Severity};

/// Every configured required column must be present in the merged schema.
/// One finding per missing column, column-scoped, never per-row.
pub fn check_required_columns(config: &CheckConfig, merged: &MergedTable) -> Vec<Finding> {
    let mut findings = Vec::new();
    for column in &config.required_columns {
        if !merged.has_column(column) {
            findings.push(Finding {
                category: FindingCategory::Schema,
                severity: Severity::Error,
                record: None,
                column: Some(column.clone()),
                message: format!("missing required column: {column}"),
            });
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::merged_table;

    #[test]
    fn reports_each_missing_column_once() {
        let merged = merged_table(&[("scientificName", &["Abra alba", "Abra alba"])]);
        let mut config = CheckConfig::default();
        config.required_columns = ["scientificName", "basisOfRecord", "occurrenceStatus"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let findings = check_required_columns(&config, &merged);
        assert_eq!(findings.len(), 2);
        // One per column, not per row.
        let columns: Vec<_> = findings
            .iter()
            .map(|finding| finding.column.as_deref().unwrap())
            .collect();
        assert_eq!(columns, vec!["basisOfRecord", "occurrenceStatus"]);
        assert!(findings.iter().all(|finding| finding.record.is_none()));
    }

    #[test]
    fn complete_schema_yields_nothing() {
        let merged = merged_table(&[("scientificName", &["Abra alba"])]);
        let mut config = CheckConfig::default();
        config.required_columns = ["eventID", "occurrenceID", "scientificName"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(check_required_columns(&config, &merged).is_empty());
    }
}
