pub mod checks;

use tracing::debug;

use dwc_linkage::MergedTable;
use dwc_model::{CheckConfig, Finding};

pub use checks::{check_completeness, check_coordinates, check_depth, check_required_columns};

/// Runs the four independent compliance checks over the merged table.
///
/// The checks are order-insensitive and never short-circuit each other;
/// the validator holds no state between runs, so validating the same table
/// twice produces identical findings.
#[derive(Debug)]
pub struct RuleValidator<'a> {
    config: &'a CheckConfig,
}

impl<'a> RuleValidator<'a> {
    pub fn new(config: &'a CheckConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, merged: &MergedTable) -> Vec<Finding> {
        let mut findings = Vec::new();
        findings.extend(check_required_columns(self.config, merged));
        findings.extend(check_completeness(self.config, merged));
        findings.extend(check_coordinates(self.config, merged));
        findings.extend(check_depth(merged));
        debug!(count = findings.len(), "rule validation complete");
        findings
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use dwc_linkage::{MergedTable, link};
    use dwc_model::Table;

    /// Build a merged table from per-column occurrence values, one emof row
    /// per occurrence. All value slices must be the same length.
    pub fn merged_table(occurrence_columns: &[(&str, &[&str])]) -> MergedTable {
        merged_table_full(occurrence_columns, &[])
    }

    pub fn merged_table_full(
        occurrence_columns: &[(&str, &[&str])],
        emof_columns: &[(&str, &[&str])],
    ) -> MergedTable {
        let rows = occurrence_columns
            .iter()
            .chain(emof_columns)
            .map(|(_, values)| values.len())
            .max()
            .unwrap_or(0);
        for (name, values) in occurrence_columns.iter().chain(emof_columns) {
            assert_eq!(values.len(), rows, "uneven column {name}");
        }

        let mut event = Table::new(vec!["eventID".to_string(), "eventDate".to_string()]);
        event.push_row(vec!["ev-1".to_string(), "2023-04-01".to_string()]);

        let mut columns = vec!["eventID".to_string(), "occurrenceID".to_string()];
        columns.extend(occurrence_columns.iter().map(|(name, _)| name.to_string()));
        let mut occurrence = Table::new(columns);
        for row in 0..rows {
            let mut cells = vec!["ev-1".to_string(), format!("occ-{row}")];
            cells.extend(
                occurrence_columns
                    .iter()
                    .map(|(_, values)| values[row].to_string()),
            );
            occurrence.push_row(cells);
        }

        let mut columns = vec!["occurrenceID".to_string()];
        columns.extend(emof_columns.iter().map(|(name, _)| name.to_string()));
        let mut emof = Table::new(columns);
        for row in 0..rows {
            let mut cells = vec![format!("occ-{row}")];
            cells.extend(emof_columns.iter().map(|(_, values)| values[row].to_string()));
            emof.push_row(cells);
        }

        let (merged, report) = link(&event, &occurrence, &emof).expect("link test tables");
        assert!(report.findings.is_empty(), "test tables must link cleanly");
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::merged_table;

    #[test]
    fn validating_twice_produces_identical_findings() {
        let merged = merged_table(&[
            ("scientificName", &["Abra alba", ""]),
            ("decimalLatitude", &["95", "52.1"]),
            ("decimalLongitude", &["4.5", "bad"]),
            ("minimumDepthInMeters", &["30", "5"]),
            ("maximumDepthInMeters", &["10", "20"]),
        ]);
        let config = CheckConfig::default();
        let validator = RuleValidator::new(&config);
        let first = validator.validate(&merged);
        let second = validator.validate(&merged);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn checks_do_not_short_circuit_each_other() {
        // Every category at once: missing columns, a null critical cell,
        // a bad coordinate, and inverted depths.
        let merged = merged_table(&[
            ("scientificName", &[""]),
            ("decimalLatitude", &["95"]),
            ("decimalLongitude", &["4.5"]),
            ("minimumDepthInMeters", &["30"]),
            ("maximumDepthInMeters", &["10"]),
        ]);
        let config = CheckConfig::default();
        let findings = RuleValidator::new(&config).validate(&merged);
        use dwc_model::FindingCategory;
        for category in [
            FindingCategory::Schema,
            FindingCategory::Completeness,
            FindingCategory::Geographic,
            FindingCategory::Depth,
        ] {
            assert!(
                findings.iter().any(|finding| finding.category == category),
                "expected a {category} finding"
            );
        }
    }
}
