pub mod finding;
pub mod options;
pub mod report;
pub mod table;

pub use finding::{Finding, FindingCategory, Severity};
pub use options::{
    CheckConfig, ConfigError, ConfigOverrides, DEFAULT_CRITICAL_COLUMNS, DEFAULT_REQUIRED_COLUMNS,
};
pub use report::{RunReport, RunSummary};
pub use table::{RecordRef, Table, TableKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_round_trips_through_json() {
        let mut report = RunReport::default();
        report.summary.emof_rows = 3;
        report.summary.merged_rows = 2;
        report.push(Finding {
            category: FindingCategory::Schema,
            severity: Severity::Error,
            record: Some(RecordRef {
                table: TableKind::Emof,
                row: 2,
                id: Some("occ-9".to_string()),
            }),
            column: Some("occurrenceID".to_string()),
            message: "emof row 2 references unknown occurrenceID occ-9".to_string(),
        });
        let json = serde_json::to_string(&report).expect("serialize report");
        assert!(json.contains("\"merged_rows\":2"));
        assert!(json.contains("\"category\":\"schema\""));
    }
}
