use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::RecordRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingCategory {
    Schema,
    Completeness,
    Geographic,
    Depth,
    Taxonomy,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FindingCategory::Schema => "schema",
            FindingCategory::Completeness => "completeness",
            FindingCategory::Geographic => "geographic",
            FindingCategory::Depth => "depth",
            FindingCategory::Taxonomy => "taxonomy",
        };
        f.write_str(label)
    }
}

/// One compliance issue. Immutable once produced; the report only appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub severity: Severity,
    /// The affected record, when the issue is row-scoped.
    pub record: Option<RecordRef>,
    /// The affected column, when the issue is column-scoped.
    pub column: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableKind;

    #[test]
    fn finding_serializes_with_lowercase_tags() {
        let finding = Finding {
            category: FindingCategory::Geographic,
            severity: Severity::Error,
            record: Some(RecordRef {
                table: TableKind::Occurrence,
                row: 2,
                id: Some("occ-3".to_string()),
            }),
            column: Some("decimalLatitude".to_string()),
            message: "decimalLatitude 95 outside [-90, 90]".to_string(),
        };
        let json = serde_json::to_value(&finding).expect("serialize finding");
        assert_eq!(json["category"], "geographic");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["record"]["table"], "occurrence");
    }
}
