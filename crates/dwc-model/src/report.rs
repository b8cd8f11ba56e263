use serde::Serialize;

use crate::finding::{Finding, FindingCategory, Severity};

/// Row counts observed during a run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunSummary {
    pub event_rows: usize,
    pub occurrence_rows: usize,
    pub emof_rows: usize,
    pub merged_rows: usize,
}

/// Accumulates the findings of one pipeline run.
///
/// Findings arrive in pipeline order (linkage, rules, taxonomy) and are only
/// ever appended. Rendering is the caller's concern.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub findings: Vec<Finding>,
}

impl RunReport {
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn category_count(&self, category: FindingCategory) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.category == category)
            .count()
    }
}
