use std::path::PathBuf;

use dwc_model::RunReport;

/// Resolved locations of the three input tables.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub event: PathBuf,
    pub occurrence: PathBuf,
    pub emof: PathBuf,
}

/// Outcome of one `check` invocation.
#[derive(Debug)]
pub struct CheckResult {
    pub paths: InputPaths,
    pub report: RunReport,
    /// False when --no-taxonomy suppressed the authority stage.
    pub taxonomy_checked: bool,
    pub report_json: Option<PathBuf>,
}
