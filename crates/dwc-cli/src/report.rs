//! JSON serialization of a run report.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use dwc_model::{Finding, RunReport, RunSummary};

const REPORT_SCHEMA: &str = "dwc-check.report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    summary: &'a RunSummary,
    error_count: usize,
    warning_count: usize,
    findings: &'a [Finding],
}

pub fn write_report_json(path: &Path, report: &RunReport) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        summary: &report.summary,
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        findings: &report.findings,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(path.to_path_buf())
}
