use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::Table;

use dwc_model::{CheckConfig, DEFAULT_CRITICAL_COLUMNS, DEFAULT_REQUIRED_COLUMNS};

use crate::cli::CheckArgs;
use crate::pipeline;
use crate::report::write_report_json;
use crate::summary::apply_table_style;
use crate::types::{CheckResult, InputPaths};

const EVENT_FILE: &str = "event_bd.csv";
const OCCURRENCE_FILE: &str = "occurrence_bd.csv";
const EMOF_FILE: &str = "emof_bd.csv";

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let config = build_config(args)?;
    let paths = resolve_paths(args);
    let report = pipeline::run(&paths, &config, args.no_taxonomy)?;
    let report_json = match &args.report_json {
        Some(path) => Some(write_report_json(path, &report).context("write JSON report")?),
        None => None,
    };
    Ok(CheckResult {
        paths,
        report,
        taxonomy_checked: !args.no_taxonomy,
        report_json,
    })
}

pub fn run_columns() {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Required", "Critical"]);
    apply_table_style(&mut table);
    for column in DEFAULT_REQUIRED_COLUMNS {
        let critical = if DEFAULT_CRITICAL_COLUMNS.contains(column) {
            "yes"
        } else {
            "-"
        };
        table.add_row(vec![*column, "yes", critical]);
    }
    println!("{table}");
}

fn build_config(args: &CheckArgs) -> Result<CheckConfig> {
    let mut config = CheckConfig::default();
    if let Some(path) = &args.config {
        config.apply_file(path).context("load config file")?;
    }
    if let Some(secs) = args.lookup_timeout_secs {
        config.lookup_timeout = Duration::from_secs(secs);
    }
    if let Some(concurrency) = args.lookup_concurrency {
        config.lookup_concurrency = concurrency.max(1);
    }
    Ok(config)
}

fn resolve_paths(args: &CheckArgs) -> InputPaths {
    InputPaths {
        event: args
            .event
            .clone()
            .unwrap_or_else(|| args.data_dir.join(EVENT_FILE)),
        occurrence: args
            .occurrence
            .clone()
            .unwrap_or_else(|| args.data_dir.join(OCCURRENCE_FILE)),
        emof: args
            .emof
            .clone()
            .unwrap_or_else(|| args.data_dir.join(EMOF_FILE)),
    }
}
