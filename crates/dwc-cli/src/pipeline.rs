//! The validation pipeline with explicit stages.
//!
//! 1. **Load**: read the three CSV inputs into tables
//! 2. **Link**: join event -> occurrence -> emof with integrity checks
//! 3. **Rules**: run the four compliance checks over the merged table
//! 4. **Taxonomy**: resolve scientific names against WoRMS (optional)
//!
//! Load failures and cardinality violations abort; everything else lands in
//! the report so a single run surfaces all issues at once.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use dwc_ingest::read_table;
use dwc_linkage::link;
use dwc_model::{CheckConfig, RunReport};
use dwc_taxonomy::{NameAuthority, TaxonomyChecker, WormsClient};
use dwc_validate::RuleValidator;

use crate::types::InputPaths;

pub fn run(paths: &InputPaths, config: &CheckConfig, skip_taxonomy: bool) -> Result<RunReport> {
    let span = info_span!("check");
    let _guard = span.enter();
    let mut report = RunReport::default();

    // Stage 1: load.
    let event = read_table(&paths.event).context("load event table")?;
    let occurrence = read_table(&paths.occurrence).context("load occurrence table")?;
    let emof = read_table(&paths.emof).context("load emof table")?;
    report.summary.event_rows = event.row_count();
    report.summary.occurrence_rows = occurrence.row_count();
    report.summary.emof_rows = emof.row_count();
    info!(
        event_rows = event.row_count(),
        occurrence_rows = occurrence.row_count(),
        emof_rows = emof.row_count(),
        "tables loaded"
    );

    // Stage 2: link. A cardinality violation means no trustworthy merge.
    let (merged, linkage) = link(&event, &occurrence, &emof).context("link tables")?;
    report.summary.merged_rows = merged.len();
    report.extend(linkage.findings);
    info!(merged_rows = merged.len(), "tables linked");

    // Stage 3: rules.
    report.extend(RuleValidator::new(config).validate(&merged));

    // Stage 4: taxonomy. The only stage that talks to the network; it gets
    // its own runtime so the rest of the pipeline stays synchronous.
    if !skip_taxonomy {
        let client = WormsClient::new(config.lookup_timeout).context("create WoRMS client")?;
        report.extend(resolve_taxonomy(&client, config, &merged)?);
    }

    info!(
        findings = report.findings.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "check complete"
    );
    Ok(report)
}

fn resolve_taxonomy<A: NameAuthority>(
    authority: &A,
    config: &CheckConfig,
    merged: &dwc_linkage::MergedTable,
) -> Result<Vec<dwc_model::Finding>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build lookup runtime")?;
    let mut checker = TaxonomyChecker::new(config);
    let names = TaxonomyChecker::distinct_names(merged);
    info!(names = names.len(), "verifying scientific names");
    runtime.block_on(checker.check_names(authority, names));
    Ok(checker.findings_for(merged))
}
