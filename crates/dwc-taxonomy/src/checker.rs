use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use dwc_linkage::MergedTable;
use dwc_model::{CheckConfig, Finding, FindingCategory, Severity, TableKind};

use crate::client::WormsClient;
use crate::error::{Result, TaxonomyError};
use crate::types::{AphiaRecord, TaxonStatus, classify};

pub const SCIENTIFIC_NAME: &str = "scientificName";

/// A name-validation provider. `WormsClient` is the real one; tests plug in
/// mocks. Implementations are cloned into lookup tasks.
pub trait NameAuthority: Clone + Send + Sync + 'static {
    fn lookup(&self, name: String) -> impl Future<Output = Result<Vec<AphiaRecord>>> + Send;
}

impl NameAuthority for WormsClient {
    fn lookup(&self, name: String) -> impl Future<Output = Result<Vec<AphiaRecord>>> + Send {
        let client = self.clone();
        async move { client.records_by_name(&name).await }
    }
}

/// Resolves distinct scientific names against an authority, once each, and
/// turns the resolved statuses into per-row findings.
///
/// The cache lives as long as the checker: one external call per unique
/// trimmed name regardless of how many rows carry it.
#[derive(Debug)]
pub struct TaxonomyChecker {
    cache: BTreeMap<String, TaxonStatus>,
    lookup_timeout: Duration,
    lookup_concurrency: usize,
}

impl TaxonomyChecker {
    pub fn new(config: &CheckConfig) -> Self {
        Self {
            cache: BTreeMap::new(),
            lookup_timeout: config.lookup_timeout,
            lookup_concurrency: config.lookup_concurrency.max(1),
        }
    }

    /// The distinct, non-empty scientific names across the merged rows.
    pub fn distinct_names(merged: &MergedTable) -> BTreeSet<String> {
        merged
            .rows()
            .iter()
            .filter_map(|row| row.value(SCIENTIFIC_NAME))
            .map(ToString::to_string)
            .collect()
    }

    pub fn cache(&self) -> &BTreeMap<String, TaxonStatus> {
        &self.cache
    }

    /// Resolve every name not already cached. Lookups fan out concurrently,
    /// bounded by the configured limit; each name writes its own cache slot,
    /// so completion order does not matter.
    pub async fn check_names<A: NameAuthority>(
        &mut self,
        authority: &A,
        names: impl IntoIterator<Item = String>,
    ) -> &BTreeMap<String, TaxonStatus> {
        let pending: Vec<String> = names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty() && !self.cache.contains_key(name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if pending.is_empty() {
            return &self.cache;
        }
        debug!(
            names = pending.len(),
            concurrency = self.lookup_concurrency,
            "resolving scientific names"
        );

        let semaphore = Arc::new(Semaphore::new(self.lookup_concurrency));
        let timeout = self.lookup_timeout;
        let mut tasks = JoinSet::new();
        for name in pending {
            let authority = authority.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("lookup semaphore never closes");
                let outcome = tokio::time::timeout(timeout, authority.lookup(name.clone())).await;
                let status = match outcome {
                    Ok(Ok(records)) => classify(&records),
                    Ok(Err(error)) => {
                        warn!(%name, %error, "authority lookup failed");
                        TaxonStatus::LookupError {
                            reason: error.to_string(),
                        }
                    }
                    Err(_) => {
                        let error = TaxonomyError::Timeout(timeout);
                        warn!(%name, %error, "authority lookup failed");
                        TaxonStatus::LookupError {
                            reason: error.to_string(),
                        }
                    }
                };
                (name, status)
            });
        }
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((name, status)) => {
                    self.cache.insert(name, status);
                }
                Err(error) => warn!(%error, "lookup task aborted"),
            }
        }
        &self.cache
    }

    /// Findings for every merged row whose name resolved to something other
    /// than accepted. Rows are walked in merge order and deduplicated by
    /// source occurrence row, so output is deterministic regardless of
    /// lookup completion order.
    pub fn findings_for(&self, merged: &MergedTable) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut seen: BTreeSet<usize> = BTreeSet::new();
        for row in merged.rows() {
            let Some(name) = row.value(SCIENTIFIC_NAME) else {
                continue;
            };
            let Some(status) = self.cache.get(name) else {
                continue;
            };
            if !seen.insert(row.occurrence_row) {
                continue;
            }
            let record = Some(row.record_for(TableKind::Occurrence));
            let column = Some(SCIENTIFIC_NAME.to_string());
            match status {
                TaxonStatus::Accepted => {}
                TaxonStatus::Unaccepted { accepted_name } => {
                    let mut message = format!("scientific name {name:?} is unaccepted");
                    if let Some(accepted) = accepted_name {
                        message.push_str(&format!(", accepted name: {accepted}"));
                    }
                    findings.push(Finding {
                        category: FindingCategory::Taxonomy,
                        severity: Severity::Error,
                        record,
                        column,
                        message,
                    });
                }
                TaxonStatus::NotFound => findings.push(Finding {
                    category: FindingCategory::Taxonomy,
                    severity: Severity::Error,
                    record,
                    column,
                    message: format!("scientific name {name:?} not found in the authority"),
                }),
                TaxonStatus::LookupError { reason } => findings.push(Finding {
                    category: FindingCategory::Taxonomy,
                    severity: Severity::Warning,
                    record,
                    column,
                    message: format!("lookup failed for {name:?}: {reason}"),
                }),
            }
        }
        findings
    }
}
