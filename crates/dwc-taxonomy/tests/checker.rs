use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dwc_linkage::{MergedTable, link};
use dwc_model::{CheckConfig, Severity, Table};
use dwc_taxonomy::{AphiaRecord, NameAuthority, TaxonStatus, TaxonomyChecker, TaxonomyError};

#[derive(Clone, Default)]
struct MockAuthority {
    calls: Arc<Mutex<Vec<String>>>,
    records: Arc<BTreeMap<String, Vec<AphiaRecord>>>,
    fail_names: Arc<Vec<String>>,
    delay: Option<Duration>,
}

impl MockAuthority {
    fn with_records(records: BTreeMap<String, Vec<AphiaRecord>>) -> Self {
        Self {
            records: Arc::new(records),
            ..Self::default()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

impl NameAuthority for MockAuthority {
    fn lookup(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Vec<AphiaRecord>, TaxonomyError>> + Send {
        let mock = self.clone();
        async move {
            mock.calls.lock().expect("calls lock").push(name.clone());
            if let Some(delay) = mock.delay {
                tokio::time::sleep(delay).await;
            }
            if mock.fail_names.contains(&name) {
                return Err(TaxonomyError::Network("connection reset".to_string()));
            }
            Ok(mock.records.get(&name).cloned().unwrap_or_default())
        }
    }
}

fn accepted(name: &str) -> Vec<AphiaRecord> {
    vec![AphiaRecord {
        scientificname: Some(name.to_string()),
        status: Some("accepted".to_string()),
        valid_name: Some(name.to_string()),
        url: None,
    }]
}

fn synonym_of(valid: &str) -> Vec<AphiaRecord> {
    vec![AphiaRecord {
        scientificname: None,
        status: Some("unaccepted".to_string()),
        valid_name: Some(valid.to_string()),
        url: None,
    }]
}

/// One event, `names.len()` occurrences, `per_occurrence` emof rows each.
fn merged_with_names(names: &[&str], per_occurrence: usize) -> MergedTable {
    let mut event = Table::new(vec!["eventID".to_string()]);
    event.push_row(vec!["ev-1".to_string()]);
    let mut occurrence = Table::new(vec![
        "eventID".to_string(),
        "occurrenceID".to_string(),
        "scientificName".to_string(),
    ]);
    let mut emof = Table::new(vec!["occurrenceID".to_string(), "measurementValue".to_string()]);
    for (idx, name) in names.iter().enumerate() {
        occurrence.push_row(vec![
            "ev-1".to_string(),
            format!("occ-{idx}"),
            name.to_string(),
        ]);
        for measurement in 0..per_occurrence {
            emof.push_row(vec![format!("occ-{idx}"), measurement.to_string()]);
        }
    }
    let (merged, report) = link(&event, &occurrence, &emof).expect("link");
    assert!(report.findings.is_empty());
    merged
}

fn config() -> CheckConfig {
    CheckConfig {
        lookup_timeout: Duration::from_secs(5),
        lookup_concurrency: 4,
        ..CheckConfig::default()
    }
}

#[tokio::test]
async fn one_lookup_per_distinct_name_regardless_of_row_count() {
    // 100 merged rows, all sharing one scientific name.
    let names: Vec<&str> = vec!["Abra alba"; 100];
    let merged = merged_with_names(&names, 1);
    let authority =
        MockAuthority::with_records(BTreeMap::from([("Abra alba".to_string(), accepted("Abra alba"))]));

    let mut checker = TaxonomyChecker::new(&config());
    let distinct = TaxonomyChecker::distinct_names(&merged);
    assert_eq!(distinct.len(), 1);
    checker.check_names(&authority, distinct).await;

    assert_eq!(authority.call_count(), 1);
    assert_eq!(
        checker.cache().get("Abra alba"),
        Some(&TaxonStatus::Accepted)
    );
}

#[tokio::test]
async fn cached_names_are_not_looked_up_again() {
    let authority =
        MockAuthority::with_records(BTreeMap::from([("Abra alba".to_string(), accepted("Abra alba"))]));
    let mut checker = TaxonomyChecker::new(&config());
    checker
        .check_names(&authority, vec!["Abra alba".to_string()])
        .await;
    checker
        .check_names(&authority, vec!["Abra alba".to_string(), " Abra alba ".to_string()])
        .await;
    // Second round added nothing: the trimmed name was already cached.
    assert_eq!(authority.call_count(), 1);
}

#[tokio::test]
async fn statuses_map_to_row_ordered_findings() {
    let merged = merged_with_names(&["Abra alba", "Magelona papillicornis", "Nonexistus fictus"], 1);
    let authority = MockAuthority::with_records(BTreeMap::from([
        ("Abra alba".to_string(), accepted("Abra alba")),
        (
            "Magelona papillicornis".to_string(),
            synonym_of("Magelona johnstoni"),
        ),
        // "Nonexistus fictus" has no entry: empty response, not found.
    ]));

    let mut checker = TaxonomyChecker::new(&config());
    checker
        .check_names(&authority, TaxonomyChecker::distinct_names(&merged))
        .await;
    let findings = checker.findings_for(&merged);

    assert_eq!(findings.len(), 2);
    // Findings follow row order, not lookup completion order.
    assert_eq!(findings[0].record.as_ref().unwrap().row, 1);
    assert!(findings[0].message.contains("unaccepted"));
    assert!(findings[0].message.contains("Magelona johnstoni"));
    assert_eq!(findings[1].record.as_ref().unwrap().row, 2);
    assert!(findings[1].message.contains("not found"));
    assert!(findings.iter().all(|f| f.severity == Severity::Error));
}

#[tokio::test]
async fn lookup_failure_is_a_warning_and_other_names_still_resolve() {
    let merged = merged_with_names(&["Abra alba", "Mya arenaria"], 1);
    let authority = MockAuthority {
        records: Arc::new(BTreeMap::from([(
            "Abra alba".to_string(),
            accepted("Abra alba"),
        )])),
        fail_names: Arc::new(vec!["Mya arenaria".to_string()]),
        ..MockAuthority::default()
    };

    let mut checker = TaxonomyChecker::new(&config());
    checker
        .check_names(&authority, TaxonomyChecker::distinct_names(&merged))
        .await;

    assert_eq!(checker.cache().get("Abra alba"), Some(&TaxonStatus::Accepted));
    assert!(matches!(
        checker.cache().get("Mya arenaria"),
        Some(TaxonStatus::LookupError { .. })
    ));
    let findings = checker.findings_for(&merged);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Warning);
    assert!(findings[0].message.contains("lookup failed"));
}

#[tokio::test]
async fn slow_lookups_time_out_into_lookup_error() {
    let authority = MockAuthority {
        records: Arc::new(BTreeMap::from([(
            "Abra alba".to_string(),
            accepted("Abra alba"),
        )])),
        delay: Some(Duration::from_millis(200)),
        ..MockAuthority::default()
    };
    let mut checker = TaxonomyChecker::new(&CheckConfig {
        lookup_timeout: Duration::from_millis(10),
        ..CheckConfig::default()
    });
    checker
        .check_names(&authority, vec!["Abra alba".to_string()])
        .await;
    assert!(matches!(
        checker.cache().get("Abra alba"),
        Some(TaxonStatus::LookupError { .. })
    ));
}

#[tokio::test]
async fn fan_out_rows_produce_one_finding_per_occurrence() {
    // Two emof rows per occurrence: the taxonomy finding still anchors to
    // the occurrence row once.
    let merged = merged_with_names(&["Nonexistus fictus"], 2);
    let authority = MockAuthority::default();
    let mut checker = TaxonomyChecker::new(&config());
    checker
        .check_names(&authority, TaxonomyChecker::distinct_names(&merged))
        .await;
    let findings = checker.findings_for(&merged);
    assert_eq!(merged.len(), 2);
    assert_eq!(findings.len(), 1);
}
