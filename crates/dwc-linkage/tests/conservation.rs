//! Property test: merged row count plus unmatched emof rows always equals
//! the emof table's row count, and every shortfall has a matching finding.

use proptest::prelude::*;

use dwc_linkage::link;
use dwc_model::Table;

fn table(columns: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new(columns.iter().map(ToString::to_string).collect());
    for row in rows {
        table.push_row(row);
    }
    table
}

/// Occurrence rows referencing a mix of known and unknown events, emof rows
/// referencing a mix of known and unknown occurrences.
fn inputs() -> impl Strategy<Value = (Table, Table, Table)> {
    let event_count = 1usize..5;
    event_count.prop_flat_map(|events| {
        let occ_refs = prop::collection::vec((0usize..events + 2, any::<bool>()), 0..8);
        occ_refs.prop_flat_map(move |occ| {
            let occ_count = occ.len();
            let emof_refs = prop::collection::vec(0usize..occ_count + 2, 0..12);
            (Just(events), Just(occ), emof_refs)
        })
    })
    .prop_map(|(events, occ, emof_refs)| {
        let event = table(
            &["eventID", "eventDate"],
            (0..events)
                .map(|idx| vec![format!("ev-{idx}"), "2023-04-01".to_string()])
                .collect(),
        );
        let occurrence = table(
            &["eventID", "occurrenceID"],
            occ.iter()
                .enumerate()
                .map(|(idx, &(event_ref, blank_key))| {
                    let event_id = if blank_key {
                        String::new()
                    } else {
                        format!("ev-{event_ref}")
                    };
                    vec![event_id, format!("occ-{idx}")]
                })
                .collect(),
        );
        let emof = table(
            &["occurrenceID", "measurementValue"],
            emof_refs
                .iter()
                .map(|&occ_ref| vec![format!("occ-{occ_ref}"), "1".to_string()])
                .collect(),
        );
        (event, occurrence, emof)
    })
}

proptest! {
    #[test]
    fn merged_plus_unmatched_emof_conserves_emof_rows((event, occurrence, emof) in inputs()) {
        let (merged, report) = link(&event, &occurrence, &emof).expect("keys are unique by construction");
        prop_assert_eq!(merged.len() + report.unmatched_emof, emof.row_count());
        // Any shortfall corresponds one-to-one with unmatched-row findings,
        // plus exactly one conservation finding when a shortfall exists.
        let unmatched_findings = report.unmatched_occurrences + report.unmatched_emof;
        let expected_findings = if merged.len() == emof.row_count() {
            unmatched_findings
        } else {
            unmatched_findings + 1
        };
        prop_assert_eq!(report.findings.len(), expected_findings);
    }

    #[test]
    fn linking_twice_is_deterministic((event, occurrence, emof) in inputs()) {
        let (first, first_report) = link(&event, &occurrence, &emof).expect("link");
        let (second, second_report) = link(&event, &occurrence, &emof).expect("link");
        prop_assert_eq!(first.len(), second.len());
        prop_assert_eq!(first_report.findings, second_report.findings);
    }
}
