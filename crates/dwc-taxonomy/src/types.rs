use serde::{Deserialize, Serialize};

/// One record from the WoRMS AphiaRecordsByName endpoint. Only the fields
/// the classifier reads; the payload carries many more.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AphiaRecord {
    #[serde(default)]
    pub scientificname: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub valid_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Resolved status of one scientific name. Cached for the whole run; created
/// lazily on first lookup, never invalidated mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum TaxonStatus {
    Accepted,
    Unaccepted { accepted_name: Option<String> },
    NotFound,
    LookupError { reason: String },
}

/// Map an authority response onto a status. The first accepted record wins;
/// records without an accepted one classify the name as unaccepted, carrying
/// the authority's suggested valid name.
pub fn classify(records: &[AphiaRecord]) -> TaxonStatus {
    if records.is_empty() {
        return TaxonStatus::NotFound;
    }
    let accepted = records.iter().any(|record| {
        record
            .status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("accepted"))
    });
    if accepted {
        TaxonStatus::Accepted
    } else {
        TaxonStatus::Unaccepted {
            accepted_name: records[0].valid_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str, valid_name: Option<&str>) -> AphiaRecord {
        AphiaRecord {
            scientificname: Some("Abra alba".to_string()),
            status: Some(status.to_string()),
            valid_name: valid_name.map(ToString::to_string),
            url: None,
        }
    }

    #[test]
    fn empty_response_is_not_found() {
        assert_eq!(classify(&[]), TaxonStatus::NotFound);
    }

    #[test]
    fn any_accepted_record_classifies_as_accepted() {
        let records = [record("unaccepted", Some("Abra alba")), record("Accepted", None)];
        assert_eq!(classify(&records), TaxonStatus::Accepted);
    }

    #[test]
    fn synonym_carries_the_suggested_valid_name() {
        let records = [record("unaccepted", Some("Magelona johnstoni"))];
        assert_eq!(
            classify(&records),
            TaxonStatus::Unaccepted {
                accepted_name: Some("Magelona johnstoni".to_string())
            }
        );
    }

    #[test]
    fn record_deserializes_from_worms_payload() {
        let json = r#"{
            "AphiaID": 141433,
            "scientificname": "Abra alba",
            "status": "accepted",
            "valid_name": "Abra alba",
            "url": "https://www.marinespecies.org/aphia.php?p=taxdetails&id=141433",
            "isMarine": 1
        }"#;
        let record: AphiaRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(record.status.as_deref(), Some("accepted"));
    }
}
