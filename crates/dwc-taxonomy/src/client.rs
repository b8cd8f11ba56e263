use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::{Result, TaxonomyError};
use crate::types::AphiaRecord;

/// WoRMS REST base URL.
const WORMS_BASE_URL: &str = "https://www.marinespecies.org";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("dwc-check/", env!("CARGO_PKG_VERSION"));

/// Client for the WoRMS AphiaRecordsByName endpoint.
///
/// Exact-match lookups (`like=false`): the validator wants the authority's
/// verdict on the name as recorded, not fuzzy suggestions.
#[derive(Debug, Clone)]
pub struct WormsClient {
    client: reqwest::Client,
    base_url: String,
}

impl WormsClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(WORMS_BASE_URL, timeout)
    }

    /// Point the client at a different host; used by tests and mirrors.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TaxonomyError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the authority's records for one scientific name.
    ///
    /// HTTP 204 and 400 mean the authority has no match for the name and map
    /// to an empty record list; any other non-success status is an error.
    pub async fn records_by_name(&self, name: &str) -> Result<Vec<AphiaRecord>> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| TaxonomyError::Network(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| TaxonomyError::Network("base url cannot carry a path".to_string()))?
            .extend(["rest", "AphiaRecordsByName", name]);
        url.query_pairs_mut()
            .append_pair("like", "false")
            .append_pair("marine_only", "true");

        debug!(name, %url, "querying WoRMS");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::BAD_REQUEST {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(TaxonomyError::Status(status.as_u16()));
        }
        let records: Vec<AphiaRecord> = response.json().await?;
        Ok(records)
    }
}
