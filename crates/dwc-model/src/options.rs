use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Columns that must be present in the merged schema.
pub const DEFAULT_REQUIRED_COLUMNS: &[&str] = &[
    "eventID",
    "occurrenceID",
    "scientificName",
    "eventDate",
    "decimalLatitude",
    "decimalLongitude",
    "basisOfRecord",
    "occurrenceStatus",
    "countryCode",
    "geodeticDatum",
    "measurementType",
    "measurementValue",
    "measurementUnit",
];

/// Columns that must be non-null in every merged row.
pub const DEFAULT_CRITICAL_COLUMNS: &[&str] = &[
    "eventID",
    "occurrenceID",
    "scientificName",
    "decimalLatitude",
    "decimalLongitude",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Tuning knobs for one validation run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub required_columns: BTreeSet<String>,
    pub critical_columns: BTreeSet<String>,
    /// Inclusive bounds for decimalLatitude.
    pub latitude_range: (f64, f64),
    /// Inclusive bounds for decimalLongitude.
    pub longitude_range: (f64, f64),
    /// Per-name deadline for authority lookups.
    pub lookup_timeout: Duration,
    /// Maximum in-flight authority lookups.
    pub lookup_concurrency: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            required_columns: DEFAULT_REQUIRED_COLUMNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            critical_columns: DEFAULT_CRITICAL_COLUMNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            latitude_range: (-90.0, 90.0),
            longitude_range: (-180.0, 180.0),
            lookup_timeout: Duration::from_secs(60),
            lookup_concurrency: 4,
        }
    }
}

impl CheckConfig {
    /// Load a TOML override file and apply it on top of `self`.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let overrides: ConfigOverrides =
            toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        self.apply(overrides);
        Ok(())
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(columns) = overrides.required_columns {
            self.required_columns = columns.into_iter().collect();
        }
        if let Some(columns) = overrides.critical_columns {
            self.critical_columns = columns.into_iter().collect();
        }
        if let Some([min, max]) = overrides.latitude_range {
            self.latitude_range = (min, max);
        }
        if let Some([min, max]) = overrides.longitude_range {
            self.longitude_range = (min, max);
        }
        if let Some(secs) = overrides.lookup_timeout_secs {
            self.lookup_timeout = Duration::from_secs(secs);
        }
        if let Some(concurrency) = overrides.lookup_concurrency {
            self.lookup_concurrency = concurrency.max(1);
        }
    }
}

/// Optional overrides, each key independent, as read from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub required_columns: Option<Vec<String>>,
    pub critical_columns: Option<Vec<String>>,
    pub latitude_range: Option<[f64; 2]>,
    pub longitude_range: Option<[f64; 2]>,
    pub lookup_timeout_secs: Option<u64>,
    pub lookup_concurrency: Option<usize>,
}
