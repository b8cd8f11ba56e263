use thiserror::Error;

/// Errors from one authority lookup. Never fatal for the run: the checker
/// records them as `lookup-error` statuses and keeps going.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaxonomyError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authority returned HTTP {0}")]
    Status(u16),

    #[error("decode response: {0}")]
    Decode(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl From<reqwest::Error> for TaxonomyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, TaxonomyError>;
