use thiserror::Error;

/// Errors raised while loading a tabular source. All are fatal for the run:
/// there is nothing to validate without a well-formed table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} has no header row")]
    Empty { path: String },

    #[error("{path} line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        path: String,
        line: u64,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
