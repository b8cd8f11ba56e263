pub mod checker;
pub mod client;
pub mod error;
pub mod types;

pub use checker::{NameAuthority, SCIENTIFIC_NAME, TaxonomyChecker};
pub use client::WormsClient;
pub use error::{Result, TaxonomyError};
pub use types::{AphiaRecord, TaxonStatus, classify};
