pub mod completeness;
pub mod coordinates;
pub mod depth;
pub mod required;

use dwc_linkage::{MergedRow, MergedTable};
use dwc_model::{RecordRef, TableKind};

pub use completeness::check_completeness;
pub use coordinates::check_coordinates;
pub use depth::check_depth;
pub use required::check_required_columns;

pub(crate) fn parse_numeric(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Anchor for a row-scoped finding about `column`: the row of the most
/// specific source table that carries the column. Anchoring at the source
/// row (rather than the merged row) keeps one offending occurrence from
/// being reported once per measurement it fans out to.
pub(crate) fn origin_record(merged: &MergedTable, row: &MergedRow, column: &str) -> RecordRef {
    let table = merged.origin_of(column).unwrap_or(TableKind::Occurrence);
    row.record_for(table)
}
