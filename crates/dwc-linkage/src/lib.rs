pub mod engine;
pub mod merged;

pub use engine::{CardinalityError, EVENT_KEY, JoinSide, LinkageReport, OCCURRENCE_KEY, link};
pub use merged::{MergedRow, MergedTable};
