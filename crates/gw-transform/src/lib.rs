//! gw-transform - Transformation engine for Gridworks
//!
//! Clean evolves a table in place by producing a new active version of the
//! same logical table; merge and reshape derive brand-new tables and record
//! lineage. Every operation appends to the operation log, and the most
//! recent clean entries can be undone by re-pointing the active version.
//! Each operation's whole write sequence runs inside one catalog
//! transaction.

pub mod clean;
pub mod error;
pub mod import;
pub mod merge;
pub mod reshape;
mod scope;
mod txn;
pub mod types;
pub mod undo;

pub use clean::clean_table;
pub use error::{TransformError, TransformResult};
pub use import::import_csv;
pub use merge::merge_tables;
pub use reshape::reshape_table;
pub use types::{
    CleanOutcome, CleanRequest, MergeOutcome, MergeReport, MergeRequest, ReshapeOutcome,
    ReshapeReport, ReshapeRequest, RowsBefore, UndoOutcome,
};
pub use undo::undo_last_clean;
