//! gw-infer - Schema inference for Gridworks
//!
//! Everything here derives structure from observed data: per-column
//! profiles, single-column primary key candidates, and name+coverage
//! foreign-key detection. Declared metadata always wins over inference;
//! these passes are re-run explicitly by callers after mutations.

pub mod pk;
pub mod profiler;
pub mod relations;

pub use pk::infer_primary_key;
pub use profiler::refresh_profiles;
pub use relations::{refresh_inferred_relations, DEFAULT_COVERAGE_THRESHOLD};
