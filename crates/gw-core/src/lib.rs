//! gw-core - Core library for Gridworks
//!
//! This crate provides shared types used across all Gridworks components:
//! entity id generation, SQL identifier utilities, and the closed
//! tagged-variant types for every operation family (clean actions, join
//! kinds, reshape directions, filter operators).

pub mod error;
pub mod filter;
pub mod id;
pub mod ident;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use filter::{Filter, SortSpec};
pub use id::{inferred_relation_id, new_id};
pub use ident::{dedupe_names, physical_name, quote_ident};
pub use types::{
    Cardinality, CleanAction, FilterOp, JoinKind, OperationType, ReshapeDirection, SortDirection,
    SourceType,
};
