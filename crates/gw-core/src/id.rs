//! Entity id generation.
//!
//! Random ids carry a short entity prefix (`tbl-…`, `ver-…`) so log lines and
//! catalog rows stay self-describing. Inferred relation edges instead use a
//! deterministic digest of their endpoints so repeated inference passes
//! upsert the same row.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh entity id with the given prefix, e.g. `tbl-3f2a…`.
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Deterministic id for an inferred relation edge.
///
/// Hashes the (fk table, fk fields, pk table, pk fields) key so re-running
/// inference over unchanged data produces an identical id.
pub fn inferred_relation_id(
    fk_table_id: &str,
    fk_fields: &[String],
    pk_table_id: &str,
    pk_fields: &[String],
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fk_table_id.as_bytes());
    for f in fk_fields {
        hasher.update(b"|");
        hasher.update(f.as_bytes());
    }
    hasher.update(b"->");
    hasher.update(pk_table_id.as_bytes());
    for f in pk_fields {
        hasher.update(b"|");
        hasher.update(f.as_bytes());
    }
    format!("rel-inf-{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "id_test.rs"]
mod tests;
