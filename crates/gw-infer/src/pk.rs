//! Single-column primary key inference.
//!
//! Candidates come straight from the stored profiles: non-empty, unique,
//! never-missing columns. Name heuristics only break ties between
//! candidates the data already supports.

use duckdb::Connection;
use gw_catalog::store::{keys, profiles};
use gw_catalog::CatalogResult;

/// Ranking tier for a candidate name: exact "id" first, then "*_id", then
/// everything else; lexicographic on the lowercased name within a tier.
fn rank(name: &str) -> (u8, String) {
    let lower = name.to_lowercase();
    let tier = if lower == "id" {
        0
    } else if lower.ends_with("_id") {
        1
    } else {
        2
    };
    (tier, lower)
}

/// Infer (or clear) the primary key for a table from its current profiles.
///
/// Returns the inferred fields, or None when an explicit key exists or no
/// column qualifies. Stale inferred rows are removed in both None cases.
pub fn infer_primary_key(conn: &Connection, table_id: &str) -> CatalogResult<Option<Vec<String>>> {
    if keys::explicit_pk(conn, table_id)?.is_some() {
        keys::clear_inferred_pk(conn, table_id)?;
        return Ok(None);
    }

    let profile_map = profiles::load_profiles(conn, table_id)?;
    let mut candidates: Vec<&String> = profile_map
        .iter()
        .filter(|(_, p)| p.row_count > 0 && p.is_unique && !p.inferred_nullable)
        .map(|(name, _)| name)
        .collect();

    if candidates.is_empty() {
        keys::clear_inferred_pk(conn, table_id)?;
        return Ok(None);
    }

    candidates.sort_by_key(|name| rank(name.as_str()));
    let fields = vec![candidates[0].clone()];
    keys::upsert_inferred_pk(conn, table_id, &fields)?;
    log::debug!("inferred pk for {table_id}: {:?}", fields);
    Ok(Some(fields))
}

#[cfg(test)]
#[path = "pk_test.rs"]
mod tests;
