//! Relation inference.
//!
//! Detects FK → PK edges across imported tables by exact column-name match
//! plus observed value coverage. Exact-name-match with a high threshold
//! trades recall for precision: a surfaced edge should be trustworthy.
//! Derived tables are excluded — they carry their sources' columns and
//! would produce spurious self-referential edges.

use duckdb::Connection;
use gw_catalog::store::relations::RelationEdge;
use gw_catalog::store::{keys, profiles, relations, tables, versions};
use gw_catalog::{CatalogResult, CatalogResultExt};
use gw_core::{inferred_relation_id, quote_ident, Cardinality};
use gw_engine::ops;
use std::collections::{BTreeSet, HashMap};

/// Minimum fraction of non-missing fk values that must match a pk value.
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.9;

/// Normalization applied to both sides of the coverage join: cast to text,
/// trim, blank collapses to NULL. Matches the profiler's distinct-count
/// normalization for text.
fn normalized_key_expr(quoted: &str) -> String {
    format!("nullif(trim(CAST({quoted} AS VARCHAR)), '')")
}

/// Fraction of the fk column's non-missing values that match some pk value.
fn coverage(
    conn: &Connection,
    fk_physical: &str,
    pk_physical: &str,
    column: &str,
) -> CatalogResult<Option<f64>> {
    let key = normalized_key_expr(&quote_ident(column)?);
    let sql = format!(
        "WITH fk AS (
             SELECT {key} AS k FROM \"{fk_physical}\" WHERE {key} IS NOT NULL
         ),
         pk AS (
             SELECT DISTINCT {key} AS k FROM \"{pk_physical}\" WHERE {key} IS NOT NULL
         )
         SELECT sum(CASE WHEN pk.k IS NOT NULL THEN 1 ELSE 0 END), count(*)
         FROM fk LEFT JOIN pk USING (k)"
    );
    let (matched, total): (Option<i64>, i64) = conn
        .query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))
        .catalog_context("coverage query")?;
    if total == 0 {
        return Ok(None);
    }
    Ok(Some(matched.unwrap_or(0) as f64 / total as f64))
}

/// Recompute all inferred relation edges across imported tables.
///
/// Profiles and inferred primary keys are brought up to date first
/// (profiles only where absent). The previous inferred set is dropped and
/// rebuilt; edge ids are deterministic, so an unchanged catalog yields an
/// identical set. Returns the edges written.
pub fn refresh_inferred_relations(
    conn: &Connection,
    threshold: f64,
) -> CatalogResult<Vec<RelationEdge>> {
    let table_ids = tables::list_imported_table_ids(conn)?;
    if table_ids.is_empty() {
        relations::delete_all_inferred(conn)?;
        return Ok(Vec::new());
    }

    for tid in &table_ids {
        if !profiles::has_profiles(conn, tid)? {
            crate::profiler::refresh_profiles(conn, tid)?;
        }
        crate::pk::infer_primary_key(conn, tid)?;
    }

    // PK-candidate columns per table: the effective key when single-column,
    // else every unique non-nullable column (single-column inference only).
    let mut pk_candidates: HashMap<&str, BTreeSet<String>> = HashMap::new();
    for tid in &table_ids {
        if let Some(fields) = keys::effective_pk(conn, tid)? {
            if fields.len() == 1 {
                pk_candidates.insert(tid.as_str(), fields.into_iter().collect());
                continue;
            }
        }
        let prof = profiles::load_profiles(conn, tid)?;
        pk_candidates.insert(
            tid.as_str(),
            prof.values()
                .filter(|p| p.row_count > 0 && p.is_unique && !p.inferred_nullable)
                .map(|p| p.column_name.clone())
                .collect(),
        );
    }

    relations::delete_all_inferred(conn)?;

    let mut created = Vec::new();
    for fk_tid in &table_ids {
        let fk_physical = versions::active_physical_name(conn, fk_tid)?;
        let fk_cols: BTreeSet<String> = ops::column_names(conn, &fk_physical)?.into_iter().collect();
        let fk_profiles = profiles::load_profiles(conn, fk_tid)?;

        for pk_tid in &table_ids {
            if pk_tid == fk_tid {
                continue;
            }
            let Some(pk_cols) = pk_candidates.get(pk_tid.as_str()) else {
                continue;
            };
            if pk_cols.is_empty() {
                continue;
            }
            let pk_physical = versions::active_physical_name(conn, pk_tid)?;

            for shared in fk_cols.intersection(pk_cols) {
                let Some(fk_prof) = fk_profiles.get(shared) else {
                    continue;
                };
                if fk_prof.distinct_count == 0 {
                    continue;
                }

                let Some(cov) = coverage(conn, &fk_physical, &pk_physical, shared)? else {
                    continue;
                };
                if cov < threshold {
                    continue;
                }

                let cardinality = if fk_prof.is_unique && !fk_prof.inferred_nullable {
                    Cardinality::OneToOne
                } else {
                    Cardinality::ManyToOne
                };

                let fields = vec![shared.clone()];
                let id = inferred_relation_id(fk_tid, &fields, pk_tid, &fields);
                relations::upsert_inferred(
                    conn,
                    &id,
                    fk_tid,
                    &fields,
                    pk_tid,
                    &fields,
                    cardinality,
                    cov,
                )?;
                log::debug!(
                    "inferred relation {fk_tid}.{shared} -> {pk_tid}.{shared} (coverage {cov:.3})"
                );
                created.push(RelationEdge {
                    id,
                    fk_table_id: fk_tid.clone(),
                    fk_fields: fields.clone(),
                    pk_table_id: pk_tid.clone(),
                    pk_fields: fields,
                    cardinality,
                    coverage: Some(cov),
                });
            }
        }
    }
    Ok(created)
}

#[cfg(test)]
#[path = "relations_test.rs"]
mod tests;
