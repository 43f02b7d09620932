//! Relation health report.
//!
//! Recomputes coverage and integrity counters for one edge (explicit or
//! inferred) against the live active versions of both tables.

use crate::error::{CatalogError, CatalogResult, CatalogResultExt};
use crate::store::{relations, versions};
use duckdb::Connection;
use gw_core::quote_ident;
use serde::Serialize;

/// Live integrity facts for one relation edge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationReport {
    pub relation_id: String,
    pub fk_table_id: String,
    pub pk_table_id: String,
    /// Fraction of fk rows with all key fields present that match a pk row.
    pub coverage: f64,
    /// fk rows with at least one key field missing.
    pub fk_missing: i64,
    /// fk rows beyond the first per duplicated key.
    pub fk_duplicate_rows: i64,
    /// pk rows beyond the first per duplicated key.
    pub pk_duplicate_rows: i64,
    pub timestamp: String,
}

/// Row-wise duplicate count over a composite key: sum of (count - 1) per
/// duplicated group. Keys are compared as text with missing parts folded to
/// the empty string.
fn duplicate_rows(conn: &Connection, physical: &str, fields: &[String]) -> CatalogResult<i64> {
    let mut parts = Vec::with_capacity(fields.len());
    for field in fields {
        parts.push(format!(
            "coalesce(CAST({} AS VARCHAR), '')",
            quote_ident(field)?
        ));
    }
    let key_expr = parts.join(" || '\u{241f}' || ");
    let count: Option<i64> = conn
        .query_row(
            &format!(
                "SELECT sum(CASE WHEN c > 1 THEN c - 1 ELSE 0 END)
                 FROM (SELECT count(*) AS c FROM \"{physical}\" GROUP BY ({key_expr}))"
            ),
            [],
            |row| row.get(0),
        )
        .catalog_context("duplicate count")?;
    Ok(count.unwrap_or(0))
}

/// Build the live report for one relation edge.
pub fn relation_report(conn: &Connection, relation_id: &str) -> CatalogResult<RelationReport> {
    let edge = relations::get_relation(conn, relation_id)?;
    if edge.fk_fields.len() != edge.pk_fields.len() {
        return Err(CatalogError::validation(
            "FK fields and PK fields length mismatch",
        ));
    }

    let fk_physical = versions::active_physical_name(conn, &edge.fk_table_id)?;
    let pk_physical = versions::active_physical_name(conn, &edge.pk_table_id)?;

    let mut nonnull_parts = Vec::with_capacity(edge.fk_fields.len());
    for field in &edge.fk_fields {
        nonnull_parts.push(format!("{} IS NOT NULL", quote_ident(field)?));
    }
    let fk_nonnull_pred = if nonnull_parts.is_empty() {
        "true".to_string()
    } else {
        nonnull_parts.join(" AND ")
    };

    let mut join_parts = Vec::with_capacity(edge.fk_fields.len());
    for (fk, pk) in edge.fk_fields.iter().zip(&edge.pk_fields) {
        join_parts.push(format!("l.{} = r.{}", quote_ident(fk)?, quote_ident(pk)?));
    }
    let join_pred = join_parts.join(" AND ");

    let (matched, total): (Option<i64>, i64) = conn
        .query_row(
            &format!(
                "SELECT sum(CASE WHEN r.__in_right = 1 THEN 1 ELSE 0 END), count(*)
                 FROM (SELECT * FROM \"{fk_physical}\" WHERE {fk_nonnull_pred}) l
                 LEFT JOIN (SELECT *, 1 AS __in_right FROM \"{pk_physical}\") r
                   ON {join_pred}"
            ),
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .catalog_context("relation coverage")?;
    let coverage = if total > 0 {
        matched.unwrap_or(0) as f64 / total as f64
    } else {
        0.0
    };

    let fk_missing: Option<i64> = conn
        .query_row(
            &format!(
                "SELECT sum(CASE WHEN NOT ({fk_nonnull_pred}) THEN 1 ELSE 0 END)
                 FROM \"{fk_physical}\""
            ),
            [],
            |row| row.get(0),
        )
        .catalog_context("fk missing count")?;

    let timestamp: String = conn
        .query_row("SELECT CAST(now() AS VARCHAR)", [], |row| row.get(0))
        .catalog_context("report timestamp")?;

    Ok(RelationReport {
        relation_id: relation_id.to_string(),
        fk_table_id: edge.fk_table_id.clone(),
        pk_table_id: edge.pk_table_id.clone(),
        coverage,
        fk_missing: fk_missing.unwrap_or(0),
        fk_duplicate_rows: duplicate_rows(conn, &fk_physical, &edge.fk_fields)?,
        pk_duplicate_rows: duplicate_rows(conn, &pk_physical, &edge.pk_fields)?,
        timestamp,
    })
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
