//! Derivation lineage edges.
//!
//! Append-only: one edge per derivation, written when a merge or reshape
//! creates its output table. Clean evolves a table in place and records no
//! lineage.

use crate::error::{CatalogError, CatalogResult, CatalogResultExt};
use duckdb::Connection;
use gw_core::{new_id, OperationType};
use serde::Serialize;
use std::str::FromStr;

/// Record that a derived table was produced from source tables.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageEdge {
    pub id: String,
    pub derived_table_id: String,
    pub source_table_ids: Vec<String>,
    pub operation: OperationType,
}

/// Append a lineage edge and return it.
pub fn insert_lineage(
    conn: &Connection,
    derived_table_id: &str,
    source_table_ids: &[String],
    operation: OperationType,
) -> CatalogResult<LineageEdge> {
    let id = new_id("lin");
    conn.execute(
        "INSERT INTO gw_meta.lineage_edges (id, derived_table_id, source_table_ids_json, operation)
         VALUES (?, ?, ?, ?)",
        duckdb::params![
            id,
            derived_table_id,
            serde_json::to_string(source_table_ids).unwrap_or_default(),
            operation.as_str(),
        ],
    )
    .catalog_context("insert lineage_edges")?;
    Ok(LineageEdge {
        id,
        derived_table_id: derived_table_id.to_string(),
        source_table_ids: source_table_ids.to_vec(),
        operation,
    })
}

/// All lineage edges, newest first.
pub fn list_lineage(conn: &Connection) -> CatalogResult<Vec<LineageEdge>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, derived_table_id, source_table_ids_json, operation
             FROM gw_meta.lineage_edges ORDER BY created_at DESC, id",
        )
        .catalog_context("prepare list lineage")?;
    let raw: Vec<(String, String, String, String)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })
        .catalog_context("query list lineage")?
        .collect::<Result<Vec<_>, _>>()
        .catalog_context("collect list lineage")?;

    raw.into_iter()
        .map(|(id, derived_table_id, sources_json, operation)| {
            Ok(LineageEdge {
                id,
                derived_table_id,
                source_table_ids: serde_json::from_str(&sources_json).map_err(|e| {
                    CatalogError::validation(format!("corrupt lineage sources: {e}"))
                })?,
                operation: OperationType::from_str(&operation)?,
            })
        })
        .collect()
}
