//! Explicit and inferred relation edges (FK → PK).
//!
//! Explicit edges are authoritative. Inferred edges are fully recomputed per
//! inference pass, and listings suppress an inferred edge whenever an
//! explicit one shares the same (fk table, fk fields, pk table, pk fields)
//! key.

use crate::error::{CatalogError, CatalogResult, CatalogResultExt};
use duckdb::Connection;
use gw_core::Cardinality;
use serde::Serialize;
use std::collections::HashSet;
use std::str::FromStr;

/// A foreign-key → primary-key edge between two tables.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge {
    pub id: String,
    pub fk_table_id: String,
    pub fk_fields: Vec<String>,
    pub pk_table_id: String,
    pub pk_fields: Vec<String>,
    pub cardinality: Cardinality,
    /// Fraction of non-missing fk values matched by a pk value; inferred
    /// edges only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
}

fn parse_fields(json: &str) -> CatalogResult<Vec<String>> {
    serde_json::from_str(json)
        .map_err(|e| CatalogError::validation(format!("corrupt relation fields: {e}")))
}

fn edge_from_row(row: &duckdb::Row<'_>, coverage: bool) -> Result<RawEdge, duckdb::Error> {
    Ok(RawEdge {
        id: row.get(0)?,
        fk_table_id: row.get(1)?,
        fk_fields_json: row.get(2)?,
        pk_table_id: row.get(3)?,
        pk_fields_json: row.get(4)?,
        cardinality: row.get(5)?,
        coverage: if coverage { row.get(6)? } else { None },
    })
}

struct RawEdge {
    id: String,
    fk_table_id: String,
    fk_fields_json: String,
    pk_table_id: String,
    pk_fields_json: String,
    cardinality: String,
    coverage: Option<f64>,
}

impl RawEdge {
    fn dedupe_key(&self) -> (String, String, String, String) {
        (
            self.fk_table_id.clone(),
            self.fk_fields_json.clone(),
            self.pk_table_id.clone(),
            self.pk_fields_json.clone(),
        )
    }

    fn into_edge(self) -> CatalogResult<RelationEdge> {
        Ok(RelationEdge {
            id: self.id,
            fk_table_id: self.fk_table_id,
            fk_fields: parse_fields(&self.fk_fields_json)?,
            pk_table_id: self.pk_table_id,
            pk_fields: parse_fields(&self.pk_fields_json)?,
            cardinality: Cardinality::from_str(&self.cardinality)?,
            coverage: self.coverage,
        })
    }
}

/// Create an explicit relation edge.
pub fn insert_explicit(
    conn: &Connection,
    id: &str,
    fk_table_id: &str,
    fk_fields: &[String],
    pk_table_id: &str,
    pk_fields: &[String],
    cardinality: Cardinality,
) -> CatalogResult<()> {
    conn.execute(
        "INSERT INTO gw_meta.relation_edges
           (id, fk_table_id, fk_fields_json, pk_table_id, pk_fields_json, cardinality)
         VALUES (?, ?, ?, ?, ?, ?)",
        duckdb::params![
            id,
            fk_table_id,
            serde_json::to_string(fk_fields).unwrap_or_default(),
            pk_table_id,
            serde_json::to_string(pk_fields).unwrap_or_default(),
            cardinality.as_str(),
        ],
    )
    .catalog_context("insert relation_edges")?;
    Ok(())
}

/// Create an explicit relation edge with a fresh id and return it.
pub fn create_relation(
    conn: &Connection,
    fk_table_id: &str,
    fk_fields: &[String],
    pk_table_id: &str,
    pk_fields: &[String],
    cardinality: Cardinality,
) -> CatalogResult<RelationEdge> {
    let id = gw_core::new_id("rel");
    insert_explicit(
        conn,
        &id,
        fk_table_id,
        fk_fields,
        pk_table_id,
        pk_fields,
        cardinality,
    )?;
    Ok(RelationEdge {
        id,
        fk_table_id: fk_table_id.to_string(),
        fk_fields: fk_fields.to_vec(),
        pk_table_id: pk_table_id.to_string(),
        pk_fields: pk_fields.to_vec(),
        cardinality,
        coverage: None,
    })
}

/// Upsert an inferred relation edge under its deterministic id.
pub fn upsert_inferred(
    conn: &Connection,
    id: &str,
    fk_table_id: &str,
    fk_fields: &[String],
    pk_table_id: &str,
    pk_fields: &[String],
    cardinality: Cardinality,
    coverage: f64,
) -> CatalogResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO gw_meta.relation_edges_inferred
           (id, fk_table_id, fk_fields_json, pk_table_id, pk_fields_json, cardinality, coverage)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        duckdb::params![
            id,
            fk_table_id,
            serde_json::to_string(fk_fields).unwrap_or_default(),
            pk_table_id,
            serde_json::to_string(pk_fields).unwrap_or_default(),
            cardinality.as_str(),
            coverage,
        ],
    )
    .catalog_context("upsert relation_edges_inferred")?;
    Ok(())
}

/// Drop every inferred edge ahead of a full recompute.
pub fn delete_all_inferred(conn: &Connection) -> CatalogResult<()> {
    conn.execute("DELETE FROM gw_meta.relation_edges_inferred", [])
        .catalog_context("delete relation_edges_inferred")?;
    Ok(())
}

const EXPLICIT_SELECT: &str = "SELECT id, fk_table_id, fk_fields_json, pk_table_id, \
                               pk_fields_json, cardinality FROM gw_meta.relation_edges";
const INFERRED_SELECT: &str = "SELECT id, fk_table_id, fk_fields_json, pk_table_id, \
                               pk_fields_json, cardinality, coverage \
                               FROM gw_meta.relation_edges_inferred";

fn collect_edges(
    conn: &Connection,
    sql: &str,
    params: &[&dyn duckdb::ToSql],
    coverage: bool,
) -> CatalogResult<Vec<RawEdge>> {
    let mut stmt = conn.prepare(sql).catalog_context("prepare relations")?;
    let rows = stmt
        .query_map(params, |row| edge_from_row(row, coverage))
        .catalog_context("query relations")?
        .collect::<Result<Vec<_>, _>>()
        .catalog_context("collect relations")?;
    Ok(rows)
}

/// Fetch one edge by id, explicit edges first.
pub fn get_relation(conn: &Connection, relation_id: &str) -> CatalogResult<RelationEdge> {
    let explicit = collect_edges(
        conn,
        &format!("{EXPLICIT_SELECT} WHERE id = ?"),
        &[&relation_id],
        false,
    )?;
    if let Some(raw) = explicit.into_iter().next() {
        return raw.into_edge();
    }
    let inferred = collect_edges(
        conn,
        &format!("{INFERRED_SELECT} WHERE id = ?"),
        &[&relation_id],
        true,
    )?;
    inferred
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::UnknownRelation {
            id: relation_id.to_string(),
        })?
        .into_edge()
}

/// Explicit edges plus inferred edges that don't duplicate an explicit key,
/// newest first within each group.
pub fn list_relations(conn: &Connection) -> CatalogResult<Vec<RelationEdge>> {
    let explicit = collect_edges(
        conn,
        &format!("{EXPLICIT_SELECT} ORDER BY created_at DESC, id"),
        &[],
        false,
    )?;
    let inferred = collect_edges(
        conn,
        &format!("{INFERRED_SELECT} ORDER BY created_at DESC, id"),
        &[],
        true,
    )?;

    let explicit_keys: HashSet<_> = explicit.iter().map(RawEdge::dedupe_key).collect();
    let mut out = Vec::with_capacity(explicit.len() + inferred.len());
    for raw in explicit {
        out.push(raw.into_edge()?);
    }
    for raw in inferred {
        if !explicit_keys.contains(&raw.dedupe_key()) {
            out.push(raw.into_edge()?);
        }
    }
    Ok(out)
}

/// Edges (explicit and inferred) whose fk side is the given table.
///
/// Used by the merged metadata view to flag foreign-key fields.
pub fn relations_from_table(conn: &Connection, table_id: &str) -> CatalogResult<Vec<RelationEdge>> {
    let mut out = Vec::new();
    for raw in collect_edges(
        conn,
        &format!("{EXPLICIT_SELECT} WHERE fk_table_id = ?"),
        &[&table_id],
        false,
    )? {
        out.push(raw.into_edge()?);
    }
    for raw in collect_edges(
        conn,
        &format!("{INFERRED_SELECT} WHERE fk_table_id = ?"),
        &[&table_id],
        true,
    )? {
        out.push(raw.into_edge()?);
    }
    Ok(out)
}
