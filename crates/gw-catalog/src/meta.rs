//! Merged table metadata.
//!
//! Joins engine column introspection with stored profiles and the explicit
//! or inferred PK/FK declarations into the per-table field view callers
//! render. Profile refresh is the caller's job — this module reads whatever
//! facts are currently stored and falls back to live null counts for
//! columns that have never been profiled.

use crate::error::CatalogResult;
use crate::store::{keys, profiles, relations, tables, versions};
use duckdb::Connection;
use gw_core::{quote_ident, SourceType};
use gw_engine::columns::field_type;
use gw_engine::ops;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One field of a table, with profile facts and key flags merged in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub nullable: bool,
    pub is_primary_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unique: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_identity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_foreign_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_field: Option<String>,
    pub missing_count: i64,
    pub missing_rate: f64,
}

/// Full metadata for one table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMeta {
    pub id: String,
    pub name: String,
    pub fields: Vec<FieldMeta>,
    pub row_count: i64,
    pub source_type: SourceType,
    pub dirty: bool,
    pub source_file_id: Option<String>,
}

/// Flag helper: `true` serializes, `false` is omitted like an absent fact.
fn flag(b: bool) -> Option<bool> {
    if b {
        Some(true)
    } else {
        None
    }
}

/// Build the merged metadata view for one table.
pub fn get_table_meta(conn: &Connection, table_id: &str) -> CatalogResult<TableMeta> {
    let table = tables::get_table(conn, table_id)?;
    let physical = versions::active_physical_name(conn, table_id)?;
    let profile_map = profiles::load_profiles(conn, table_id)?;

    let row_count = match profile_map.values().next() {
        Some(p) => p.row_count,
        None => ops::count_rows(conn, &physical)?,
    };

    let pk_fields: HashSet<String> = keys::effective_pk(conn, table_id)?
        .unwrap_or_default()
        .into_iter()
        .collect();

    // field -> (referenced table, referenced field), from explicit and
    // inferred edges alike. Positional pairing, clamped to the last pk
    // field for ragged declarations.
    let mut fk_by_field: HashMap<String, (String, String)> = HashMap::new();
    for edge in relations::relations_from_table(conn, table_id)? {
        for (i, fk_field) in edge.fk_fields.iter().enumerate() {
            if let Some(ref_field) = edge.pk_fields.get(i.min(edge.pk_fields.len().saturating_sub(1)))
            {
                fk_by_field.insert(
                    fk_field.clone(),
                    (edge.pk_table_id.clone(), ref_field.clone()),
                );
            }
        }
    }

    let mut fields = Vec::new();
    for col in ops::table_columns(conn, &physical)? {
        let (missing_count, nullable, is_unique, is_identity) = match profile_map.get(&col.name) {
            Some(p) => (
                p.missing_count,
                p.inferred_nullable,
                p.is_unique,
                p.is_identity,
            ),
            None => {
                let missing = ops::count_where(
                    conn,
                    &physical,
                    &format!("{} IS NULL", quote_ident(&col.name)?),
                    &[],
                )?;
                (missing, col.nullable, false, false)
            }
        };
        let missing_rate = if row_count > 0 {
            missing_count as f64 / row_count as f64
        } else {
            0.0
        };
        let reference = fk_by_field.get(&col.name);
        fields.push(FieldMeta {
            field_type: field_type(&col.duck_type).to_string(),
            nullable,
            is_primary_key: pk_fields.contains(&col.name),
            is_unique: flag(is_unique),
            is_identity: flag(is_identity),
            is_foreign_key: flag(reference.is_some()),
            ref_table: reference.map(|(t, _)| t.clone()),
            ref_field: reference.map(|(_, f)| f.clone()),
            missing_count,
            missing_rate,
            name: col.name,
        });
    }

    Ok(TableMeta {
        id: table.id,
        name: table.name,
        fields,
        row_count,
        source_type: table.source_type,
        dirty: table.dirty,
        source_file_id: table.source_file_id,
    })
}

/// Metadata for every table, most recently updated first.
pub fn list_tables(conn: &Connection) -> CatalogResult<Vec<TableMeta>> {
    tables::list_table_ids(conn)?
        .iter()
        .map(|id| get_table_meta(conn, id))
        .collect()
}

#[cfg(test)]
#[path = "meta_test.rs"]
mod tests;
