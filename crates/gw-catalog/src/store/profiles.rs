//! Persisted column profiles.
//!
//! Profiles are facts about the active version's data, fully replaced on
//! each refresh. The profiler in `gw-infer` computes them; this module only
//! stores and loads.

use crate::error::{CatalogResult, CatalogResultExt};
use duckdb::Connection;
use serde::Serialize;
use std::collections::HashMap;

/// Per-column facts observed in the active version.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub column_name: String,
    pub row_count: i64,
    pub missing_count: i64,
    pub distinct_count: i64,
    pub is_unique: bool,
    pub is_identity: bool,
    pub inferred_nullable: bool,
}

/// Replace all profile rows for a table.
pub fn replace_profiles(
    conn: &Connection,
    table_id: &str,
    profiles: &[ColumnProfile],
) -> CatalogResult<()> {
    conn.execute(
        "DELETE FROM gw_meta.column_profiles WHERE table_id = ?",
        duckdb::params![table_id],
    )
    .catalog_context("delete column_profiles")?;
    for p in profiles {
        conn.execute(
            "INSERT INTO gw_meta.column_profiles
               (table_id, column_name, row_count, missing_count, distinct_count,
                is_unique, is_identity, inferred_nullable)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            duckdb::params![
                table_id,
                p.column_name,
                p.row_count,
                p.missing_count,
                p.distinct_count,
                p.is_unique,
                p.is_identity,
                p.inferred_nullable,
            ],
        )
        .catalog_context(&format!("insert column_profiles ({})", p.column_name))?;
    }
    Ok(())
}

/// Load all profiles for a table, keyed by column name.
pub fn load_profiles(
    conn: &Connection,
    table_id: &str,
) -> CatalogResult<HashMap<String, ColumnProfile>> {
    let mut stmt = conn
        .prepare(
            "SELECT column_name, row_count, missing_count, distinct_count,
                    is_unique, is_identity, inferred_nullable
             FROM gw_meta.column_profiles WHERE table_id = ?",
        )
        .catalog_context("prepare load profiles")?;
    let rows: Vec<ColumnProfile> = stmt
        .query_map(duckdb::params![table_id], |row| {
            Ok(ColumnProfile {
                column_name: row.get(0)?,
                row_count: row.get(1)?,
                missing_count: row.get(2)?,
                distinct_count: row.get(3)?,
                is_unique: row.get(4)?,
                is_identity: row.get(5)?,
                inferred_nullable: row.get(6)?,
            })
        })
        .catalog_context("query load profiles")?
        .collect::<Result<Vec<_>, _>>()
        .catalog_context("collect load profiles")?;
    Ok(rows
        .into_iter()
        .map(|p| (p.column_name.clone(), p))
        .collect())
}

/// Whether any profile rows exist for a table.
pub fn has_profiles(conn: &Connection, table_id: &str) -> CatalogResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT count(*) FROM gw_meta.column_profiles WHERE table_id = ?",
            duckdb::params![table_id],
            |row| row.get(0),
        )
        .catalog_context("count column_profiles")?;
    Ok(count > 0)
}
