//! Table version rows and the version manager.
//!
//! Versions are append-only immutable snapshots; exactly one row per table
//! has `is_active = true` at any time. Activation and version-number
//! allocation live here so every caller preserves those invariants.

use crate::error::{CatalogError, CatalogResult, CatalogResultExt};
use duckdb::Connection;
use serde::Serialize;

/// One immutable content snapshot of a logical table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableVersion {
    pub id: String,
    pub table_id: String,
    pub version: i64,
    pub physical_name: String,
    pub op_log_id: Option<String>,
    pub created_at: String,
    pub is_active: bool,
}

const VERSION_COLUMNS: &str = "id, table_id, version, physical_name, op_log_id, \
                               CAST(created_at AS VARCHAR), is_active";

fn version_from_row(row: &duckdb::Row<'_>) -> Result<TableVersion, duckdb::Error> {
    Ok(TableVersion {
        id: row.get(0)?,
        table_id: row.get(1)?,
        version: row.get(2)?,
        physical_name: row.get(3)?,
        op_log_id: row.get(4)?,
        created_at: row.get(5)?,
        is_active: row.get(6)?,
    })
}

/// Insert a new version row.
pub fn insert_version(
    conn: &Connection,
    id: &str,
    table_id: &str,
    version: i64,
    physical_name: &str,
    is_active: bool,
) -> CatalogResult<()> {
    conn.execute(
        "INSERT INTO gw_meta.table_versions (id, table_id, version, physical_name, is_active)
         VALUES (?, ?, ?, ?, ?)",
        duckdb::params![id, table_id, version, physical_name, is_active],
    )
    .catalog_context("insert table_versions")?;
    Ok(())
}

/// The single active version of a table.
///
/// Unknown or version-less table ids both surface as [`CatalogError::UnknownTable`];
/// a table without any version cannot exist through the public mutations.
pub fn active_version(conn: &Connection, table_id: &str) -> CatalogResult<TableVersion> {
    let row = conn.query_row(
        &format!(
            "SELECT {VERSION_COLUMNS} FROM gw_meta.table_versions
             WHERE table_id = ? AND is_active LIMIT 1"
        ),
        duckdb::params![table_id],
        version_from_row,
    );
    match row {
        Ok(v) => Ok(v),
        Err(duckdb::Error::QueryReturnedNoRows) => Err(CatalogError::UnknownTable {
            id: table_id.to_string(),
        }),
        Err(e) => Err(e).catalog_context("query active version"),
    }
}

/// Physical snapshot name of the active version.
pub fn active_physical_name(conn: &Connection, table_id: &str) -> CatalogResult<String> {
    Ok(active_version(conn, table_id)?.physical_name)
}

/// Fetch a version row by id.
pub fn get_version(conn: &Connection, version_id: &str) -> CatalogResult<TableVersion> {
    let row = conn.query_row(
        &format!("SELECT {VERSION_COLUMNS} FROM gw_meta.table_versions WHERE id = ?"),
        duckdb::params![version_id],
        version_from_row,
    );
    match row {
        Ok(v) => Ok(v),
        Err(duckdb::Error::QueryReturnedNoRows) => Err(CatalogError::UnknownVersion {
            id: version_id.to_string(),
        }),
        Err(e) => Err(e).catalog_context("query version"),
    }
}

/// All versions of a table, oldest first.
pub fn list_versions(conn: &Connection, table_id: &str) -> CatalogResult<Vec<TableVersion>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {VERSION_COLUMNS} FROM gw_meta.table_versions
             WHERE table_id = ? ORDER BY version"
        ))
        .catalog_context("prepare list versions")?;
    let rows = stmt
        .query_map(duckdb::params![table_id], version_from_row)
        .catalog_context("query list versions")?
        .collect::<Result<Vec<_>, _>>()
        .catalog_context("collect list versions")?;
    Ok(rows)
}

/// Next version number for a table: 1 + max existing, 1 if none.
pub fn next_version_number(conn: &Connection, table_id: &str) -> CatalogResult<i64> {
    let max: Option<i64> = conn
        .query_row(
            "SELECT MAX(version) FROM gw_meta.table_versions WHERE table_id = ?",
            duckdb::params![table_id],
            |row| row.get(0),
        )
        .catalog_context("query max version")?;
    Ok(max.unwrap_or(0) + 1)
}

/// Switch the active pointer to `version_id`.
///
/// Clears the flag across all of the table's versions before setting the
/// target, so the single-active invariant holds for the whole operation.
/// Also bumps the table's `updated_at`.
pub fn activate_version(conn: &Connection, table_id: &str, version_id: &str) -> CatalogResult<()> {
    let target = get_version(conn, version_id)?;
    if target.table_id != table_id {
        return Err(CatalogError::UnknownVersion {
            id: version_id.to_string(),
        });
    }
    conn.execute(
        "UPDATE gw_meta.table_versions SET is_active = false WHERE table_id = ?",
        duckdb::params![table_id],
    )
    .catalog_context("clear active versions")?;
    conn.execute(
        "UPDATE gw_meta.table_versions SET is_active = true WHERE id = ? AND table_id = ?",
        duckdb::params![version_id, table_id],
    )
    .catalog_context("set active version")?;
    conn.execute(
        "UPDATE gw_meta.tables SET updated_at = now() WHERE id = ?",
        duckdb::params![table_id],
    )
    .catalog_context("touch tables.updated_at")?;
    Ok(())
}

/// Link a version row to the operation-log entry that produced it.
pub fn link_op_log(conn: &Connection, version_id: &str, op_log_id: &str) -> CatalogResult<()> {
    conn.execute(
        "UPDATE gw_meta.table_versions SET op_log_id = ? WHERE id = ?",
        duckdb::params![op_log_id, version_id],
    )
    .catalog_context("link version op_log")?;
    Ok(())
}
