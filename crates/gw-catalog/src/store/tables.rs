//! Logical table records.

use crate::error::{CatalogError, CatalogResult, CatalogResultExt};
use duckdb::Connection;
use gw_core::SourceType;
use serde::Serialize;
use std::str::FromStr;

/// A named dataset whose identity persists across content versions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalTable {
    pub id: String,
    pub name: String,
    pub source_type: SourceType,
    pub source_file_id: Option<String>,
    pub dirty: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Create a logical table record.
pub fn insert_table(
    conn: &Connection,
    id: &str,
    name: &str,
    source_type: SourceType,
    source_file_id: Option<&str>,
) -> CatalogResult<()> {
    conn.execute(
        "INSERT INTO gw_meta.tables (id, name, source_type, source_file_id, dirty)
         VALUES (?, ?, ?, ?, false)",
        duckdb::params![id, name, source_type.as_str(), source_file_id],
    )
    .catalog_context("insert tables")?;
    Ok(())
}

/// Fetch one logical table.
pub fn get_table(conn: &Connection, table_id: &str) -> CatalogResult<LogicalTable> {
    let row = conn
        .query_row(
            "SELECT id, name, source_type, source_file_id, dirty,
                    CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR)
             FROM gw_meta.tables WHERE id = ?",
            duckdb::params![table_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, bool>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            },
        );
    let (id, name, source_type, source_file_id, dirty, created_at, updated_at) = match row {
        Ok(r) => r,
        Err(duckdb::Error::QueryReturnedNoRows) => {
            return Err(CatalogError::UnknownTable {
                id: table_id.to_string(),
            })
        }
        Err(e) => return Err(e).catalog_context("query tables"),
    };
    Ok(LogicalTable {
        id,
        name,
        source_type: SourceType::from_str(&source_type)?,
        source_file_id,
        dirty,
        created_at,
        updated_at,
    })
}

/// Ids of all logical tables, most recently updated first.
pub fn list_table_ids(conn: &Connection) -> CatalogResult<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT id FROM gw_meta.tables ORDER BY updated_at DESC, id")
        .catalog_context("prepare list tables")?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .catalog_context("query list tables")?
        .collect::<Result<Vec<_>, _>>()
        .catalog_context("collect list tables")?;
    Ok(ids)
}

/// Ids of imported tables only (relation inference scope).
pub fn list_imported_table_ids(conn: &Connection) -> CatalogResult<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT id FROM gw_meta.tables WHERE source_type != 'derived' ORDER BY id")
        .catalog_context("prepare list imported tables")?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .catalog_context("query list imported tables")?
        .collect::<Result<Vec<_>, _>>()
        .catalog_context("collect list imported tables")?;
    Ok(ids)
}

/// Flag a table as content-modified since import.
pub fn set_dirty(conn: &Connection, table_id: &str, dirty: bool) -> CatalogResult<()> {
    conn.execute(
        "UPDATE gw_meta.tables SET dirty = ? WHERE id = ?",
        duckdb::params![dirty, table_id],
    )
    .catalog_context("update tables.dirty")?;
    Ok(())
}
