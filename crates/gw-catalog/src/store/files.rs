//! Upload file records.
//!
//! Files are immutable once registered; the upload pipeline itself is
//! external, the catalog only keeps the record.

use crate::error::{CatalogResult, CatalogResultExt};
use duckdb::Connection;
use serde::Serialize;

/// An immutable upload record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: i64,
    pub stored_path: String,
    pub updated_at: String,
}

/// Register an uploaded file.
pub fn insert_file(
    conn: &Connection,
    id: &str,
    name: &str,
    file_type: &str,
    size: i64,
    stored_path: &str,
) -> CatalogResult<()> {
    conn.execute(
        "INSERT INTO gw_meta.files (id, name, type, size, stored_path) VALUES (?, ?, ?, ?, ?)",
        duckdb::params![id, name, file_type, size, stored_path],
    )
    .catalog_context("insert files")?;
    Ok(())
}

/// All registered files, most recently updated first.
pub fn list_files(conn: &Connection) -> CatalogResult<Vec<DataFile>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, type, size, stored_path, CAST(updated_at AS VARCHAR)
             FROM gw_meta.files ORDER BY updated_at DESC, id",
        )
        .catalog_context("prepare list files")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(DataFile {
                id: row.get(0)?,
                name: row.get(1)?,
                file_type: row.get(2)?,
                size: row.get(3)?,
                stored_path: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })
        .catalog_context("query list files")?
        .collect::<Result<Vec<_>, _>>()
        .catalog_context("collect list files")?;
    Ok(rows)
}
