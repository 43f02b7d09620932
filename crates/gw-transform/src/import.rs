//! CSV import.
//!
//! Materializes a parsed tabular source as a new imported table at version
//! 1. Upload handling is external; the catalog receives a readable path and
//! a table name.

use crate::error::TransformResult;
use crate::txn;
use duckdb::Connection;
use gw_catalog::meta::{self, TableMeta};
use gw_catalog::store::{files, oplog, tables, versions};
use gw_catalog::CatalogDb;
use gw_core::{new_id, physical_name, OperationType, SourceType};
use gw_engine::ops;
use serde_json::json;
use std::path::Path;

/// Import a CSV file as a new table, returning its merged metadata.
pub fn import_csv(catalog: &CatalogDb, table_name: &str, path: &Path) -> TransformResult<TableMeta> {
    let size = std::fs::metadata(path).map(|m| m.len() as i64).unwrap_or(0);
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| table_name.to_string());

    txn::with_txn(catalog, |conn| {
        import_into(conn, table_name, path, &file_name, size)
    })
}

fn import_into(
    conn: &Connection,
    table_name: &str,
    path: &Path,
    file_name: &str,
    size: i64,
) -> TransformResult<TableMeta> {
    let file_id = new_id("file");
    files::insert_file(
        conn,
        &file_id,
        file_name,
        "text/csv",
        size,
        &path.to_string_lossy(),
    )?;

    let table_id = new_id("tbl");
    let physical = physical_name(&table_id, 1);
    ops::import_csv(conn, &physical, path)?;

    tables::insert_table(conn, &table_id, table_name, SourceType::Imported, Some(&file_id))?;
    versions::insert_version(conn, &new_id("ver"), &table_id, 1, &physical, true)?;

    oplog::append_entry(
        conn,
        &oplog::NewLogEntry {
            op_type: OperationType::Import,
            table_id: &table_id,
            table_name,
            params: json!({ "file": file_name, "fileId": file_id }),
            result: None,
            undoable: false,
            prev_version_id: None,
            new_version_id: None,
        },
    )?;

    log::info!("imported {file_name} as table {table_id} ({table_name})");
    Ok(meta::get_table_meta(conn, &table_id)?)
}
