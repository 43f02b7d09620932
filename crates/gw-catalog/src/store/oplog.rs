//! Operation log.
//!
//! Append-only. Undo never deletes an entry; it flips `undoable` to false on
//! the entry it consumed and walks backwards one entry per call.

use crate::error::{CatalogError, CatalogResult, CatalogResultExt};
use duckdb::Connection;
use gw_core::{new_id, OperationType};
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

/// One logged operation, as surfaced in history listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub op_type: OperationType,
    pub table_id: String,
    pub table_name: String,
    pub params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    pub timestamp: String,
    pub undoable: bool,
}

/// A new entry to append.
pub struct NewLogEntry<'a> {
    pub op_type: OperationType,
    pub table_id: &'a str,
    pub table_name: &'a str,
    pub params: Value,
    pub result: Option<Value>,
    pub undoable: bool,
    pub prev_version_id: Option<&'a str>,
    pub new_version_id: Option<&'a str>,
}

/// Append an entry and return its id.
pub fn append_entry(conn: &Connection, entry: &NewLogEntry<'_>) -> CatalogResult<String> {
    let id = new_id("op");
    conn.execute(
        "INSERT INTO gw_meta.operation_logs
           (id, type, table_id, table_name, params_json, result_json, undoable,
            prev_version_id, new_version_id)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        duckdb::params![
            id,
            entry.op_type.as_str(),
            entry.table_id,
            entry.table_name,
            entry.params.to_string(),
            entry.result.as_ref().map(Value::to_string),
            entry.undoable,
            entry.prev_version_id,
            entry.new_version_id,
        ],
    )
    .catalog_context("insert operation_logs")?;
    Ok(id)
}

/// Most recent `limit` entries, newest first.
pub fn history(conn: &Connection, limit: i64) -> CatalogResult<Vec<OperationLogEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, type, table_id, table_name, params_json, result_json,
                    CAST(created_at AS VARCHAR), undoable
             FROM gw_meta.operation_logs ORDER BY seq DESC LIMIT ?",
        )
        .catalog_context("prepare history")?;
    let raw: Vec<(
        String,
        String,
        String,
        String,
        String,
        Option<String>,
        String,
        bool,
    )> = stmt
        .query_map(duckdb::params![limit], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
            ))
        })
        .catalog_context("query history")?
        .collect::<Result<Vec<_>, _>>()
        .catalog_context("collect history")?;

    raw.into_iter()
        .map(
            |(id, op_type, table_id, table_name, params, result, timestamp, undoable)| {
                Ok(OperationLogEntry {
                    id,
                    op_type: OperationType::from_str(&op_type)?,
                    table_id,
                    table_name,
                    params: serde_json::from_str(&params).map_err(|e| {
                        CatalogError::validation(format!("corrupt log params: {e}"))
                    })?,
                    result: match result {
                        Some(json) => Some(serde_json::from_str(&json).map_err(|e| {
                            CatalogError::validation(format!("corrupt log result: {e}"))
                        })?),
                        None => None,
                    },
                    timestamp,
                    undoable,
                })
            },
        )
        .collect()
}

/// The most recent still-undoable clean entry, if any.
///
/// Returns (entry id, table id, previous version id).
pub fn latest_undoable_clean(
    conn: &Connection,
) -> CatalogResult<Option<(String, String, Option<String>)>> {
    let row = conn.query_row(
        "SELECT id, table_id, prev_version_id FROM gw_meta.operation_logs
         WHERE type = 'clean' AND undoable ORDER BY seq DESC LIMIT 1",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    );
    match row {
        Ok(entry) => Ok(Some(entry)),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).catalog_context("query latest undoable clean"),
    }
}

/// Flip an entry's `undoable` flag to false.
pub fn mark_not_undoable(conn: &Connection, op_log_id: &str) -> CatalogResult<()> {
    conn.execute(
        "UPDATE gw_meta.operation_logs SET undoable = false WHERE id = ?",
        duckdb::params![op_log_id],
    )
    .catalog_context("update operation_logs.undoable")?;
    Ok(())
}
