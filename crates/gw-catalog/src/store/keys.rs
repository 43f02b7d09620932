//! Explicit and inferred primary keys.
//!
//! Explicit declarations always win: an inferred row is only ever written
//! for tables without one, and inference clears its own stale rows.

use crate::error::{CatalogError, CatalogResult, CatalogResultExt};
use crate::store::versions;
use duckdb::Connection;
use gw_engine::ops;

fn fields_for(
    conn: &Connection,
    table: &str,
    table_id: &str,
) -> CatalogResult<Option<Vec<String>>> {
    let row: Option<String> = match conn.query_row(
        &format!("SELECT fields_json FROM gw_meta.{table} WHERE table_id = ?"),
        duckdb::params![table_id],
        |row| row.get(0),
    ) {
        Ok(json) => Some(json),
        Err(duckdb::Error::QueryReturnedNoRows) => None,
        Err(e) => return Err(e).catalog_context("query primary key"),
    };
    match row {
        Some(json) => {
            let fields: Vec<String> = serde_json::from_str(&json).map_err(|e| {
                crate::error::CatalogError::validation(format!("corrupt pk fields: {e}"))
            })?;
            Ok(Some(fields))
        }
        None => Ok(None),
    }
}

/// Explicitly declared primary key fields, if any.
pub fn explicit_pk(conn: &Connection, table_id: &str) -> CatalogResult<Option<Vec<String>>> {
    fields_for(conn, "primary_keys", table_id)
}

/// Inferred primary key fields, if any.
pub fn inferred_pk(conn: &Connection, table_id: &str) -> CatalogResult<Option<Vec<String>>> {
    fields_for(conn, "primary_keys_inferred", table_id)
}

/// Effective primary key: explicit if declared, else inferred.
pub fn effective_pk(conn: &Connection, table_id: &str) -> CatalogResult<Option<Vec<String>>> {
    if let Some(fields) = explicit_pk(conn, table_id)? {
        return Ok(Some(fields));
    }
    inferred_pk(conn, table_id)
}

/// Declare an explicit primary key, replacing any previous declaration.
///
/// Also drops any inferred row for the table: an inferred key is never
/// persisted alongside an explicit one.
pub fn set_explicit_pk(conn: &Connection, table_id: &str, fields: &[String]) -> CatalogResult<()> {
    let json = serde_json::to_string(fields)
        .map_err(|e| crate::error::CatalogError::validation(format!("pk fields: {e}")))?;
    conn.execute(
        "INSERT OR REPLACE INTO gw_meta.primary_keys (table_id, fields_json) VALUES (?, ?)",
        duckdb::params![table_id, json],
    )
    .catalog_context("upsert primary_keys")?;
    clear_inferred_pk(conn, table_id)?;
    Ok(())
}

/// Record an inferred primary key, replacing any previous inference.
pub fn upsert_inferred_pk(
    conn: &Connection,
    table_id: &str,
    fields: &[String],
) -> CatalogResult<()> {
    let json = serde_json::to_string(fields)
        .map_err(|e| crate::error::CatalogError::validation(format!("pk fields: {e}")))?;
    conn.execute(
        "INSERT OR REPLACE INTO gw_meta.primary_keys_inferred (table_id, fields_json) VALUES (?, ?)",
        duckdb::params![table_id, json],
    )
    .catalog_context("upsert primary_keys_inferred")?;
    Ok(())
}

/// Declare an explicit primary key after validating the fields against the
/// active version's columns.
pub fn declare_primary_key(
    conn: &Connection,
    table_id: &str,
    fields: &[String],
) -> CatalogResult<()> {
    let physical = versions::active_physical_name(conn, table_id)?;
    let columns = ops::column_names(conn, &physical)?;
    for field in fields {
        if !columns.contains(field) {
            return Err(CatalogError::UnknownField {
                field: field.clone(),
            });
        }
    }
    set_explicit_pk(conn, table_id, fields)
}

/// Remove any inferred primary key row for a table.
pub fn clear_inferred_pk(conn: &Connection, table_id: &str) -> CatalogResult<()> {
    conn.execute(
        "DELETE FROM gw_meta.primary_keys_inferred WHERE table_id = ?",
        duckdb::params![table_id],
    )
    .catalog_context("delete primary_keys_inferred")?;
    Ok(())
}
