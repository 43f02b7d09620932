//! Physical-table operations.
//!
//! Every function takes `&Connection` so callers can compose several
//! operations under one catalog transaction. Snapshot names passed in here
//! are storage-safe identifiers produced by `gw_core::physical_name`; user
//! supplied column names must already be quoted by the caller.

use crate::columns::ColumnInfo;
use crate::error::{EngineResult, EngineResultExt};
use crate::values::cell_to_json;
use duckdb::types::Value as DuckValue;
use duckdb::{params_from_iter, Connection};
use gw_core::quote_ident;
use serde_json::Value as JsonValue;
use std::path::Path;

/// Materialize a SELECT into a brand-new snapshot table.
pub fn create_table_as(
    conn: &Connection,
    physical: &str,
    select_sql: &str,
    params: &[DuckValue],
) -> EngineResult<()> {
    let sql = format!("CREATE TABLE {} AS {select_sql}", ident(physical));
    log::debug!("create snapshot {physical}");
    conn.execute(&sql, params_from_iter(params.iter()))
        .engine_context(&format!("create snapshot {physical}"))?;
    Ok(())
}

/// Materialize a CSV file as a snapshot via the engine's CSV reader.
pub fn import_csv(conn: &Connection, physical: &str, path: &Path) -> EngineResult<()> {
    let sql = format!(
        "CREATE TABLE {} AS SELECT * FROM read_csv_auto(?, header=true)",
        ident(physical)
    );
    conn.execute(&sql, duckdb::params![path.to_string_lossy().to_string()])
        .engine_context(&format!("import csv into {physical}"))?;
    Ok(())
}

/// Introspect a snapshot's columns (name, engine type, nullability).
pub fn table_columns(conn: &Connection, physical: &str) -> EngineResult<Vec<ColumnInfo>> {
    let sql = format!(
        "SELECT name, \"type\", \"notnull\" FROM pragma_table_info('{physical}')"
    );
    let mut stmt = conn
        .prepare(&sql)
        .engine_context(&format!("introspect {physical}"))?;
    let cols = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get::<_, String>(0)?,
                duck_type: row.get::<_, String>(1)?.to_uppercase(),
                nullable: !row.get::<_, bool>(2)?,
            })
        })
        .engine_context(&format!("introspect {physical}"))?
        .collect::<Result<Vec<_>, _>>()
        .engine_context(&format!("introspect {physical}"))?;
    Ok(cols)
}

/// Column names only, in table order.
pub fn column_names(conn: &Connection, physical: &str) -> EngineResult<Vec<String>> {
    Ok(table_columns(conn, physical)?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

/// Total row count of a snapshot.
pub fn count_rows(conn: &Connection, physical: &str) -> EngineResult<i64> {
    scalar_i64(
        conn,
        &format!("SELECT count(*) FROM {}", ident(physical)),
        &[],
    )
}

/// Row count matching a predicate.
pub fn count_where(
    conn: &Connection,
    physical: &str,
    predicate: &str,
    params: &[DuckValue],
) -> EngineResult<i64> {
    scalar_i64(
        conn,
        &format!("SELECT count(*) FROM {} WHERE {predicate}", ident(physical)),
        params,
    )
}

/// Run a scalar query returning an integer, mapping NULL to 0.
pub fn scalar_i64(conn: &Connection, sql: &str, params: &[DuckValue]) -> EngineResult<i64> {
    let value: Option<i64> = conn
        .query_row(sql, params_from_iter(params.iter()), |row| row.get(0))
        .engine_context("scalar query")?;
    Ok(value.unwrap_or(0))
}

/// Run a scalar query returning a float, preserving NULL.
pub fn scalar_f64(conn: &Connection, sql: &str, params: &[DuckValue]) -> EngineResult<Option<f64>> {
    conn.query_row(sql, params_from_iter(params.iter()), |row| row.get(0))
        .engine_context("scalar query")
}

/// Min and max of an integer column, or None when all values are NULL.
pub fn min_max_i64(
    conn: &Connection,
    physical: &str,
    column: &str,
) -> EngineResult<Option<(i64, i64)>> {
    let col = quoted(column)?;
    let sql = format!("SELECT min({col}), max({col}) FROM {}", ident(physical));
    let (min, max): (Option<i64>, Option<i64>) = conn
        .query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))
        .engine_context(&format!("min/max of {column}"))?;
    Ok(min.zip(max))
}

/// Execute a row-returning query and coerce every cell to JSON.
///
/// Rows are collected before column metadata is read; the engine driver
/// panics on `column_count` for unexecuted statements.
pub fn query_json_rows(
    conn: &Connection,
    sql: &str,
    params: &[DuckValue],
) -> EngineResult<Vec<JsonValue>> {
    let mut stmt = conn.prepare(sql).engine_context("prepare row query")?;
    let raw: Vec<Vec<JsonValue>> = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            let count = row.as_ref().column_count();
            Ok((0..count).map(|i| cell_to_json(row, i)).collect())
        })
        .engine_context("execute row query")?
        .collect::<Result<Vec<_>, _>>()
        .engine_context("collect row query")?;

    let names: Vec<String> = (0..stmt.column_count())
        .map(|i| {
            stmt.column_name(i)
                .map_or_else(|_| "?".to_string(), |v| v.to_string())
        })
        .collect();

    Ok(raw
        .into_iter()
        .map(|cells| {
            let mut obj = serde_json::Map::with_capacity(cells.len());
            for (name, cell) in names.iter().zip(cells) {
                obj.insert(name.clone(), cell);
            }
            JsonValue::Object(obj)
        })
        .collect())
}

/// Quote a snapshot name. Physical names are pre-sanitized, so this cannot
/// fail; kept as a local helper to keep call sites terse.
fn ident(physical: &str) -> String {
    format!("\"{physical}\"")
}

fn quoted(name: &str) -> EngineResult<String> {
    Ok(quote_ident(name)?)
}

#[cfg(test)]
#[path = "ops_test.rs"]
mod tests;
