//! Column profiler.
//!
//! Recomputes per-column facts from the active version's data and fully
//! replaces the stored profile rows. Missingness is type-aware: text counts
//! blank-after-trim as missing, floating types count NaN.

use duckdb::Connection;
use gw_catalog::store::profiles::{self, ColumnProfile};
use gw_catalog::store::versions;
use gw_catalog::CatalogResult;
use gw_core::quote_ident;
use gw_engine::ops;
use gw_engine::ColumnInfo;

/// Predicate matching missing values of a column.
fn missing_predicate(quoted: &str, col: &ColumnInfo) -> String {
    if col.is_text() {
        format!("{quoted} IS NULL OR trim(CAST({quoted} AS VARCHAR)) = ''")
    } else if col.is_floating() {
        format!("{quoted} IS NULL OR isnan({quoted})")
    } else {
        format!("{quoted} IS NULL")
    }
}

/// Expression normalizing a column for distinct counting: missing forms of
/// text and floats collapse to NULL so they don't count as values.
fn distinct_value_expr(quoted: &str, col: &ColumnInfo) -> String {
    if col.is_text() {
        format!("nullif(trim(CAST({quoted} AS VARCHAR)), '')")
    } else if col.is_floating() {
        format!("CASE WHEN {quoted} IS NULL OR isnan({quoted}) THEN NULL ELSE {quoted} END")
    } else {
        quoted.to_string()
    }
}

/// Recompute and replace all profile rows for a table's active version.
pub fn refresh_profiles(conn: &Connection, table_id: &str) -> CatalogResult<Vec<ColumnProfile>> {
    let physical = versions::active_physical_name(conn, table_id)?;
    let row_count = ops::count_rows(conn, &physical)?;
    let cols = ops::table_columns(conn, &physical)?;
    log::debug!("profiling {table_id}: {} columns, {row_count} rows", cols.len());

    let mut computed = Vec::with_capacity(cols.len());
    for col in &cols {
        let quoted = quote_ident(&col.name)?;

        let missing_count =
            ops::count_where(conn, &physical, &missing_predicate(&quoted, col), &[])?;
        let distinct_count = ops::scalar_i64(
            conn,
            &format!(
                "SELECT count(DISTINCT {}) FROM \"{physical}\"",
                distinct_value_expr(&quoted, col)
            ),
            &[],
        )?;

        let inferred_nullable = missing_count > 0;
        let is_unique = row_count > 0 && missing_count == 0 && distinct_count == row_count;

        // Identity: integer, unique, and a contiguous range starting at 0
        // or 1 spanning exactly the row count.
        let mut is_identity = false;
        if is_unique && col.is_integer() && row_count > 0 {
            if let Some((min, max)) = ops::min_max_i64(conn, &physical, &col.name)? {
                if (min == 0 || min == 1) && max - min + 1 == row_count {
                    is_identity = true;
                }
            }
        }

        computed.push(ColumnProfile {
            column_name: col.name.clone(),
            row_count,
            missing_count,
            distinct_count,
            is_unique,
            is_identity,
            inferred_nullable,
        });
    }

    profiles::replace_profiles(conn, table_id, &computed)?;
    Ok(computed)
}

#[cfg(test)]
#[path = "profiler_test.rs"]
mod tests;
