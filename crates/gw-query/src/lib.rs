//! gw-query - Query façade for Gridworks
//!
//! Filter, sort, and paginate rows of a table's active version. Every
//! referenced field is validated against the live columns; filters combine
//! conjunctively. Heavier analysis belongs to the engine, not here.

mod filter;

pub use filter::{build_where, WhereClause};

use duckdb::types::Value as DuckValue;
use gw_catalog::store::versions;
use gw_catalog::{CatalogDb, CatalogResult};
use gw_core::{quote_ident, Filter, SortSpec};
use gw_engine::ops;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// One page of rows plus the total match count before pagination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    pub rows: Vec<JsonValue>,
    pub total: i64,
}

/// Query rows of the active version.
pub fn query_rows(
    catalog: &CatalogDb,
    table_id: &str,
    offset: i64,
    limit: i64,
    filters: &[Filter],
    sort: &[SortSpec],
) -> CatalogResult<QueryPage> {
    let conn = catalog.conn();
    let physical = versions::active_physical_name(conn, table_id)?;
    let allowed: HashSet<String> = ops::column_names(conn, &physical)?.into_iter().collect();

    let clause = build_where(filters, &allowed)?;
    let where_sql = if clause.predicate.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clause.predicate)
    };

    let mut order_parts = Vec::with_capacity(sort.len());
    for spec in sort {
        if !allowed.contains(&spec.field) {
            return Err(gw_catalog::CatalogError::UnknownField {
                field: spec.field.clone(),
            });
        }
        order_parts.push(format!(
            "{} {}",
            quote_ident(&spec.field)?,
            spec.direction.as_str()
        ));
    }
    let order_sql = if order_parts.is_empty() {
        String::new()
    } else {
        format!(" ORDER BY {}", order_parts.join(", "))
    };

    let total = ops::scalar_i64(
        conn,
        &format!("SELECT count(*) FROM \"{physical}\"{where_sql}"),
        &clause.params,
    )?;

    let mut params = clause.params;
    params.push(DuckValue::BigInt(limit));
    params.push(DuckValue::BigInt(offset));
    let rows = ops::query_json_rows(
        conn,
        &format!("SELECT * FROM \"{physical}\"{where_sql}{order_sql} LIMIT ? OFFSET ?"),
        &params,
    )?;

    Ok(QueryPage { rows, total })
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
