//! Clean actions.
//!
//! A clean produces version v+1 of the same logical table and activates it.
//! Drop and fill operate on the whole snapshot; trim, lowercase, and
//! standardize-missing honor an optional row scope by passing out-of-scope
//! rows through unchanged. No lineage edge is written — clean is in-place
//! evolution, not derivation.

use crate::error::{TransformError, TransformResult};
use crate::scope::{build_scope, Scope};
use crate::txn;
use crate::types::{now_timestamp, CleanOutcome, CleanRequest};
use duckdb::types::Value as DuckValue;
use duckdb::Connection;
use gw_catalog::store::{oplog, tables, versions};
use gw_catalog::{CatalogDb, CatalogError};
use gw_core::{new_id, physical_name, quote_ident, CleanAction, OperationType};
use gw_engine::ops;
use gw_engine::ColumnInfo;
use serde_json::json;
use std::collections::HashSet;

/// Tokens (lowercased, trimmed) that standardize-missing maps to NULL, in
/// addition to the empty string.
const MISSING_TOKENS: &[&str] = &[
    "na", "n/a", "null", "none", "nan", "-", "—", "--", "?", "9999",
];

fn missing_token_list() -> String {
    MISSING_TOKENS
        .iter()
        .map(|t| format!("'{t}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply a clean action, producing and activating version v+1.
pub fn clean_table(catalog: &CatalogDb, request: &CleanRequest) -> TransformResult<CleanOutcome> {
    txn::with_txn(catalog, |conn| clean_into(conn, request))
}

fn clean_into(conn: &Connection, request: &CleanRequest) -> TransformResult<CleanOutcome> {
    let table = tables::get_table(conn, &request.table_id)?;
    let prev = versions::active_version(conn, &request.table_id)?;
    let cols = ops::table_columns(conn, &prev.physical_name)?;

    let allowed: HashSet<String> = cols.iter().map(|c| c.name.clone()).collect();
    for field in &request.fields {
        if !allowed.contains(field) {
            return Err(CatalogError::UnknownField {
                field: field.clone(),
            }
            .into());
        }
    }
    let scope = build_scope(&request.filters, &allowed)?;

    let new_version = versions::next_version_number(conn, &request.table_id)?;
    let new_physical = physical_name(&request.table_id, new_version);

    let (select_exprs, params, where_sql) = build_select(conn, request, &prev.physical_name, &cols, &scope)?;
    let select_sql = format!(
        "SELECT {} FROM \"{}\"{}",
        select_exprs.join(", "),
        prev.physical_name,
        where_sql
    );
    ops::create_table_as(conn, &new_physical, &select_sql, &params)?;

    let new_version_id = new_id("ver");
    versions::insert_version(
        conn,
        &new_version_id,
        &request.table_id,
        new_version,
        &new_physical,
        false,
    )?;
    versions::activate_version(conn, &request.table_id, &new_version_id)?;
    tables::set_dirty(conn, &request.table_id, true)?;

    let operation_id = oplog::append_entry(
        conn,
        &oplog::NewLogEntry {
            op_type: OperationType::Clean,
            table_id: &request.table_id,
            table_name: &table.name,
            params: json!({ "action": request.action.as_str(), "fields": request.fields }),
            result: Some(json!({ "newVersion": new_version })),
            undoable: true,
            prev_version_id: Some(&prev.id),
            new_version_id: Some(&new_version_id),
        },
    )?;
    versions::link_op_log(conn, &new_version_id, &operation_id)?;

    log::info!(
        "cleaned {} ({}) -> v{new_version}",
        request.table_id,
        request.action
    );
    Ok(CleanOutcome {
        operation_id,
        table_id: request.table_id.clone(),
        new_version,
        timestamp: now_timestamp(),
    })
}

/// Build the projection, bound parameters, and optional WHERE clause for
/// the new snapshot.
fn build_select(
    conn: &Connection,
    request: &CleanRequest,
    physical: &str,
    cols: &[ColumnInfo],
    scope: &Scope,
) -> TransformResult<(Vec<String>, Vec<DuckValue>, String)> {
    let mut select_exprs = Vec::with_capacity(cols.len() + 1);
    let mut params: Vec<DuckValue> = Vec::new();
    let mut where_sql = String::new();

    match request.action {
        CleanAction::DropMissing => {
            if !scope.is_unscoped() {
                // Scoped drop-missing would need a row-wise merge of kept
                // and dropped sets; not supported.
                return Err(TransformError::ScopedApplyUnsupported {
                    action: request.action,
                });
            }
            let mut predicates = Vec::with_capacity(request.fields.len());
            for field in &request.fields {
                predicates.push(format!("{} IS NOT NULL", quote_ident(field)?));
            }
            if !predicates.is_empty() {
                where_sql = format!(" WHERE {}", predicates.join(" AND "));
            }
            for col in cols {
                select_exprs.push(quote_ident(&col.name)?);
            }
        }
        CleanAction::FillMean | CleanAction::FillMedian => {
            if !scope.is_unscoped() {
                return Err(TransformError::ScopedApplyUnsupported {
                    action: request.action,
                });
            }
            let agg = if request.action == CleanAction::FillMean {
                "avg"
            } else {
                "median"
            };
            for col in cols {
                let quoted = quote_ident(&col.name)?;
                if !request.fields.contains(&col.name) {
                    select_exprs.push(quoted);
                    continue;
                }
                if !col.is_numeric() {
                    return Err(TransformError::NonNumericFill {
                        action: request.action,
                        field: col.name.clone(),
                    });
                }
                // Aggregate over the whole active snapshot.
                let fill = ops::scalar_f64(
                    conn,
                    &format!("SELECT {agg}({quoted}) FROM \"{physical}\""),
                    &[],
                )?;
                params.push(fill.map(DuckValue::Double).unwrap_or(DuckValue::Null));
                select_exprs.push(format!("coalesce({quoted}, ?) AS {quoted}"));
            }
        }
        CleanAction::Trim | CleanAction::Lowercase | CleanAction::StandardizeMissing => {
            for col in cols {
                let quoted = quote_ident(&col.name)?;
                if !request.fields.contains(&col.name) {
                    select_exprs.push(quoted);
                    continue;
                }
                let expr = match request.action {
                    CleanAction::Trim => format!("trim({quoted})"),
                    CleanAction::Lowercase => format!("lower(CAST({quoted} AS VARCHAR))"),
                    _ => {
                        let token = format!("lower(trim(CAST({quoted} AS VARCHAR)))");
                        format!(
                            "CASE WHEN {quoted} IS NOT NULL AND ({token} = '' OR {token} IN ({})) \
                             THEN NULL ELSE {quoted} END",
                            missing_token_list()
                        )
                    }
                };
                if scope.is_unscoped() {
                    select_exprs.push(format!("{expr} AS {quoted}"));
                } else {
                    select_exprs.push(format!(
                        "CASE WHEN {} THEN {expr} ELSE {quoted} END AS {quoted}",
                        scope.predicate
                    ));
                    params.extend(scope.params.iter().cloned());
                }
            }
        }
    }

    Ok((select_exprs, params, where_sql))
}
