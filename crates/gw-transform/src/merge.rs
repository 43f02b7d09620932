//! Merge: two-input join producing a new derived table.
//!
//! Output columns are all left columns unprefixed plus all right columns,
//! right names prefixed `right_` only on collision. A `_merge` membership
//! marker (1 = left-only, 2 = right-only, 3 = both) supports the join
//! report.

use crate::error::{TransformError, TransformResult};
use crate::txn;
use crate::types::{now_timestamp, MergeOutcome, MergeReport, MergeRequest, RowsBefore};
use duckdb::Connection;
use gw_catalog::meta;
use gw_catalog::store::{lineage, oplog, tables, versions};
use gw_catalog::{CatalogDb, CatalogError};
use gw_core::{new_id, physical_name, quote_ident, OperationType, SourceType};
use gw_engine::ops;
use serde_json::json;

/// Short id fragment for default result names.
fn short_id(id: &str) -> &str {
    &id[..id.len().min(12)]
}

/// Join two tables into a new derived table with a membership report.
pub fn merge_tables(catalog: &CatalogDb, request: &MergeRequest) -> TransformResult<MergeOutcome> {
    txn::with_txn(catalog, |conn| merge_into(conn, request))
}

fn merge_into(conn: &Connection, request: &MergeRequest) -> TransformResult<MergeOutcome> {
    if request.left_keys.len() != request.right_keys.len() {
        return Err(TransformError::InvalidMergeKeys {
            message: "leftKeys and rightKeys must have the same length".to_string(),
        });
    }
    if request.left_keys.is_empty() {
        return Err(TransformError::InvalidMergeKeys {
            message: "at least one key pair is required".to_string(),
        });
    }

    tables::get_table(conn, &request.left_table_id)?;
    tables::get_table(conn, &request.right_table_id)?;
    let left_physical = versions::active_physical_name(conn, &request.left_table_id)?;
    let right_physical = versions::active_physical_name(conn, &request.right_table_id)?;

    let left_cols = ops::column_names(conn, &left_physical)?;
    let right_cols = ops::column_names(conn, &right_physical)?;
    for key in &request.left_keys {
        if !left_cols.contains(key) {
            return Err(CatalogError::UnknownField { field: key.clone() }.into());
        }
    }
    for key in &request.right_keys {
        if !right_cols.contains(key) {
            return Err(CatalogError::UnknownField { field: key.clone() }.into());
        }
    }

    let mut join_parts = Vec::with_capacity(request.left_keys.len());
    for (l, r) in request.left_keys.iter().zip(&request.right_keys) {
        join_parts.push(format!("l.{} = r.{}", quote_ident(l)?, quote_ident(r)?));
    }
    let join_pred = join_parts.join(" AND ");

    let result_table_id = new_id("tbl");
    let result_name = request.result_name.clone().unwrap_or_else(|| {
        format!(
            "merge_{}_{}",
            short_id(&request.left_table_id),
            short_id(&request.right_table_id)
        )
    });
    let result_physical = physical_name(&result_table_id, 1);

    // Right columns are renamed right_<name> on collision only; dedupe the
    // final list so a pre-existing right_<name> column cannot collide too.
    let mut out_names: Vec<String> = left_cols.clone();
    for col in &right_cols {
        out_names.push(if left_cols.contains(col) {
            format!("right_{col}")
        } else {
            col.clone()
        });
    }
    let out_names = gw_core::dedupe_names(out_names);

    let mut select_list = Vec::with_capacity(out_names.len() + 1);
    for (col, out_name) in left_cols.iter().zip(&out_names) {
        select_list.push(format!("l.{} AS {}", quote_ident(col)?, quote_ident(out_name)?));
    }
    for (col, out_name) in right_cols.iter().zip(&out_names[left_cols.len()..]) {
        select_list.push(format!("r.{} AS {}", quote_ident(col)?, quote_ident(out_name)?));
    }
    select_list.push(
        "CASE \
           WHEN l.__in_left = 1 AND r.__in_right = 1 THEN 3 \
           WHEN l.__in_left = 1 AND r.__in_right IS NULL THEN 1 \
           WHEN l.__in_left IS NULL AND r.__in_right = 1 THEN 2 \
           ELSE NULL \
         END AS _merge"
            .to_string(),
    );

    let select_sql = format!(
        "SELECT {} \
         FROM (SELECT *, 1 AS __in_left FROM \"{left_physical}\") l \
         {} JOIN (SELECT *, 1 AS __in_right FROM \"{right_physical}\") r ON {join_pred}",
        select_list.join(", "),
        request.join.sql(),
    );
    ops::create_table_as(conn, &result_physical, &select_sql, &[])?;

    tables::insert_table(conn, &result_table_id, &result_name, SourceType::Derived, None)?;
    versions::insert_version(conn, &new_id("ver"), &result_table_id, 1, &result_physical, true)?;

    let edge = lineage::insert_lineage(
        conn,
        &result_table_id,
        &[
            request.left_table_id.clone(),
            request.right_table_id.clone(),
        ],
        OperationType::Merge,
    )?;

    let rows_before = RowsBefore {
        left: ops::count_rows(conn, &left_physical)?,
        right: ops::count_rows(conn, &right_physical)?,
    };
    let rows_after = ops::count_rows(conn, &result_physical)?;
    let matched_rows = ops::count_where(conn, &result_physical, "_merge = 3", &[])?;
    let unmatched_left = ops::count_where(conn, &result_physical, "_merge = 1", &[])?;
    let unmatched_right = ops::count_where(conn, &result_physical, "_merge = 2", &[])?;

    oplog::append_entry(
        conn,
        &oplog::NewLogEntry {
            op_type: OperationType::Merge,
            table_id: &result_table_id,
            table_name: &result_name,
            params: json!({
                "leftTableId": request.left_table_id,
                "rightTableId": request.right_table_id,
                "leftKeys": request.left_keys,
                "rightKeys": request.right_keys,
                "join": request.join.as_str(),
            }),
            result: Some(json!({ "rowsAfter": rows_after })),
            undoable: false,
            prev_version_id: None,
            new_version_id: None,
        },
    )?;

    let report = MergeReport {
        id: new_id("merge"),
        left_table: request.left_table_id.clone(),
        right_table: request.right_table_id.clone(),
        result_table: result_table_id.clone(),
        join_type: request.join,
        key_fields: request
            .left_keys
            .iter()
            .zip(&request.right_keys)
            .map(|(l, r)| format!("{l}={r}"))
            .collect(),
        rows_before,
        rows_after,
        matched_rows,
        unmatched_left,
        unmatched_right,
        timestamp: now_timestamp(),
    };

    log::info!(
        "merged {} + {} -> {result_table_id} ({rows_after} rows)",
        request.left_table_id,
        request.right_table_id
    );
    Ok(MergeOutcome {
        table: meta::get_table_meta(conn, &result_table_id)?,
        report,
        lineage: vec![edge],
    })
}
