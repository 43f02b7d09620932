//! Reshape: un-pivot (wide-to-long) or pivot (long-to-wide) into a new
//! derived table.
//!
//! Both directions are expressed as engine SQL: wide-to-long as one UNION
//! ALL arm per value var, long-to-wide as an engine PIVOT aggregated by
//! "first".

use crate::error::{TransformError, TransformResult};
use crate::txn;
use crate::types::{now_timestamp, ReshapeOutcome, ReshapeReport, ReshapeRequest};
use duckdb::Connection;
use gw_catalog::meta;
use gw_catalog::store::{lineage, oplog, tables, versions};
use gw_catalog::{CatalogDb, CatalogError};
use gw_core::{new_id, physical_name, quote_ident, OperationType, ReshapeDirection, SourceType};
use gw_engine::ops;
use serde_json::json;
use std::collections::HashSet;

/// Reshape a table into a new derived table with a shape report.
pub fn reshape_table(
    catalog: &CatalogDb,
    request: &ReshapeRequest,
) -> TransformResult<ReshapeOutcome> {
    txn::with_txn(catalog, |conn| reshape_into(conn, request))
}

fn validate_fields(fields: &[String], allowed: &HashSet<String>) -> TransformResult<()> {
    for field in fields {
        if !allowed.contains(field) {
            return Err(CatalogError::UnknownField {
                field: field.clone(),
            }
            .into());
        }
    }
    Ok(())
}

fn reshape_into(conn: &Connection, request: &ReshapeRequest) -> TransformResult<ReshapeOutcome> {
    let table = tables::get_table(conn, &request.table_id)?;
    let physical = versions::active_physical_name(conn, &request.table_id)?;
    let cols = ops::column_names(conn, &physical)?;
    let allowed: HashSet<String> = cols.iter().cloned().collect();

    validate_fields(&request.id_vars, &allowed)?;
    validate_fields(&request.value_vars, &allowed)?;
    validate_fields(&request.pivot_columns, &allowed)?;
    validate_fields(&request.pivot_values, &allowed)?;

    let rows_before = ops::count_rows(conn, &physical)?;
    let columns_before = cols.len() as i64;

    let select_sql = match request.direction {
        ReshapeDirection::WideToLong => wide_to_long_sql(request, &physical)?,
        ReshapeDirection::LongToWide => long_to_wide_sql(request, &physical)?,
    };

    let result_table_id = new_id("tbl");
    let result_name = request
        .result_name
        .clone()
        .unwrap_or_else(|| format!("reshape_{}", &table.name));
    let result_physical = physical_name(&result_table_id, 1);
    ops::create_table_as(conn, &result_physical, &select_sql, &[])?;

    let rows_after = ops::count_rows(conn, &result_physical)?;
    let columns_after = ops::column_names(conn, &result_physical)?.len() as i64;

    tables::insert_table(conn, &result_table_id, &result_name, SourceType::Derived, None)?;
    versions::insert_version(conn, &new_id("ver"), &result_table_id, 1, &result_physical, true)?;

    let edge = lineage::insert_lineage(
        conn,
        &result_table_id,
        &[request.table_id.clone()],
        OperationType::Reshape,
    )?;

    oplog::append_entry(
        conn,
        &oplog::NewLogEntry {
            op_type: OperationType::Reshape,
            table_id: &result_table_id,
            table_name: &result_name,
            params: json!({
                "sourceTableId": request.table_id,
                "direction": request.direction.as_str(),
                "idVars": request.id_vars,
                "valueVars": request.value_vars,
            }),
            result: Some(json!({ "rowsAfter": rows_after })),
            undoable: false,
            prev_version_id: None,
            new_version_id: None,
        },
    )?;

    let report = ReshapeReport {
        id: new_id("reshape"),
        source_table: request.table_id.clone(),
        result_table: result_table_id.clone(),
        direction: request.direction,
        id_vars: request.id_vars.clone(),
        value_vars: request.value_vars.clone(),
        rows_before,
        rows_after,
        columns_before,
        columns_after,
        timestamp: now_timestamp(),
    };

    log::info!(
        "reshaped {} ({}) -> {result_table_id} ({rows_after} rows)",
        request.table_id,
        request.direction.as_str()
    );
    Ok(ReshapeOutcome {
        table: meta::get_table_meta(conn, &result_table_id)?,
        report,
        lineage: vec![edge],
    })
}

/// One UNION ALL arm per value var: id vars, the var name as a literal, the
/// var's value.
fn wide_to_long_sql(request: &ReshapeRequest, physical: &str) -> TransformResult<String> {
    if request.value_vars.is_empty() {
        return Err(TransformError::MissingValueVars);
    }
    let variable_name = quote_ident(request.variable_name.as_deref().unwrap_or("variable"))?;
    let value_name = quote_ident(request.value_name.as_deref().unwrap_or("value"))?;

    let mut id_list = String::new();
    for id_var in &request.id_vars {
        id_list.push_str(&quote_ident(id_var)?);
        id_list.push_str(", ");
    }

    let mut arms = Vec::with_capacity(request.value_vars.len());
    for var in &request.value_vars {
        let literal = var.replace('\'', "''");
        arms.push(format!(
            "SELECT {id_list}'{literal}' AS {variable_name}, {} AS {value_name} FROM \"{physical}\"",
            quote_ident(var)?
        ));
    }
    Ok(arms.join(" UNION ALL "))
}

/// Engine PIVOT with first() aggregation, grouped by the id vars.
fn long_to_wide_sql(request: &ReshapeRequest, physical: &str) -> TransformResult<String> {
    if request.pivot_columns.is_empty() || request.pivot_values.is_empty() {
        return Err(TransformError::MissingPivotParams);
    }

    let mut on_cols = Vec::with_capacity(request.pivot_columns.len());
    for col in &request.pivot_columns {
        on_cols.push(quote_ident(col)?);
    }

    let mut using = Vec::with_capacity(request.pivot_values.len());
    for value in &request.pivot_values {
        let quoted = quote_ident(value)?;
        if request.pivot_values.len() == 1 {
            using.push(format!("first({quoted})"));
        } else {
            using.push(format!("first({quoted}) AS {quoted}"));
        }
    }

    let group_by = if request.id_vars.is_empty() {
        String::new()
    } else {
        let mut ids = Vec::with_capacity(request.id_vars.len());
        for id_var in &request.id_vars {
            ids.push(quote_ident(id_var)?);
        }
        format!(" GROUP BY {}", ids.join(", "))
    };

    Ok(format!(
        "PIVOT \"{physical}\" ON {} USING {}{group_by}",
        on_cols.join(", "),
        using.join(", ")
    ))
}
