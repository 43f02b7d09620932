//! WHERE-clause builder for the full filter operator set.

use duckdb::types::Value as DuckValue;
use gw_catalog::{CatalogError, CatalogResult};
use gw_core::{quote_ident, Filter, FilterOp};
use gw_engine::values::json_to_param;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// A compiled WHERE clause: predicate text (empty for no filters) plus
/// bound parameters.
pub struct WhereClause {
    pub predicate: String,
    pub params: Vec<DuckValue>,
}

/// Compile filters into a conjunctive predicate, validating fields and
/// payload shapes.
pub fn build_where(filters: &[Filter], allowed: &HashSet<String>) -> CatalogResult<WhereClause> {
    let mut parts = Vec::with_capacity(filters.len());
    let mut params = Vec::new();

    for filter in filters {
        if !allowed.contains(&filter.field) {
            return Err(CatalogError::UnknownField {
                field: filter.field.clone(),
            });
        }
        let quoted = quote_ident(&filter.field)?;
        match filter.op {
            FilterOp::IsNull => parts.push(format!("{quoted} IS NULL")),
            FilterOp::NotNull => parts.push(format!("{quoted} IS NOT NULL")),
            FilterOp::Contains => {
                let needle = filter
                    .value
                    .as_ref()
                    .and_then(JsonValue::as_str)
                    .unwrap_or_default();
                parts.push(format!("{quoted} ILIKE ?"));
                params.push(DuckValue::Text(format!("%{needle}%")));
            }
            FilterOp::In => {
                let Some(JsonValue::Array(values)) = filter.value.as_ref() else {
                    return Err(CatalogError::validation("in requires a list of values"));
                };
                if values.is_empty() {
                    // An empty membership list matches nothing.
                    parts.push("false".to_string());
                    continue;
                }
                let placeholders = vec!["?"; values.len()].join(", ");
                parts.push(format!("{quoted} IN ({placeholders})"));
                params.extend(values.iter().map(json_to_param));
            }
            FilterOp::Between => {
                let bounds = match filter.value.as_ref() {
                    Some(JsonValue::Array(v)) if v.len() == 2 => v,
                    _ => {
                        return Err(CatalogError::validation("between requires [low, high]"));
                    }
                };
                parts.push(format!("{quoted} BETWEEN ? AND ?"));
                params.push(json_to_param(&bounds[0]));
                params.push(json_to_param(&bounds[1]));
            }
            op => {
                // Remaining operators are simple binary comparisons.
                let sql_op = op.comparison_sql().ok_or_else(|| {
                    CatalogError::validation(format!("unsupported op: {}", op.as_str()))
                })?;
                parts.push(format!("{quoted} {sql_op} ?"));
                params.push(
                    filter
                        .value
                        .as_ref()
                        .map(json_to_param)
                        .unwrap_or(DuckValue::Null),
                );
            }
        }
    }

    Ok(WhereClause {
        predicate: parts.join(" AND "),
        params,
    })
}
