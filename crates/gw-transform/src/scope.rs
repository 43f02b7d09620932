//! Row-scope predicate builder for scoped clean actions.
//!
//! Clean accepts a restricted operator subset (eq, neq, contains, isnull,
//! notnull); the full operator set lives in the query façade. Scope filters
//! combine conjunctively.

use crate::error::{TransformError, TransformResult};
use duckdb::types::Value as DuckValue;
use gw_catalog::CatalogError;
use gw_core::{quote_ident, Filter, FilterOp};
use gw_engine::values::json_to_param;
use std::collections::HashSet;

/// A compiled scope: SQL predicate plus its bound parameters.
pub(crate) struct Scope {
    pub predicate: String,
    pub params: Vec<DuckValue>,
}

impl Scope {
    pub fn is_unscoped(&self) -> bool {
        self.params.is_empty() && self.predicate == "true"
    }
}

/// Compile scope filters into a predicate, validating fields and operators.
pub(crate) fn build_scope(filters: &[Filter], allowed: &HashSet<String>) -> TransformResult<Scope> {
    if filters.is_empty() {
        return Ok(Scope {
            predicate: "true".to_string(),
            params: Vec::new(),
        });
    }

    let mut parts = Vec::with_capacity(filters.len());
    let mut params = Vec::new();
    for filter in filters {
        if !allowed.contains(&filter.field) {
            return Err(CatalogError::UnknownField {
                field: filter.field.clone(),
            }
            .into());
        }
        let quoted = quote_ident(&filter.field)?;
        match filter.op {
            FilterOp::IsNull => parts.push(format!("{quoted} IS NULL")),
            FilterOp::NotNull => parts.push(format!("{quoted} IS NOT NULL")),
            FilterOp::Contains => {
                parts.push(format!("{quoted} ILIKE ?"));
                let needle = filter
                    .value
                    .as_ref()
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                params.push(DuckValue::Text(format!("%{needle}%")));
            }
            FilterOp::Eq | FilterOp::Neq => {
                let op = if filter.op == FilterOp::Eq { "=" } else { "!=" };
                parts.push(format!("{quoted} {op} ?"));
                params.push(
                    filter
                        .value
                        .as_ref()
                        .map(json_to_param)
                        .unwrap_or(DuckValue::Null),
                );
            }
            other => {
                return Err(TransformError::UnsupportedScopeOp {
                    op: other.as_str().to_string(),
                })
            }
        }
    }

    Ok(Scope {
        predicate: format!("({})", parts.join(" AND ")),
        params,
    })
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
