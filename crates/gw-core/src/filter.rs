//! Row filter and sort payloads shared by the query façade and scoped clean.

use crate::types::{FilterOp, SortDirection};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One conjunctive filter clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    /// Column the filter applies to; validated against the active version.
    pub field: String,
    pub op: FilterOp,
    /// Scalar for comparisons, array for `in`/`between`, absent for null checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }
}

/// One sort clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}
