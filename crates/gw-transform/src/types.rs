//! Request payloads and reports for the transformation engine.

use gw_catalog::meta::TableMeta;
use gw_catalog::store::lineage::LineageEdge;
use gw_core::{CleanAction, Filter, JoinKind, ReshapeDirection};
use serde::{Deserialize, Serialize};

/// A clean request over one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanRequest {
    pub table_id: String,
    pub action: CleanAction,
    pub fields: Vec<String>,
    /// Optional row scope; out-of-scope rows pass through unchanged.
    #[serde(default)]
    pub filters: Vec<Filter>,
}

/// Result of a clean operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanOutcome {
    pub operation_id: String,
    pub table_id: String,
    pub new_version: i64,
    pub timestamp: String,
}

/// A merge request joining two tables into a new derived table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub left_table_id: String,
    pub right_table_id: String,
    pub left_keys: Vec<String>,
    pub right_keys: Vec<String>,
    #[serde(default = "default_join")]
    pub join: JoinKind,
    #[serde(default)]
    pub result_name: Option<String>,
}

fn default_join() -> JoinKind {
    JoinKind::Full
}

/// Row counts of the merge inputs.
#[derive(Debug, Clone, Serialize)]
pub struct RowsBefore {
    pub left: i64,
    pub right: i64,
}

/// Join accounting for a merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    pub id: String,
    pub left_table: String,
    pub right_table: String,
    pub result_table: String,
    pub join_type: JoinKind,
    /// `left=right` key pairs, in order.
    pub key_fields: Vec<String>,
    pub rows_before: RowsBefore,
    pub rows_after: i64,
    pub matched_rows: i64,
    pub unmatched_left: i64,
    pub unmatched_right: i64,
    pub timestamp: String,
}

/// Result of a merge: the new table, its report, and the lineage written.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    pub table: TableMeta,
    pub report: MergeReport,
    pub lineage: Vec<LineageEdge>,
}

/// A reshape request over one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReshapeRequest {
    pub table_id: String,
    pub direction: ReshapeDirection,
    #[serde(default)]
    pub id_vars: Vec<String>,
    /// Wide-to-long: the columns un-pivoted into rows.
    #[serde(default)]
    pub value_vars: Vec<String>,
    /// Wide-to-long: output column holding the source column name.
    #[serde(default)]
    pub variable_name: Option<String>,
    /// Wide-to-long: output column holding the value.
    #[serde(default)]
    pub value_name: Option<String>,
    /// Long-to-wide: columns whose distinct values become new columns.
    #[serde(default)]
    pub pivot_columns: Vec<String>,
    /// Long-to-wide: columns aggregated into the pivoted cells.
    #[serde(default)]
    pub pivot_values: Vec<String>,
    #[serde(default)]
    pub result_name: Option<String>,
}

/// Shape accounting for a reshape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReshapeReport {
    pub id: String,
    pub source_table: String,
    pub result_table: String,
    pub direction: ReshapeDirection,
    pub id_vars: Vec<String>,
    pub value_vars: Vec<String>,
    pub rows_before: i64,
    pub rows_after: i64,
    pub columns_before: i64,
    pub columns_after: i64,
    pub timestamp: String,
}

/// Result of a reshape: the new table, its report, and the lineage written.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReshapeOutcome {
    pub table: TableMeta,
    pub report: ReshapeReport,
    pub lineage: Vec<LineageEdge>,
}

/// Result of undoing the most recent undoable clean.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoOutcome {
    pub undone_operation_id: String,
    pub table_id: String,
}

/// RFC 3339 timestamp for reports.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
