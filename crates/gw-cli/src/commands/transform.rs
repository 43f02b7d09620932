//! Transformation commands: clean, merge, reshape, undo.

use super::{parse_filters, print_json};
use crate::cli::{CleanArgs, MergeArgs, ReshapeArgs};
use anyhow::Result;
use gw_catalog::CatalogDb;
use gw_core::{CleanAction, JoinKind, ReshapeDirection};
use gw_transform::{CleanRequest, MergeRequest, ReshapeRequest};
use std::str::FromStr;

pub fn clean(args: &CleanArgs, catalog: &CatalogDb) -> Result<()> {
    let request = CleanRequest {
        table_id: args.table_id.clone(),
        action: CleanAction::from_str(&args.action)?,
        fields: args.fields.clone(),
        filters: parse_filters(&args.filters)?,
    };
    print_json(&gw_transform::clean_table(catalog, &request)?)
}

pub fn merge(args: &MergeArgs, catalog: &CatalogDb) -> Result<()> {
    let request = MergeRequest {
        left_table_id: args.left.clone(),
        right_table_id: args.right.clone(),
        left_keys: args.left_keys.clone(),
        right_keys: args.right_keys.clone(),
        join: JoinKind::from_str(&args.join)?,
        result_name: args.name.clone(),
    };
    print_json(&gw_transform::merge_tables(catalog, &request)?)
}

pub fn reshape(args: &ReshapeArgs, catalog: &CatalogDb) -> Result<()> {
    let request = ReshapeRequest {
        table_id: args.table_id.clone(),
        direction: ReshapeDirection::from_str(&args.direction)?,
        id_vars: args.id_vars.clone(),
        value_vars: args.value_vars.clone(),
        variable_name: args.variable_name.clone(),
        value_name: args.value_name.clone(),
        pivot_columns: args.pivot_columns.clone(),
        pivot_values: args.pivot_values.clone(),
        result_name: args.name.clone(),
    };
    print_json(&gw_transform::reshape_table(catalog, &request)?)
}

pub fn undo(catalog: &CatalogDb) -> Result<()> {
    match gw_transform::undo_last_clean(catalog)? {
        Some(outcome) => print_json(&outcome),
        None => {
            println!("nothing to undo");
            Ok(())
        }
    }
}
