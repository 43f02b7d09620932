//! Schema commands: primary keys, relations, and inference refresh.

use super::print_json;
use crate::cli::{CreateRelationArgs, RefreshArgs, RelationReportArgs, SetPkArgs};
use anyhow::Result;
use gw_catalog::store::{keys, relations, tables};
use gw_catalog::{report, CatalogDb};
use gw_core::Cardinality;
use std::str::FromStr;

pub fn set_pk(args: &SetPkArgs, catalog: &CatalogDb) -> Result<()> {
    catalog.transaction(|conn| keys::declare_primary_key(conn, &args.table_id, &args.fields))?;
    println!("primary key set on {}", args.table_id);
    Ok(())
}

pub fn create_relation(args: &CreateRelationArgs, catalog: &CatalogDb) -> Result<()> {
    let edge = catalog.transaction(|conn| {
        relations::create_relation(
            conn,
            &args.fk_table,
            &args.fk_fields,
            &args.pk_table,
            &args.pk_fields,
            Cardinality::from_str(&args.cardinality).map_err(gw_catalog::CatalogError::from)?,
        )
    })?;
    print_json(&edge)
}

pub fn relation_report(args: &RelationReportArgs, catalog: &CatalogDb) -> Result<()> {
    print_json(&report::relation_report(catalog.conn(), &args.relation_id)?)
}

/// Re-run profiling and key inference (one table or all), then relation
/// inference. Mutations never cascade this; the caller decides when facts
/// are stale.
pub fn refresh(args: &RefreshArgs, catalog: &CatalogDb) -> Result<()> {
    let edges = catalog.transaction(|conn| {
        let table_ids = match &args.table_id {
            Some(id) => vec![id.clone()],
            None => tables::list_table_ids(conn)?,
        };
        for table_id in &table_ids {
            gw_infer::refresh_profiles(conn, table_id)?;
            gw_infer::infer_primary_key(conn, table_id)?;
        }
        gw_infer::refresh_inferred_relations(conn, args.threshold)
    })?;
    print_json(&edges)
}
