//! Read-only inspection commands: tables, files, history, lineage, relations.

use super::print_json;
use crate::cli::TableArgs;
use anyhow::Result;
use gw_catalog::store::{
    files as files_store, lineage as lineage_store, oplog, relations as relations_store,
};
use gw_catalog::{meta, CatalogDb};

/// History listings cap, newest first.
const HISTORY_LIMIT: i64 = 200;

pub fn tables(catalog: &CatalogDb) -> Result<()> {
    print_json(&meta::list_tables(catalog.conn())?)
}

pub fn table(args: &TableArgs, catalog: &CatalogDb) -> Result<()> {
    print_json(&meta::get_table_meta(catalog.conn(), &args.table_id)?)
}

pub fn files(catalog: &CatalogDb) -> Result<()> {
    print_json(&files_store::list_files(catalog.conn())?)
}

pub fn history(catalog: &CatalogDb) -> Result<()> {
    print_json(&oplog::history(catalog.conn(), HISTORY_LIMIT)?)
}

pub fn lineage(catalog: &CatalogDb) -> Result<()> {
    print_json(&lineage_store::list_lineage(catalog.conn())?)
}

pub fn relations(catalog: &CatalogDb) -> Result<()> {
    print_json(&relations_store::list_relations(catalog.conn())?)
}
