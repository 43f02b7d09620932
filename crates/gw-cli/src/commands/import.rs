//! Import command.

use super::print_json;
use crate::cli::ImportArgs;
use anyhow::{Context, Result};
use gw_catalog::CatalogDb;
use std::path::Path;

pub fn execute(args: &ImportArgs, catalog: &CatalogDb) -> Result<()> {
    let path = Path::new(&args.path);
    let name = match &args.name {
        Some(name) => name.clone(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .context("cannot derive a table name from the path; pass --name")?,
    };

    let meta = gw_transform::import_csv(catalog, &name, path)?;
    print_json(&meta)
}
