//! Query command.

use super::{parse_filters, print_json};
use crate::cli::QueryArgs;
use anyhow::{bail, Result};
use gw_catalog::CatalogDb;
use gw_core::{SortDirection, SortSpec};
use std::str::FromStr;

/// Parse a sort clause of the form `field` or `field:desc`.
fn parse_sort(raw: &str) -> Result<SortSpec> {
    match raw.split_once(':') {
        None => Ok(SortSpec::asc(raw)),
        Some((field, direction)) => {
            if field.is_empty() {
                bail!("invalid sort clause {raw:?}");
            }
            Ok(SortSpec {
                field: field.to_string(),
                direction: SortDirection::from_str(direction)?,
            })
        }
    }
}

pub fn execute(args: &QueryArgs, catalog: &CatalogDb) -> Result<()> {
    let filters = parse_filters(&args.filters)?;
    let sort = args
        .sort
        .iter()
        .map(|s| parse_sort(s))
        .collect::<Result<Vec<_>>>()?;

    let page = gw_query::query_rows(
        catalog,
        &args.table_id,
        args.offset,
        args.limit,
        &filters,
        &sort,
    )?;
    print_json(&page)
}
