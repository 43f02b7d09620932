//! Command implementations.

pub mod import;
pub mod inspect;
pub mod query;
pub mod schema;
pub mod transform;

use anyhow::Result;

/// Print a serializable payload as pretty JSON.
pub(crate) fn print_json<T: serde::Serialize>(payload: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

/// Parse repeated `--filter` JSON clauses.
pub(crate) fn parse_filters(raw: &[String]) -> Result<Vec<gw_core::Filter>> {
    raw.iter()
        .map(|s| {
            serde_json::from_str(s).map_err(|e| anyhow::anyhow!("invalid filter {s:?}: {e}"))
        })
        .collect()
}
