//! SQL identifier utilities.
//!
//! Physical snapshot names must be storage-safe identifiers; everything else
//! (user column names, table names) is double-quoted before it reaches the
//! engine.

use crate::error::{CoreError, CoreResult};

/// Quote an identifier for the engine, doubling embedded quotes.
///
/// Rejects names containing a NUL byte — those cannot be represented in a
/// quoted identifier at all.
pub fn quote_ident(name: &str) -> CoreResult<String> {
    if name.contains('\0') {
        return Err(CoreError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Deterministic physical name for one version of a table's content.
///
/// Non-alphanumeric characters in the table id are folded to `_` so the
/// result is always a bare SQL identifier. Collision-free because table ids
/// are unique and version numbers are never reused within a table.
pub fn physical_name(table_id: &str, version: i64) -> String {
    let safe: String = table_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("t_{safe}_v{version}")
}

/// Deduplicate a list of column names by suffixing `_1`, `_2`, … on repeats.
pub fn dedupe_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut out = Vec::new();
    for raw in names {
        let base: String = raw.into();
        if seen.insert(base.clone()) {
            out.push(base);
            continue;
        }
        let mut suffix = 1;
        let mut candidate = format!("{base}_{suffix}");
        while !seen.insert(candidate.clone()) {
            suffix += 1;
            candidate = format!("{base}_{suffix}");
        }
        out.push(candidate);
    }
    out
}

#[cfg(test)]
#[path = "ident_test.rs"]
mod tests;
