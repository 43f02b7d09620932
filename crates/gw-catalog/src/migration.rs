//! Schema migration runner for the catalog.
//!
//! Tracks applied migration versions in `gw_meta.schema_version` and runs any
//! unapplied migrations on each open.

use crate::ddl::MIGRATIONS;
use crate::error::{CatalogError, CatalogResult};
use duckdb::Connection;

/// Ensure the `gw_meta` schema and `schema_version` table exist.
fn ensure_version_table(conn: &Connection) -> CatalogResult<()> {
    conn.execute_batch(
        "CREATE SCHEMA IF NOT EXISTS gw_meta;
         CREATE TABLE IF NOT EXISTS gw_meta.schema_version (
             version    INTEGER NOT NULL,
             applied_at TIMESTAMP NOT NULL DEFAULT now()
         );",
    )
    .map_err(|e| CatalogError::Migration(format!("failed to create schema_version table: {e}")))?;
    Ok(())
}

/// Return the highest applied migration version, or 0 if none.
fn current_version(conn: &Connection) -> CatalogResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM gw_meta.schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| CatalogError::Migration(format!("failed to read schema version: {e}")))?;
    Ok(version)
}

/// Run all unapplied migrations against `conn`.
pub fn run_migrations(conn: &Connection) -> CatalogResult<()> {
    ensure_version_table(conn)?;
    let current = current_version(conn)?;

    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }
        log::debug!("Applying catalog migration v{:03}", migration.version);

        conn.execute_batch(migration.sql).map_err(|e| {
            CatalogError::Migration(format!("migration v{:03} failed: {e}", migration.version))
        })?;

        conn.execute(
            "INSERT INTO gw_meta.schema_version (version) VALUES (?)",
            duckdb::params![migration.version],
        )
        .map_err(|e| {
            CatalogError::Migration(format!(
                "failed to record migration v{:03}: {e}",
                migration.version
            ))
        })?;
    }
    Ok(())
}
