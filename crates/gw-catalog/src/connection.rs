//! Catalog database connection wrapper.
//!
//! [`CatalogDb`] owns the single engine [`Connection`] holding both the
//! `gw_meta` schema and the physical snapshots, and provides helpers for
//! opening, migrating, and transacting against it.

use crate::error::{CatalogError, CatalogResult};
use crate::migration::run_migrations;
use duckdb::Connection;
use std::path::Path;

/// Wrapper around the engine connection for one catalog.
///
/// Single-threaded; each operation runs synchronously to completion on this
/// one connection. Thread the handle explicitly through every call — there
/// is no process-wide catalog.
pub struct CatalogDb {
    conn: Connection,
}

impl CatalogDb {
    /// Open (or create) the catalog database at `path` and run pending
    /// migrations.
    pub fn open(path: &Path) -> CatalogResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            CatalogError::Migration(format!("open failed: {e}: {}", path.display()))
        })?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Create an in-memory catalog with all migrations applied.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_memory() -> CatalogResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CatalogError::Migration(format!("open failed: {e}")))?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying engine connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back
    /// on error.
    ///
    /// Transformations route their whole write sequence (snapshot, version
    /// row, active-pointer flip, log entry) through here so a failure cannot
    /// leave an orphaned snapshot or an unlinked log entry.
    pub fn transaction<F, T>(&self, body: F) -> CatalogResult<T>
    where
        F: FnOnce(&Connection) -> CatalogResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| CatalogError::Transaction(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(CatalogError::Transaction(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
