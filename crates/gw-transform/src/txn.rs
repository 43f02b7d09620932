//! Transaction wrapper for transformation write sequences.

use crate::error::TransformResult;
use duckdb::Connection;
use gw_catalog::{CatalogDb, CatalogError};

/// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
/// error.
///
/// Same contract as [`CatalogDb::transaction`], widened to transform
/// errors so validation failures inside an operation also roll back the
/// partial writes.
pub(crate) fn with_txn<F, T>(catalog: &CatalogDb, body: F) -> TransformResult<T>
where
    F: FnOnce(&Connection) -> TransformResult<T>,
{
    let conn = catalog.conn();
    conn.execute_batch("BEGIN TRANSACTION")
        .map_err(|e| CatalogError::Transaction(format!("BEGIN failed: {e}")))?;

    let result = body(conn);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = conn.execute_batch("COMMIT") {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(
                    CatalogError::Transaction(format!("COMMIT failed: {commit_err}")).into(),
                );
            }
        }
        Err(_) => {
            let _ = conn.execute_batch("ROLLBACK");
        }
    }
    result
}
