//! Undo for clean operations.
//!
//! Only the single most recent undoable clean is reachable per call;
//! repeated calls step backwards one entry at a time. Merge and reshape
//! create new tables and are never undoable.

use crate::error::TransformResult;
use crate::txn;
use crate::types::UndoOutcome;
use gw_catalog::store::{oplog, versions};
use gw_catalog::CatalogDb;

/// Undo the most recent undoable clean, if any.
///
/// Reactivates the entry's previous version and flips its `undoable` flag;
/// the entry itself stays in the log. Returns None when nothing is left to
/// undo.
pub fn undo_last_clean(catalog: &CatalogDb) -> TransformResult<Option<UndoOutcome>> {
    txn::with_txn(catalog, |conn| {
        let Some((op_id, table_id, prev_version_id)) = oplog::latest_undoable_clean(conn)? else {
            return Ok(None);
        };
        let Some(prev_version_id) = prev_version_id else {
            return Ok(None);
        };

        versions::activate_version(conn, &table_id, &prev_version_id)?;
        oplog::mark_not_undoable(conn, &op_id)?;

        log::info!("undid clean {op_id} on {table_id}");
        Ok(Some(UndoOutcome {
            undone_operation_id: op_id,
            table_id,
        }))
    })
}
