//! Error types for the catalog store.
//!
//! Three caller-visible kinds: not-found (unknown entity ids), validation
//! (caller-correctable payload problems), and internal (engine failures,
//! opaque behind a correlation id). [`CatalogError::is_not_found`] and
//! [`CatalogError::is_validation`] make the kinds structurally
//! distinguishable without matching on variants.

use gw_engine::{EngineError, EngineResult};
use thiserror::Error;

/// Catalog store errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Unknown logical table id (C001).
    #[error("[C001] Unknown table: {id}")]
    UnknownTable { id: String },

    /// Unknown relation id (C002).
    #[error("[C002] Unknown relation: {id}")]
    UnknownRelation { id: String },

    /// Unknown table version id (C003).
    #[error("[C003] Unknown version: {id}")]
    UnknownVersion { id: String },

    /// A referenced field is not a column of the active version (C004).
    #[error("[C004] Unknown field: {field}")]
    UnknownField { field: String },

    /// Caller payload fails a structural check (C005).
    #[error("[C005] {message}")]
    Validation { message: String },

    /// Schema migration failed (C006).
    #[error("[C006] Catalog migration failed: {0}")]
    Migration(String),

    /// Transaction management failed (C007).
    #[error("[C007] Catalog transaction failed: {0}")]
    Transaction(String),

    /// Engine-level failure, surfaced opaquely (C008).
    #[error("[C008] {0}")]
    Engine(#[from] EngineError),
}

/// Result type alias for [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Build a validation error from a message.
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation {
            message: message.into(),
        }
    }

    /// Whether this error names a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::UnknownTable { .. }
                | CatalogError::UnknownRelation { .. }
                | CatalogError::UnknownVersion { .. }
        )
    }

    /// Whether the caller can correct this error by fixing the payload.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::UnknownField { .. } | CatalogError::Validation { .. }
        )
    }
}

impl From<gw_core::CoreError> for CatalogError {
    fn from(err: gw_core::CoreError) -> Self {
        CatalogError::Validation {
            message: err.to_string(),
        }
    }
}

/// Extension adding catalog context to raw engine-driver results.
///
/// Metadata statements run on the same engine connection as snapshots, so
/// their failures are internal errors too: the detail is logged under a
/// correlation id and never displayed.
pub trait CatalogResultExt<T> {
    fn catalog_context(self, context: &str) -> CatalogResult<T>;
}

impl<T> CatalogResultExt<T> for Result<T, duckdb::Error> {
    fn catalog_context(self, context: &str) -> CatalogResult<T> {
        let wrapped: EngineResult<T> = self.map_err(|e| EngineError::request(context, e));
        Ok(wrapped?)
    }
}
