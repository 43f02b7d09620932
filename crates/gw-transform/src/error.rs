//! Error types for the transformation engine.

use gw_catalog::CatalogError;
use gw_core::CleanAction;
use gw_engine::EngineError;
use thiserror::Error;

/// Transformation engine errors.
#[derive(Error, Debug)]
pub enum TransformError {
    /// A row-scope filter was supplied for an action that cannot honor one (T001).
    #[error("[T001] Scoped apply is not supported for {action}")]
    ScopedApplyUnsupported { action: CleanAction },

    /// Fill actions only apply to numeric columns (T002).
    #[error("[T002] {action} only supports numeric columns: {field}")]
    NonNumericFill { action: CleanAction, field: String },

    /// Merge key lists differ in length or are empty (T003).
    #[error("[T003] {message}")]
    InvalidMergeKeys { message: String },

    /// Long-to-wide reshape without pivot columns or values (T004).
    #[error("[T004] long-to-wide requires pivotColumns and pivotValues")]
    MissingPivotParams,

    /// Wide-to-long reshape without value vars (T005).
    #[error("[T005] wide-to-long requires at least one value var")]
    MissingValueVars,

    /// A filter operator outside the scoped-apply subset (T006).
    #[error("[T006] Unsupported filter op for clean: {op}")]
    UnsupportedScopeOp { op: String },

    /// Catalog-level failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Engine-level failure.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type alias for [`TransformError`].
pub type TransformResult<T> = Result<T, TransformError>;

impl TransformError {
    /// Whether this error names a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransformError::Catalog(e) if e.is_not_found())
    }

    /// Whether the caller can correct this error by fixing the payload.
    pub fn is_validation(&self) -> bool {
        match self {
            TransformError::ScopedApplyUnsupported { .. }
            | TransformError::NonNumericFill { .. }
            | TransformError::InvalidMergeKeys { .. }
            | TransformError::MissingPivotParams
            | TransformError::MissingValueVars
            | TransformError::UnsupportedScopeOp { .. } => true,
            TransformError::Catalog(e) => e.is_validation(),
            TransformError::Engine(_) => false,
        }
    }
}

impl From<gw_core::CoreError> for TransformError {
    fn from(err: gw_core::CoreError) -> Self {
        TransformError::Catalog(err.into())
    }
}
