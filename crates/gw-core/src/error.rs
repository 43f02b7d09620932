//! Error types for gw-core

use thiserror::Error;

/// Core error type for Gridworks
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Identifier cannot be quoted safely
    #[error("[E001] Invalid identifier: {name:?}")]
    InvalidIdentifier { name: String },

    /// E002: Unrecognized tag for a closed variant type
    #[error("[E002] Unknown {kind}: '{value}'")]
    UnknownTag { kind: &'static str, value: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
