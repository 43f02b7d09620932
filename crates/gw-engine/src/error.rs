//! Error types for the engine adapter.
//!
//! Engine failures are internal errors: the Display form carries only a
//! correlation id, while the underlying engine message goes to the error log.
//! Callers correlate the two through the id.

use thiserror::Error;
use uuid::Uuid;

/// Engine adapter errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open the engine database (G001).
    #[error("[G001] Engine connection failed: {0}")]
    Connection(String),

    /// An engine request failed (G002). Details are logged, not displayed.
    #[error("[G002] Engine request failed (ref {correlation_id})")]
    Request {
        correlation_id: String,
        #[source]
        source: duckdb::Error,
    },

    /// An identifier cannot be represented in engine SQL (G003).
    #[error("[G003] {0}")]
    Ident(#[from] gw_core::CoreError),
}

/// Result type alias for [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Wrap an engine failure, logging the full detail under a fresh
    /// correlation id.
    pub fn request(context: &str, source: duckdb::Error) -> Self {
        let correlation_id = Uuid::new_v4().simple().to_string();
        log::error!("engine request failed (ref {correlation_id}): {context}: {source}");
        EngineError::Request {
            correlation_id,
            source,
        }
    }
}

/// Extension adding engine-error context to duckdb results.
pub trait EngineResultExt<T> {
    /// Convert a duckdb error into an [`EngineError::Request`] with context.
    fn engine_context(self, context: &str) -> EngineResult<T>;
}

impl<T> EngineResultExt<T> for Result<T, duckdb::Error> {
    fn engine_context(self, context: &str) -> EngineResult<T> {
        self.map_err(|e| EngineError::request(context, e))
    }
}
