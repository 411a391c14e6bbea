//! Error types for conversion operations
//!
//! One enum covers the whole request lifecycle. Per-entity faults are not
//! represented here; they are recovered locally during extraction and turned
//! into warnings (see [`crate::extract`]).

use thiserror::Error;

/// Errors that can occur during a conversion request.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Tabular input lacks a recognized coordinate column set, or a declared
    /// geometry column is unusable for every row.
    #[error("schema error: {0}")]
    Schema(String),

    /// The input byte stream is not a valid file of the declared format
    /// (after any lenient-recovery retry).
    #[error("unreadable input: {0}")]
    Structure(String),

    /// The input was structurally valid but no entity produced a usable
    /// geometry. Deliberately distinct from [`ConvertError::Structure`].
    #[error("no geometries found in input")]
    NoGeometry,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Export or archival failure (staging files are cleaned up regardless).
    #[error("export error: {0}")]
    Export(String),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
