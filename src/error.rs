//! Error handling for the manipulation engine
//!
//! Structural failures (bad range, operation not legal for the grid, unknown
//! operation name) abort an invocation before any cell is written. Per-cell
//! problems are not errors; they are counted in
//! [`ExecutionResult::skipped`](crate::engine::ExecutionResult::skipped).

use crate::engine::ManipKind;
use thiserror::Error;

/// Errors returned by the manipulation engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManipError {
    /// Requested page range is inverted or outside the grid
    #[error("Page range {start}..={stop} is invalid for a grid with {page_count} pages")]
    Range {
        start: usize,
        stop: usize,
        page_count: usize,
    },

    /// Operation is not legal for the supplied grid (stale menu, wrong generation)
    #[error("Operation {kind} is not supported by this storage")]
    Unsupported { kind: ManipKind },

    /// Name does not match any registered operation
    #[error("Unknown manipulation: '{name}'")]
    UnknownManipulation { name: String },
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ManipError>;

impl ManipError {
    /// Create a range error
    pub fn range(start: usize, stop: usize, page_count: usize) -> Self {
        Self::Range {
            start,
            stop,
            page_count,
        }
    }

    /// Create an unsupported-operation error
    pub fn unsupported(kind: ManipKind) -> Self {
        Self::Unsupported { kind }
    }

    /// Create an unknown-manipulation error
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownManipulation { name: name.into() }
    }
}
