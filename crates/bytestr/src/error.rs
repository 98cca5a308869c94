//! Error types for byte string operations

use thiserror::Error;

/// A buffer allocation failed.
///
/// Operations that report this error leave the string they were called on
/// unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Allocation error: failed to allocate {requested} bytes")]
pub struct AllocError {
    /// Number of bytes that were requested, terminator included
    pub requested: usize,
}

impl AllocError {
    /// Create an error for a failed request of `requested` bytes.
    pub fn new(requested: usize) -> Self {
        Self { requested }
    }
}

/// Result type alias for byte string operations
pub type Result<T> = std::result::Result<T, AllocError>;
