//! Error types for tree operations

use bytestr::AllocError;
use thiserror::Error;

use crate::entry::EntryType;

/// Main error type for entry tree operations.
///
/// Structural misuse (linking into a non-list, linking an entry twice,
/// using a freed handle) is a programming error and panics instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A value slot could not be initialized; the entry fell back to null
    #[error("Allocation error while initializing {entry_type} value: {source}")]
    Init {
        /// Type the entry was being switched to
        entry_type: EntryType,
        /// The underlying allocation failure
        source: AllocError,
    },

    /// Any other allocation failure
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// Result type alias for entry tree operations
pub type Result<T> = std::result::Result<T, TreeError>;
