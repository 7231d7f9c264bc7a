//! Error types for tree insertion.

use thiserror::Error;

/// Errors raised when storing a key in the tree.
///
/// Every other tree operation is total: looking up an absent key yields
/// `None`, searching with an unmatched pattern yields an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// The key projects to an empty string and therefore names no node path.
    #[error("key projects to an empty string")]
    EmptyKey,

    /// The key spells the same string as a stored key that does not compare
    /// equal to it, so stamping the terminal node would silently shadow the
    /// stored key.
    #[error("another key already spells {0:?}")]
    Collision(String),
}

/// Result type for fallible tree operations.
pub type Result<T> = std::result::Result<T, InsertError>;
