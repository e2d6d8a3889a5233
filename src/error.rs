//! Error types for fixture generation.

use thiserror::Error;

/// Errors produced while encoding values, building trees or persisting records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// A value does not fit the fixed 32-byte big-endian encoding.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A leaf was added to a tree that already holds `capacity` leaves.
    #[error("Merkle tree is full (capacity {capacity})")]
    TreeFull { capacity: usize },

    /// A proof was requested for a leaf that has not been inserted.
    #[error("leaf index {index} out of range (tree holds {len} leaves)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The requested depth cannot be represented.
    #[error("invalid tree depth {depth} (max {})", crate::MAX_TREE_DEPTH)]
    InvalidDepth { depth: u32 },

    /// The history or commitment file could not be written or parsed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, FixtureError>;

impl FixtureError {
    pub(crate) fn encoding(msg: impl Into<String>) -> Self {
        FixtureError::Encoding(msg.into())
    }

    pub(crate) fn persistence(msg: impl Into<String>) -> Self {
        FixtureError::Persistence(msg.into())
    }
}
