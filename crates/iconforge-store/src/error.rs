//! Error types for the persistence layer.
//!
//! Only genuine storage faults are errors. A document that exists but cannot
//! be parsed is not: the gateway substitutes a fresh default and logs it.

/// Errors that can occur in the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A document could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A key contains characters the backing store cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Rejected save-slot directory operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// `create` on a slot that already holds a save.
    #[error("save slot {0} is already in use")]
    Occupied(u8),

    /// An operation that needs an existing save on an empty slot.
    #[error("save slot {0} is empty")]
    Vacant(u8),
}
