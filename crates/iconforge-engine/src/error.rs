//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup, the run loop,
//! and the final checkpoint, so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: iconforge_core::ConfigError,
    },

    /// The recipe catalog failed to load or validate.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: iconforge_recipes::CatalogError,
    },

    /// Reading the catalog file failed.
    #[error("failed to read catalog file: {source}")]
    CatalogIo {
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The save directory could not be read or written.
    #[error("storage error: {source}")]
    Store {
        /// The underlying storage error.
        #[from]
        source: iconforge_store::StoreError,
    },

    /// A save-slot directory operation was refused.
    #[error("save slot error: {source}")]
    Slot {
        /// The underlying slot error.
        #[from]
        source: iconforge_store::SlotError,
    },

    /// The configured save slot does not exist.
    #[error("save slot {index} is out of range (max {max})")]
    InvalidSaveSlot {
        /// The configured index.
        index: u8,
        /// Number of save slots.
        max: u8,
    },
}
