//! Save-slot persistence for Iconforge.
//!
//! - [`KeyValueStore`] abstracts string storage ([`MemoryStore`],
//!   [`FileStore`]).
//! - [`schema`] holds the versioned JSON documents, one per key.
//! - [`PersistenceGateway`] maps [`StorageKey`] + [`StorageScope`] to keys
//!   and recovers from missing or corrupt documents with defaults.
//! - [`SaveSlotDirectory`] tracks the three save slots and which one is
//!   active.

pub mod error;
pub mod gateway;
pub mod keys;
pub mod kv;
pub mod schema;
pub mod slots;

pub use error::{SlotError, StoreError};
pub use gateway::PersistenceGateway;
pub use keys::{GAME_SLOTS_KEY, MAX_SAVE_SLOTS, SaveSlotIndex, StorageKey, StorageScope};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use slots::{SaveSlotDirectory, SaveSlotMeta};
