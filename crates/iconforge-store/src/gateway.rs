//! Typed persistence over a [`KeyValueStore`].
//!
//! Documents are serialized as JSON. Loading is forgiving: a missing key
//! yields the document's default and a document that fails to parse is
//! logged and treated the same way, so one corrupt file never blocks a
//! session from starting.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::keys::{GAME_SLOTS_KEY, StorageKey, StorageScope};
use crate::kv::KeyValueStore;
use crate::schema::GameSlotsDoc;

/// Typed JSON persistence for save-slot documents.
#[derive(Debug, Clone, Default)]
pub struct PersistenceGateway<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    /// Wrap a key-value store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the gateway and return the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Serialize `doc` under `key` in `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the write fails.
    pub fn save<T: Serialize>(
        &mut self,
        key: StorageKey,
        scope: StorageScope,
        doc: &T,
    ) -> Result<(), StoreError> {
        let full_key = key.key(scope);
        let json = serde_json::to_string(doc)?;
        self.store.set(&full_key, &json)?;
        tracing::debug!(key = %full_key, bytes = json.len(), "Saved document");
        Ok(())
    }

    /// Load the document under `key` in `scope`, or `None` if it is
    /// missing or cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the backing store cannot be read.
    pub fn load_optional<T: DeserializeOwned>(
        &self,
        key: StorageKey,
        scope: StorageScope,
    ) -> Result<Option<T>, StoreError> {
        let full_key = key.key(scope);
        self.read_json(&full_key)
    }

    /// Load the document under `key` in `scope`, falling back to
    /// `T::default()` if it is missing or corrupt.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the backing store cannot be read.
    pub fn load<T: DeserializeOwned + Default>(
        &self,
        key: StorageKey,
        scope: StorageScope,
    ) -> Result<T, StoreError> {
        Ok(self.load_optional(key, scope)?.unwrap_or_default())
    }

    /// Delete every per-slot document in `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a delete fails.
    pub fn delete_scope(&mut self, scope: StorageScope) -> Result<(), StoreError> {
        for key in StorageKey::ALL {
            self.store.delete(&key.key(scope))?;
        }
        tracing::info!(suffix = %scope.suffix(), "Deleted save documents");
        Ok(())
    }

    /// Save the save-slot directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the write fails.
    pub fn save_slots(&mut self, doc: &GameSlotsDoc) -> Result<(), StoreError> {
        let json = serde_json::to_string(doc)?;
        self.store.set(GAME_SLOTS_KEY, &json)
    }

    /// Load the save-slot directory, empty if missing or corrupt.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the backing store cannot be read.
    pub fn load_slots(&self) -> Result<GameSlotsDoc, StoreError> {
        Ok(self.read_json(GAME_SLOTS_KEY)?.unwrap_or_default())
    }

    fn read_json<T: DeserializeOwned>(&self, full_key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(full_key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => Ok(Some(doc)),
            Err(err) => {
                tracing::warn!(key = %full_key, error = %err, "Corrupt document, using defaults");
                Ok(None)
            }
        }
    }
}
