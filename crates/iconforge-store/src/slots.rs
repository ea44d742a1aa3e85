//! The save-slot directory (`GameSlots`).
//!
//! Up to [`MAX_SAVE_SLOTS`] saves exist side by side. At most one is active;
//! all per-slot documents are read and written under the active slot's
//! [`StorageScope`].

use std::collections::BTreeMap;

use crate::error::{SlotError, StoreError};
use crate::gateway::PersistenceGateway;
use crate::keys::{MAX_SAVE_SLOTS, SaveSlotIndex, StorageScope};
use crate::kv::KeyValueStore;
use crate::schema::{GameSlotsDoc, SchemaVersion, SlotDoc};

/// Metadata for one created save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSlotMeta {
    /// Player-chosen name.
    pub name: String,
    /// Icons unlocked as of the last recorded session.
    pub unlocked_icons_count: u64,
    /// Accumulated play time in seconds.
    pub total_play_time_secs: f64,
    /// Unix seconds the slot was created.
    pub created_at: i64,
    /// Unix seconds the slot was last played.
    pub last_played_at: i64,
}

/// Directory of save slots with a single active slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveSlotDirectory {
    slots: BTreeMap<SaveSlotIndex, SaveSlotMeta>,
    active: Option<SaveSlotIndex>,
}

impl SaveSlotDirectory {
    /// Create an empty directory.
    pub const fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            active: None,
        }
    }

    /// Create a save in `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Occupied`] if the slot already holds a save.
    pub fn create(
        &mut self,
        index: SaveSlotIndex,
        name: impl Into<String>,
        now_unix: i64,
    ) -> Result<(), SlotError> {
        if self.slots.contains_key(&index) {
            return Err(SlotError::Occupied(index.get()));
        }
        let name = name.into();
        tracing::info!(slot = %index, name = %name, "Created save slot");
        self.slots.insert(
            index,
            SaveSlotMeta {
                name,
                unlocked_icons_count: 0,
                total_play_time_secs: 0.0,
                created_at: now_unix,
                last_played_at: now_unix,
            },
        );
        Ok(())
    }

    /// Make `index` the active slot and stamp its last-played time.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Vacant`] if the slot holds no save.
    pub fn activate(&mut self, index: SaveSlotIndex, now_unix: i64) -> Result<(), SlotError> {
        let meta = self
            .slots
            .get_mut(&index)
            .ok_or(SlotError::Vacant(index.get()))?;
        meta.last_played_at = now_unix;
        self.active = Some(index);
        tracing::info!(slot = %index, "Activated save slot");
        Ok(())
    }

    /// Return the active slot.
    pub const fn active(&self) -> Option<SaveSlotIndex> {
        self.active
    }

    /// Return the storage scope of the active slot.
    pub fn active_scope(&self) -> Option<StorageScope> {
        self.active.map(StorageScope::Slot)
    }

    /// Return the metadata of `index`, if a save exists there.
    pub fn get(&self, index: SaveSlotIndex) -> Option<&SaveSlotMeta> {
        self.slots.get(&index)
    }

    /// Iterate over created saves in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SaveSlotIndex, &SaveSlotMeta)> {
        self.slots.iter().map(|(index, meta)| (*index, meta))
    }

    /// Return the lowest slot with no save.
    pub fn first_vacant(&self) -> Option<SaveSlotIndex> {
        SaveSlotIndex::all().find(|index| !self.slots.contains_key(index))
    }

    /// Add a finished session's play time and refresh the unlock count.
    ///
    /// Negative or non-finite durations are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Vacant`] if the slot holds no save.
    pub fn record_play_time(
        &mut self,
        index: SaveSlotIndex,
        session_secs: f64,
        unlocked_icons_count: u64,
        now_unix: i64,
    ) -> Result<(), SlotError> {
        let meta = self
            .slots
            .get_mut(&index)
            .ok_or(SlotError::Vacant(index.get()))?;
        if session_secs.is_finite() && session_secs > 0.0 {
            meta.total_play_time_secs += session_secs;
        }
        meta.unlocked_icons_count = unlocked_icons_count;
        meta.last_played_at = now_unix;
        Ok(())
    }

    /// Erase the save in `index`: its metadata and every namespaced document.
    ///
    /// Returns `false` if the slot was already empty. Resetting the active
    /// slot leaves no slot active.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if deleting the slot's documents fails.
    pub fn reset<S: KeyValueStore>(
        &mut self,
        index: SaveSlotIndex,
        gateway: &mut PersistenceGateway<S>,
    ) -> Result<bool, StoreError> {
        gateway.delete_scope(StorageScope::Slot(index))?;
        if self.active == Some(index) {
            self.active = None;
        }
        Ok(self.slots.remove(&index).is_some())
    }

    /// Convert to the persisted form.
    pub fn to_doc(&self) -> GameSlotsDoc {
        GameSlotsDoc {
            schema_version: SchemaVersion::default(),
            slots: self
                .slots
                .iter()
                .map(|(index, meta)| SlotDoc {
                    slot_index: index.get(),
                    slot_name: meta.name.clone(),
                    unlocked_icons_count: meta.unlocked_icons_count,
                    total_play_time_seconds: meta.total_play_time_secs,
                    creation_timestamp: meta.created_at,
                    last_played_timestamp: meta.last_played_at,
                    is_active: self.active == Some(*index),
                })
                .collect(),
        }
    }

    /// Rebuild from the persisted form.
    ///
    /// Entries with an out-of-range or repeated index are skipped. If more
    /// than one entry claims to be active, the lowest index wins.
    pub fn from_doc(doc: &GameSlotsDoc) -> Self {
        let mut directory = Self::new();
        for entry in &doc.slots {
            let Some(index) = SaveSlotIndex::new(entry.slot_index) else {
                tracing::warn!(
                    slot = entry.slot_index,
                    max = MAX_SAVE_SLOTS,
                    "Skipping save slot with out-of-range index"
                );
                continue;
            };
            if directory.slots.contains_key(&index) {
                tracing::warn!(slot = %index, "Skipping duplicate save slot entry");
                continue;
            }
            directory.slots.insert(
                index,
                SaveSlotMeta {
                    name: entry.slot_name.clone(),
                    unlocked_icons_count: entry.unlocked_icons_count,
                    total_play_time_secs: entry.total_play_time_seconds,
                    created_at: entry.creation_timestamp,
                    last_played_at: entry.last_played_timestamp,
                },
            );
            if entry.is_active && directory.active.is_none_or(|current| index < current) {
                directory.active = Some(index);
            }
        }
        directory
    }

    /// Load the directory through `gateway`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store cannot be read.
    pub fn load<S: KeyValueStore>(gateway: &PersistenceGateway<S>) -> Result<Self, StoreError> {
        Ok(Self::from_doc(&gateway.load_slots()?))
    }

    /// Save the directory through `gateway`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    pub fn save<S: KeyValueStore>(
        &self,
        gateway: &mut PersistenceGateway<S>,
    ) -> Result<(), StoreError> {
        gateway.save_slots(&self.to_doc())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::keys::StorageKey;
    use crate::kv::MemoryStore;
    use crate::schema::InventoryDoc;

    fn idx(i: u8) -> SaveSlotIndex {
        SaveSlotIndex::new(i).unwrap()
    }

    #[test]
    fn create_and_activate() {
        let mut dir = SaveSlotDirectory::new();
        assert_eq!(dir.first_vacant(), Some(idx(0)));
        assert!(dir.create(idx(0), "Farm", 100).is_ok());
        assert_eq!(dir.create(idx(0), "Again", 101), Err(SlotError::Occupied(0)));
        assert_eq!(dir.activate(idx(1), 102), Err(SlotError::Vacant(1)));
        assert!(dir.activate(idx(0), 200).is_ok());
        assert_eq!(dir.active_scope(), Some(StorageScope::Slot(idx(0))));
        assert_eq!(dir.get(idx(0)).map(|m| m.last_played_at), Some(200));
        assert_eq!(dir.first_vacant(), Some(idx(1)));
    }

    #[test]
    fn only_one_slot_is_active() {
        let mut dir = SaveSlotDirectory::new();
        assert!(dir.create(idx(0), "A", 0).is_ok());
        assert!(dir.create(idx(2), "C", 0).is_ok());
        assert!(dir.activate(idx(0), 1).is_ok());
        assert!(dir.activate(idx(2), 2).is_ok());
        let doc = dir.to_doc();
        assert_eq!(doc.slots.iter().filter(|s| s.is_active).count(), 1);
        assert_eq!(SaveSlotDirectory::from_doc(&doc), dir);
    }

    #[test]
    fn from_doc_repairs_multiple_active() {
        let entry = |slot_index: u8| SlotDoc {
            slot_index,
            slot_name: format!("S{slot_index}"),
            unlocked_icons_count: 0,
            total_play_time_seconds: 0.0,
            creation_timestamp: 0,
            last_played_timestamp: 0,
            is_active: true,
        };
        let doc = GameSlotsDoc {
            schema_version: SchemaVersion::default(),
            slots: vec![entry(2), entry(1), entry(7)],
        };
        let dir = SaveSlotDirectory::from_doc(&doc);
        assert_eq!(dir.active(), Some(idx(1)));
        assert_eq!(dir.iter().count(), 2);
    }

    #[test]
    fn record_play_time_accumulates() {
        let mut dir = SaveSlotDirectory::new();
        assert!(dir.create(idx(1), "B", 0).is_ok());
        assert!(dir.record_play_time(idx(1), 90.0, 4, 10).is_ok());
        assert!(dir.record_play_time(idx(1), 30.5, 6, 20).is_ok());
        assert!(dir.record_play_time(idx(1), -5.0, 6, 30).is_ok());
        let meta = dir.get(idx(1)).cloned();
        assert_eq!(meta.as_ref().map(|m| m.total_play_time_secs), Some(120.5));
        assert_eq!(meta.as_ref().map(|m| m.unlocked_icons_count), Some(6));
        assert_eq!(meta.map(|m| m.last_played_at), Some(30));
    }

    #[test]
    fn reset_deletes_slot_documents() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        let mut dir = SaveSlotDirectory::new();
        assert!(dir.create(idx(0), "A", 0).is_ok());
        assert!(dir.activate(idx(0), 0).is_ok());
        let scope = StorageScope::Slot(idx(0));
        assert!(
            gateway
                .save(StorageKey::PlayerInventory, scope, &InventoryDoc::default())
                .is_ok()
        );
        assert!(dir.save(&mut gateway).is_ok());

        assert_eq!(dir.reset(idx(0), &mut gateway).ok(), Some(true));
        assert_eq!(dir.active(), None);
        assert!(!gateway.store().keys().any(|k| k == "PlayerInventory_Slot0"));
        assert_eq!(dir.reset(idx(0), &mut gateway).ok(), Some(false));
    }

    #[test]
    fn save_and_load_directory() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        let mut dir = SaveSlotDirectory::new();
        assert!(dir.create(idx(2), "Late game", 1_700_000_000).is_ok());
        assert!(dir.activate(idx(2), 1_700_000_100).is_ok());
        assert!(dir.save(&mut gateway).is_ok());
        assert_eq!(SaveSlotDirectory::load(&gateway).ok(), Some(dir));
    }
}
