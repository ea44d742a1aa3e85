//! Storage key layout.
//!
//! Per-slot state lives under `<Namespace><suffix>` where the suffix is
//! `_Slot{N}` for save slot `N`, or empty for the legacy single-save layout:
//!
//! | Key | Document |
//! |-----|----------|
//! | `PlayerInventory{suffix}` | [`InventoryDoc`](crate::schema::InventoryDoc) |
//! | `ActiveProductions{suffix}` | [`ActiveProductionsDoc`](crate::schema::ActiveProductionsDoc) |
//! | `DiscoveredProductions{suffix}` | [`DiscoveredProductionsDoc`](crate::schema::DiscoveredProductionsDoc) |
//! | `UnlockedIcons{suffix}` | [`UnlockedIconsDoc`](crate::schema::UnlockedIconsDoc) |
//! | `CurrencyData{suffix}` | [`CurrencyDoc`](crate::schema::CurrencyDoc) |
//! | `GameSlots` | [`GameSlotsDoc`](crate::schema::GameSlotsDoc), never suffixed |

use serde::{Deserialize, Serialize};

/// Number of independent save slots.
pub const MAX_SAVE_SLOTS: u8 = 3;

/// Key of the save-slot directory document.
pub const GAME_SLOTS_KEY: &str = "GameSlots";

/// Index of a save slot, always below [`MAX_SAVE_SLOTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SaveSlotIndex(u8);

impl SaveSlotIndex {
    /// Return the index if it is below [`MAX_SAVE_SLOTS`].
    pub const fn new(index: u8) -> Option<Self> {
        if index < MAX_SAVE_SLOTS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Return the raw index.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate over every valid slot index.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..MAX_SAVE_SLOTS).map(Self)
    }
}

impl core::fmt::Display for SaveSlotIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which save a per-slot document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// The pre-slot layout: keys carry no suffix.
    Legacy,
    /// One of the numbered save slots.
    Slot(SaveSlotIndex),
}

impl StorageScope {
    /// Return the key suffix for this scope.
    pub fn suffix(self) -> String {
        match self {
            Self::Legacy => String::new(),
            Self::Slot(index) => format!("_Slot{index}"),
        }
    }
}

/// The per-slot document namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Resource ledger.
    PlayerInventory,
    /// Running production jobs.
    ActiveProductions,
    /// Discovered recipe ids.
    DiscoveredProductions,
    /// Unlocked icon ids.
    UnlockedIcons,
    /// Coin balance and passive-income timestamp.
    CurrencyData,
}

impl StorageKey {
    /// Every per-slot namespace.
    pub const ALL: [Self; 5] = [
        Self::PlayerInventory,
        Self::ActiveProductions,
        Self::DiscoveredProductions,
        Self::UnlockedIcons,
        Self::CurrencyData,
    ];

    /// Return the namespace name.
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::PlayerInventory => "PlayerInventory",
            Self::ActiveProductions => "ActiveProductions",
            Self::DiscoveredProductions => "DiscoveredProductions",
            Self::UnlockedIcons => "UnlockedIcons",
            Self::CurrencyData => "CurrencyData",
        }
    }

    /// Return the full key for this namespace in `scope`.
    pub fn key(self, scope: StorageScope) -> String {
        format!("{}{}", self.namespace(), scope.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_index_bounds() {
        assert!(SaveSlotIndex::new(0).is_some());
        assert!(SaveSlotIndex::new(2).is_some());
        assert!(SaveSlotIndex::new(3).is_none());
        assert_eq!(SaveSlotIndex::all().count(), 3);
    }

    #[test]
    fn keys_are_suffixed_by_slot() {
        let slot1 = SaveSlotIndex::new(1).map_or(StorageScope::Legacy, StorageScope::Slot);
        assert_eq!(StorageKey::ActiveProductions.key(slot1), "ActiveProductions_Slot1");
        assert_eq!(StorageKey::PlayerInventory.key(StorageScope::Legacy), "PlayerInventory");
    }
}
