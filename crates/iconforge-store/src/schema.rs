//! Versioned JSON documents, one per storage key.
//!
//! These structs are the on-disk contract and deliberately separate from the
//! in-memory types in the ledger and core crates: renaming a field in memory
//! must never silently change the save format. Field names are `camelCase`
//! to match existing save files.
//!
//! Every document carries `schemaVersion`. Documents written before the
//! field existed load as version 1.

use serde::{Deserialize, Serialize};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Schema version of a persisted document. Defaults to [`SCHEMA_VERSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion(pub u32);

impl Default for SchemaVersion {
    fn default() -> Self {
        Self(SCHEMA_VERSION)
    }
}

// ---------------------------------------------------------------------------
// PlayerInventory
// ---------------------------------------------------------------------------

/// `PlayerInventory{suffix}`: the resource ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDoc {
    /// Document schema version.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Owned stacks.
    #[serde(default)]
    pub items: Vec<InventoryItemDoc>,
}

/// One owned stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDoc {
    /// Resource id.
    pub icon_id: String,
    /// Owned quantity. Non-positive entries are dropped on load.
    pub quantity: i64,
}

// ---------------------------------------------------------------------------
// ActiveProductions
// ---------------------------------------------------------------------------

/// `ActiveProductions{suffix}`: running production jobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveProductionsDoc {
    /// Document schema version.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// One entry per running job.
    #[serde(default)]
    pub productions: Vec<ProductionDoc>,
}

/// One running job as of the last checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionDoc {
    /// Production slot, `0..5`.
    pub slot_index: usize,
    /// Production recipe id.
    pub production_id: String,
    /// Batch multiplier.
    pub multiplier: u32,
    /// Start instant at save time, Unix seconds. Informational: loading
    /// rebuilds the start from `saved_elapsed_time`.
    pub start_time: f64,
    /// Total duration in seconds.
    pub total_time: f64,
    /// Elapsed seconds at the checkpoint. Authoritative progress.
    pub saved_elapsed_time: f64,
}

// ---------------------------------------------------------------------------
// DiscoveredProductions / UnlockedIcons
// ---------------------------------------------------------------------------

/// `DiscoveredProductions{suffix}`: discovered recipe ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredProductionsDoc {
    /// Document schema version.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Recipe ids in discovery order.
    #[serde(default)]
    pub discovered_ids: Vec<String>,
}

/// `UnlockedIcons{suffix}`: resource ids ever owned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedIconsDoc {
    /// Document schema version.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Resource ids in unlock order.
    #[serde(default)]
    pub unlocked_icon_ids: Vec<String>,
}

// ---------------------------------------------------------------------------
// CurrencyData
// ---------------------------------------------------------------------------

/// `CurrencyData{suffix}`: coins and the passive-income timestamp.
///
/// Has no `Default`: a fresh account must start its accrual clock at the
/// current time, which only the caller knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDoc {
    /// Document schema version.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Coin balance.
    pub coins: u64,
    /// Unix seconds passive income is measured from.
    pub last_passive_income_timestamp: i64,
}

// ---------------------------------------------------------------------------
// GameSlots
// ---------------------------------------------------------------------------

/// `GameSlots`: the save-slot directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSlotsDoc {
    /// Document schema version.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// One entry per created slot.
    #[serde(default)]
    pub slots: Vec<SlotDoc>,
}

/// Metadata of one save slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDoc {
    /// Slot index, `0..3`.
    pub slot_index: u8,
    /// Player-chosen name.
    pub slot_name: String,
    /// Icons unlocked at the last save.
    pub unlocked_icons_count: u64,
    /// Accumulated play time.
    pub total_play_time_seconds: f64,
    /// Unix seconds the slot was created.
    pub creation_timestamp: i64,
    /// Unix seconds the slot was last played.
    pub last_played_timestamp: i64,
    /// Whether this is the active slot.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_doc_uses_camel_case() {
        let doc = ActiveProductionsDoc {
            schema_version: SchemaVersion::default(),
            productions: vec![ProductionDoc {
                slot_index: 0,
                production_id: "wheat_production".to_owned(),
                multiplier: 2,
                start_time: 100.0,
                total_time: 30.0,
                saved_elapsed_time: 12.5,
            }],
        };
        let json = serde_json::to_value(&doc).unwrap_or_default();
        assert_eq!(json["schemaVersion"], 1);
        let first = &json["productions"][0];
        assert_eq!(first["slotIndex"], 0);
        assert_eq!(first["productionId"], "wheat_production");
        assert_eq!(first["savedElapsedTime"], 12.5);
        assert_eq!(first["totalTime"], 30.0);
    }

    #[test]
    fn legacy_documents_default_to_version_one() {
        let doc: Result<InventoryDoc, _> =
            serde_json::from_str(r#"{"items":[{"iconId":"seed_wheat","quantity":3}]}"#);
        assert!(doc.is_ok());
        let doc = doc.unwrap_or_default();
        assert_eq!(doc.schema_version, SchemaVersion(1));
        assert_eq!(doc.items.len(), 1);
    }

    #[test]
    fn currency_doc_shape() {
        let doc: Result<CurrencyDoc, _> =
            serde_json::from_str(r#"{"coins":12,"lastPassiveIncomeTimestamp":1700000000}"#);
        assert_eq!(
            doc.ok(),
            Some(CurrencyDoc {
                schema_version: SchemaVersion(1),
                coins: 12,
                last_passive_income_timestamp: 1_700_000_000,
            })
        );
    }

    #[test]
    fn saved_elapsed_roundtrips_exactly() {
        let original = 0.1_f64 + 0.2_f64;
        let doc = ProductionDoc {
            slot_index: 3,
            production_id: "glass_production".to_owned(),
            multiplier: 1,
            start_time: 1_700_000_000.123_456,
            total_time: 30.0,
            saved_elapsed_time: original,
        };
        let json = serde_json::to_string(&doc).unwrap_or_default();
        let back: Result<ProductionDoc, _> = serde_json::from_str(&json);
        assert!(back.is_ok_and(|d| d.saved_elapsed_time.to_bits() == original.to_bits()));
    }
}
