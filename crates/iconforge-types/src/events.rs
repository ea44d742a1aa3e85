//! Change notifications emitted by the core for UI subscribers.
//!
//! Every mutation of player state publishes exactly one [`GameEvent`]. The
//! UI layer renders from these rather than polling the ledger.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{RecipeId, ResourceId};
use crate::structs::ResourceStack;

/// A single observable change to player state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GameEvent {
    /// A ledger entry changed. `quantity` is the new total (0 when pruned).
    InventoryChanged {
        /// The resource whose count changed.
        resource_id: ResourceId,
        /// Quantity owned after the change.
        quantity: u64,
    },

    /// A resource was owned for the first time.
    IconUnlocked {
        /// The newly unlocked resource.
        resource_id: ResourceId,
    },

    /// A combination or production recipe was discovered.
    RecipeDiscovered {
        /// The newly discovered recipe.
        recipe_id: RecipeId,
    },

    /// A recipe was chosen for a slot without funding it.
    PlaceholderSet {
        /// The slot holding the placeholder.
        slot: usize,
        /// The chosen recipe.
        recipe_id: RecipeId,
    },

    /// A production job consumed its ingredients and began running.
    ProductionStarted {
        /// The slot running the job.
        slot: usize,
        /// The production recipe.
        recipe_id: RecipeId,
        /// Batch multiplier.
        multiplier: u32,
        /// Total duration of the job in seconds.
        total_duration_secs: f64,
    },

    /// A job reached its duration and its output was credited.
    ProductionCompleted {
        /// The slot that ran the job.
        slot: usize,
        /// The production recipe.
        recipe_id: RecipeId,
        /// The credited output.
        output: ResourceStack,
    },

    /// A job or placeholder was cancelled.
    ProductionCancelled {
        /// The cleared slot.
        slot: usize,
        /// The recipe that was running or chosen.
        recipe_id: RecipeId,
        /// Ingredients returned to the ledger (empty for a placeholder).
        refunded: Vec<ResourceStack>,
    },

    /// The currency balance changed.
    BalanceChanged {
        /// Balance after the change.
        balance: u64,
        /// Signed change that was applied.
        delta: i64,
    },
}
