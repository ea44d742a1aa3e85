//! Enumeration types shared across the workspace.
//!
//! [`Rejection`] is the business-outcome taxonomy: every operation that can
//! be refused for a gameplay reason (not enough grain, slot already busy,
//! recipe still locked) returns it inside an ordinary `Result`. None of these
//! represent faults; callers are expected to show them to the player and
//! carry on.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{RecipeId, ResourceId};

// ---------------------------------------------------------------------------
// Production category
// ---------------------------------------------------------------------------

/// What kind of good a production recipe yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ProductionCategory {
    /// Crops grown from seeds.
    Plant,
    /// Goods refined from raw materials.
    ManufacturedGood,
}

// ---------------------------------------------------------------------------
// Rejection taxonomy
// ---------------------------------------------------------------------------

/// Why a ledger, scheduler, or session operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export, export_to = "bindings/")]
pub enum Rejection {
    /// The ledger does not hold enough of a required resource.
    #[error("insufficient {resource}: need {required}, have {available}")]
    InsufficientResources {
        /// The missing resource.
        resource: ResourceId,
        /// Quantity the operation needs.
        required: u64,
        /// Quantity currently owned.
        available: u64,
    },

    /// The production slot already runs a job.
    #[error("production slot {slot} is occupied")]
    SlotOccupied {
        /// The busy slot.
        slot: usize,
    },

    /// The production slot holds neither a job nor a placeholder.
    #[error("production slot {slot} is empty")]
    SlotEmpty {
        /// The empty slot.
        slot: usize,
    },

    /// The slot index is outside the configured slot range.
    #[error("production slot {slot} does not exist")]
    InvalidSlot {
        /// The out-of-range index.
        slot: usize,
    },

    /// No recipe with this id exists in the catalog.
    #[error("recipe not found: {0}")]
    RecipeNotFound(RecipeId),

    /// The recipe exists but has not been discovered yet.
    #[error("recipe not discovered: {0}")]
    RecipeNotDiscovered(RecipeId),

    /// A quantity or multiplier is zero or above the allowed maximum.
    #[error("invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected value.
        quantity: u64,
    },

    /// No combination recipe matches the provided ingredients.
    #[error("nothing happens")]
    NoMatch,

    /// The currency balance cannot cover a purchase.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        /// Coins the purchase costs.
        required: u64,
        /// Coins currently owned.
        available: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_are_readable() {
        let rejection = Rejection::InsufficientResources {
            resource: ResourceId::new("seed_wheat"),
            required: 4,
            available: 3,
        };
        assert_eq!(rejection.to_string(), "insufficient seed_wheat: need 4, have 3");
        assert_eq!(Rejection::SlotOccupied { slot: 2 }.to_string(), "production slot 2 is occupied");
        assert_eq!(Rejection::NoMatch.to_string(), "nothing happens");
    }

    #[test]
    fn category_roundtrip_serde() {
        let json = serde_json::to_string(&ProductionCategory::ManufacturedGood).unwrap_or_default();
        assert_eq!(json, "\"ManufacturedGood\"");
        let back: Result<ProductionCategory, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(ProductionCategory::ManufacturedGood));
    }
}
