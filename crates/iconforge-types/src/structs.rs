//! Small value structs shared by the ledger, scheduler, and UI layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::ResourceId;

/// A quantity of one resource, as reported by ledger snapshots and used for
/// recipe costs and refunds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResourceStack {
    /// The resource being counted.
    pub resource_id: ResourceId,
    /// How many units. Snapshots never contain zero-quantity stacks.
    pub quantity: u64,
}

impl ResourceStack {
    /// Create a stack of `quantity` units of `resource_id`.
    pub fn new(resource_id: impl Into<ResourceId>, quantity: u64) -> Self {
        Self {
            resource_id: resource_id.into(),
            quantity,
        }
    }
}
