//! The resource ledger: a pruned multiset of owned resource quantities.
//!
//! # Design
//!
//! - **Never negative**: quantities are `u64` and removal is refused, not
//!   clamped, when the holding is too small.
//! - **Pruned**: an entry that reaches zero is deleted, so
//!   [`ResourceLedger::snapshot`] never reports empty stacks.
//! - **All-or-nothing batches**: [`ResourceLedger::remove_all`] validates
//!   every stack before touching any of them. Duplicate resources in a batch
//!   are summed first, so `[grain, grain]` needs two grain.
//! - **Checked arithmetic**: additions that would overflow are refused.
//!
//! Insufficiency is an ordinary outcome. [`ResourceLedger::remove`] returns
//! `false` and the batch methods return [`Rejection::InsufficientResources`].

use std::borrow::Borrow;
use std::collections::BTreeMap;

use iconforge_types::{Rejection, ResourceId, ResourceStack};

/// Sum a batch of stacks into one required quantity per resource.
///
/// Returns [`Rejection::InvalidQuantity`] if a per-resource sum overflows.
fn aggregate(stacks: &[ResourceStack]) -> Result<BTreeMap<&ResourceId, u64>, Rejection> {
    let mut totals: BTreeMap<&ResourceId, u64> = BTreeMap::new();
    for stack in stacks {
        let entry = totals.entry(&stack.resource_id).or_insert(0);
        *entry = entry
            .checked_add(stack.quantity)
            .ok_or(Rejection::InvalidQuantity {
                quantity: stack.quantity,
            })?;
    }
    Ok(totals)
}

/// Authoritative mapping of resource id to owned quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    /// Owned quantities. Every stored value is strictly positive.
    holdings: BTreeMap<ResourceId, u64>,
}

impl ResourceLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            holdings: BTreeMap::new(),
        }
    }

    /// Rebuild a ledger from persisted stacks.
    ///
    /// Zero-quantity stacks are dropped and duplicate resources are summed
    /// (saturating), so hand-edited or legacy save data still yields a valid
    /// ledger.
    pub fn from_stacks<I>(stacks: I) -> Self
    where
        I: IntoIterator<Item = ResourceStack>,
    {
        let mut holdings: BTreeMap<ResourceId, u64> = BTreeMap::new();
        for stack in stacks {
            if stack.quantity == 0 {
                continue;
            }
            let entry = holdings.entry(stack.resource_id).or_insert(0);
            *entry = entry.saturating_add(stack.quantity);
        }
        Self { holdings }
    }

    /// Return the owned quantity of `resource` (0 if absent).
    ///
    /// Accepts a [`ResourceId`] or a plain `&str`.
    pub fn quantity<Q>(&self, resource: &Q) -> u64
    where
        ResourceId: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.holdings.get(resource).copied().unwrap_or(0)
    }

    /// Check whether at least `quantity` units of `resource` are owned.
    pub fn has<Q>(&self, resource: &Q, quantity: u64) -> bool
    where
        ResourceId: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.quantity(resource) >= quantity
    }

    /// Add `quantity` units of `resource`. Returns the new total.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::InvalidQuantity`] if `quantity` is zero or the
    /// new total would overflow. The ledger is unchanged on error.
    pub fn add(&mut self, resource: &ResourceId, quantity: u64) -> Result<u64, Rejection> {
        if quantity == 0 {
            return Err(Rejection::InvalidQuantity { quantity });
        }
        let current = self.quantity(resource);
        let updated = current
            .checked_add(quantity)
            .ok_or(Rejection::InvalidQuantity { quantity })?;
        self.holdings.insert(resource.clone(), updated);
        Ok(updated)
    }

    /// Remove `quantity` units of `resource`.
    ///
    /// Returns `false` without mutating anything if fewer than `quantity`
    /// units are owned or `quantity` is zero. Removes the entry entirely
    /// when it reaches zero.
    pub fn remove<Q>(&mut self, resource: &Q, quantity: u64) -> bool
    where
        ResourceId: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if quantity == 0 {
            return false;
        }
        let Some(current) = self.holdings.get_mut(resource) else {
            return false;
        };
        let Some(remaining) = current.checked_sub(quantity) else {
            return false;
        };
        if remaining == 0 {
            self.holdings.remove(resource);
        } else {
            *current = remaining;
        }
        true
    }

    /// Check that every stack in `cost` is covered, summing duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::InsufficientResources`] naming the first short
    /// resource (in id order), or [`Rejection::InvalidQuantity`] on overflow.
    pub fn check_all(&self, cost: &[ResourceStack]) -> Result<(), Rejection> {
        for (resource, required) in aggregate(cost)? {
            let available = self.quantity(resource.as_str());
            if available < required {
                return Err(Rejection::InsufficientResources {
                    resource: resource.clone(),
                    required,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Remove every stack in `cost`, or nothing at all.
    ///
    /// All requirements are validated before the first removal, so a
    /// shortfall on the last ingredient never leaves earlier ones consumed.
    ///
    /// # Errors
    ///
    /// Same as [`ResourceLedger::check_all`]. The ledger is unchanged on error.
    pub fn remove_all(&mut self, cost: &[ResourceStack]) -> Result<(), Rejection> {
        self.check_all(cost)?;
        let totals = aggregate(cost)?;
        for (resource, required) in totals {
            if required == 0 {
                continue;
            }
            // Cannot fail: sufficiency was verified above and nothing else
            // mutates the ledger in between.
            if !self.remove(resource.as_str(), required) {
                tracing::error!(%resource, required, "validated removal refused");
            }
        }
        Ok(())
    }

    /// Credit every stack in `stacks`, skipping zero quantities.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::InvalidQuantity`] if any total would overflow; in
    /// that case nothing is credited.
    pub fn add_all(&mut self, stacks: &[ResourceStack]) -> Result<(), Rejection> {
        let totals = aggregate(stacks)?;
        for (resource, quantity) in &totals {
            if self.quantity(resource.as_str()).checked_add(*quantity).is_none() {
                return Err(Rejection::InvalidQuantity {
                    quantity: *quantity,
                });
            }
        }
        for (resource, quantity) in totals {
            if quantity > 0 {
                self.add(resource, quantity)?;
            }
        }
        Ok(())
    }

    /// Return all holdings as stacks, ordered by resource id.
    pub fn snapshot(&self) -> Vec<ResourceStack> {
        self.holdings
            .iter()
            .map(|(resource_id, quantity)| ResourceStack {
                resource_id: resource_id.clone(),
                quantity: *quantity,
            })
            .collect()
    }

    /// Return the number of distinct resources owned.
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Return whether nothing is owned.
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Iterate over `(resource, quantity)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceId, u64)> {
        self.holdings.iter().map(|(id, qty)| (id, *qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ResourceId {
        ResourceId::new(s)
    }

    fn stocked(entries: &[(&str, u64)]) -> ResourceLedger {
        ResourceLedger::from_stacks(
            entries
                .iter()
                .map(|(name, qty)| ResourceStack::new(*name, *qty)),
        )
    }

    #[test]
    fn add_stacks_quantities() {
        let mut ledger = ResourceLedger::new();
        assert_eq!(ledger.add(&id("grain"), 2), Ok(2));
        assert_eq!(ledger.add(&id("grain"), 3), Ok(5));
        assert_eq!(ledger.quantity("grain"), 5);
    }

    #[test]
    fn add_zero_is_rejected() {
        let mut ledger = ResourceLedger::new();
        assert_eq!(
            ledger.add(&id("grain"), 0),
            Err(Rejection::InvalidQuantity { quantity: 0 })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_overflow_is_rejected_without_mutation() {
        let mut ledger = stocked(&[("grain", u64::MAX)]);
        assert!(ledger.add(&id("grain"), 1).is_err());
        assert_eq!(ledger.quantity("grain"), u64::MAX);
    }

    #[test]
    fn remove_succeeds_iff_has() {
        let mut ledger = stocked(&[("wood", 4)]);
        for qty in 1..=6 {
            let mut copy = ledger.clone();
            assert_eq!(copy.has("wood", qty), copy.remove("wood", qty));
        }
        assert!(ledger.remove("wood", 3));
        assert!(!ledger.has("wood", 3));
        assert!(ledger.has("wood", 1));
    }

    #[test]
    fn remove_insufficient_leaves_ledger_unchanged() {
        let mut ledger = stocked(&[("wood", 3)]);
        assert!(!ledger.remove("wood", 5));
        assert_eq!(ledger.quantity("wood"), 3);
    }

    #[test]
    fn remove_to_zero_prunes_entry() {
        let mut ledger = stocked(&[("wood", 3), ("stone", 1)]);
        assert!(ledger.remove("wood", 3));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.snapshot(), vec![ResourceStack::new("stone", 1)]);
    }

    #[test]
    fn remove_absent_fails() {
        let mut ledger = ResourceLedger::new();
        assert!(!ledger.remove("wood", 1));
        assert!(!ledger.remove("wood", 0));
    }

    #[test]
    fn lookups_accept_ids_and_strs() {
        let mut ledger = ResourceLedger::new();
        let wheat = id("seed_wheat");
        assert_eq!(ledger.add(&wheat, 3), Ok(3));
        assert!(ledger.has(&wheat, 3));
        assert!(ledger.has("seed_wheat", 3));
        assert!(ledger.remove(&wheat, 2));
        assert!(!ledger.remove(&wheat, 2));
        assert_eq!(ledger.quantity(&wheat), ledger.quantity("seed_wheat"));
        assert_eq!(ledger.quantity(&wheat), 1);
    }

    #[test]
    fn has_zero_is_always_true() {
        assert!(ResourceLedger::new().has("anything", 0));
    }

    #[test]
    fn from_stacks_prunes_and_merges() {
        let ledger = stocked(&[("clay", 0), ("sand", 2), ("sand", 3)]);
        assert_eq!(ledger.snapshot(), vec![ResourceStack::new("sand", 5)]);
    }

    #[test]
    fn remove_all_is_atomic() {
        let mut ledger = stocked(&[("grain", 5), ("hardware", 1)]);
        let cost = vec![ResourceStack::new("grain", 2), ResourceStack::new("hardware", 2)];
        let result = ledger.remove_all(&cost);
        assert_eq!(
            result,
            Err(Rejection::InsufficientResources {
                resource: id("hardware"),
                required: 2,
                available: 1,
            })
        );
        assert_eq!(ledger.quantity("grain"), 5);
        assert_eq!(ledger.quantity("hardware"), 1);
    }

    #[test]
    fn remove_all_sums_duplicate_ingredients() {
        let mut ledger = stocked(&[("grain", 1)]);
        let cost = vec![ResourceStack::new("grain", 1), ResourceStack::new("grain", 1)];
        assert!(ledger.remove_all(&cost).is_err());
        assert_eq!(ledger.quantity("grain"), 1);

        ledger.add(&id("grain"), 1).ok();
        assert!(ledger.remove_all(&cost).is_ok());
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_all_credits_everything() {
        let mut ledger = stocked(&[("wheat", 1)]);
        let stacks = vec![ResourceStack::new("wheat", 2), ResourceStack::new("corn", 3)];
        assert!(ledger.add_all(&stacks).is_ok());
        assert_eq!(ledger.quantity("wheat"), 3);
        assert_eq!(ledger.quantity("corn"), 3);
    }

    #[test]
    fn add_all_overflow_credits_nothing() {
        let mut ledger = stocked(&[("corn", u64::MAX)]);
        let stacks = vec![ResourceStack::new("wheat", 2), ResourceStack::new("corn", 1)];
        assert!(ledger.add_all(&stacks).is_err());
        assert_eq!(ledger.quantity("wheat"), 0);
    }
}
