//! Timed production slots.
//!
//! Each slot moves through `Empty -> Placeholder -> Running -> Empty`.
//! Starting a job consumes `ingredients x multiplier` from the ledger (all
//! checked before any is removed) and records exactly what was taken, so a
//! cancel refunds the same stacks no matter how long the job ran.
//!
//! # Time
//!
//! A job's elapsed time is `elapsed_before + (now - resumed_at)`. A fresh
//! job has `elapsed_before = 0` and `resumed_at = start`. Restoring from a
//! checkpoint sets `elapsed_before = savedElapsedTime` and `resumed_at` to
//! the load instant, which is `start = load - savedElapsed` without the
//! rounding of converting seconds back to an instant. Time the process was
//! not running is never counted.
//!
//! The completion predicate is `elapsed >= total`, evaluated whenever the
//! host polls; a late poll credits the job late but never changes what is
//! credited.

use chrono::{DateTime, TimeDelta, Utc};

use iconforge_ledger::ResourceLedger;
use iconforge_recipes::{ProductionRecipe, RecipeCatalog};
use iconforge_store::schema::{ActiveProductionsDoc, ProductionDoc, SchemaVersion};
use iconforge_types::{Rejection, RecipeId, ResourceId, ResourceStack};

/// Number of production slots.
pub const MAX_PRODUCTION_SLOTS: usize = 5;

/// Seconds from `from` to `to`, or zero if `to` is earlier.
fn secs_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    to.signed_duration_since(from)
        .to_std()
        .map_or(0.0, |d| d.as_secs_f64())
}

/// Convert non-negative seconds to a `TimeDelta`, if representable.
fn secs_to_delta(secs: f64) -> Option<TimeDelta> {
    std::time::Duration::try_from_secs_f64(secs)
        .ok()
        .and_then(|d| TimeDelta::from_std(d).ok())
}

// ---------------------------------------------------------------------------
// ProductionJob
// ---------------------------------------------------------------------------

/// A running job in one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionJob {
    slot: usize,
    recipe_id: RecipeId,
    result: ResourceId,
    multiplier: u32,
    total_duration_secs: f64,
    /// Elapsed seconds banked before `resumed_at`.
    elapsed_before_secs: f64,
    /// When the job began running in this process.
    resumed_at: DateTime<Utc>,
    /// Elapsed seconds as of the last checkpoint.
    saved_elapsed_secs: f64,
    /// Stacks removed from the ledger at start; refunded on cancel.
    consumed: Vec<ResourceStack>,
}

impl ProductionJob {
    /// Return the slot the job runs in.
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Return the production recipe id.
    pub const fn recipe_id(&self) -> &RecipeId {
        &self.recipe_id
    }

    /// Return the batch multiplier.
    pub const fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Return `baseDuration x multiplier`.
    pub const fn total_duration_secs(&self) -> f64 {
        self.total_duration_secs
    }

    /// Return the elapsed seconds recorded at the last checkpoint.
    pub const fn saved_elapsed_secs(&self) -> f64 {
        self.saved_elapsed_secs
    }

    /// Return the ingredients consumed at start.
    pub fn consumed(&self) -> &[ResourceStack] {
        &self.consumed
    }

    /// Return what completion credits: `result x multiplier`.
    pub fn output(&self) -> ResourceStack {
        ResourceStack {
            resource_id: self.result.clone(),
            quantity: u64::from(self.multiplier),
        }
    }

    /// Return the effective start instant, `resumed_at - elapsed_before`.
    pub fn start_time(&self) -> DateTime<Utc> {
        secs_to_delta(self.elapsed_before_secs)
            .and_then(|delta| self.resumed_at.checked_sub_signed(delta))
            .unwrap_or(self.resumed_at)
    }

    /// Return seconds of progress at `now`.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        self.elapsed_before_secs + secs_between(self.resumed_at, now)
    }

    /// Return seconds left at `now`, never negative.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> f64 {
        (self.total_duration_secs - self.elapsed_secs(now)).max(0.0)
    }

    /// Return completion in `[0, 1]` at `now`.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        if self.total_duration_secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed_secs(now) / self.total_duration_secs).clamp(0.0, 1.0)
    }

    /// Return whether the job has run its full duration at `now`.
    pub fn is_complete(&self, now: DateTime<Utc>) -> bool {
        self.elapsed_secs(now) >= self.total_duration_secs
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// What a slot currently holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SlotState {
    /// Nothing.
    #[default]
    Empty,
    /// A chosen recipe that has not consumed anything yet.
    Placeholder(RecipeId),
    /// A funded, running job.
    Running(ProductionJob),
}

/// A job credited by [`ProductionScheduler::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedJob {
    /// The slot that ran the job.
    pub slot: usize,
    /// The production recipe.
    pub recipe_id: RecipeId,
    /// What was credited.
    pub output: ResourceStack,
}

/// A slot cleared by [`ProductionScheduler::cancel_production`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelledJob {
    /// The cleared slot.
    pub slot: usize,
    /// The recipe that was running or chosen.
    pub recipe_id: RecipeId,
    /// Stacks returned to the ledger; empty for a placeholder.
    pub refunded: Vec<ResourceStack>,
}

// ---------------------------------------------------------------------------
// ProductionScheduler
// ---------------------------------------------------------------------------

/// Owns the production slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionScheduler {
    slots: Vec<SlotState>,
    max_multiplier: u32,
}

impl Default for ProductionScheduler {
    fn default() -> Self {
        Self::new(MAX_PRODUCTION_SLOTS, u32::MAX)
    }
}

impl ProductionScheduler {
    /// Create a scheduler with `slot_count` empty slots (clamped to
    /// `1..=MAX_PRODUCTION_SLOTS`) accepting multipliers up to
    /// `max_multiplier` (at least 1).
    pub fn new(slot_count: usize, max_multiplier: u32) -> Self {
        let count = slot_count.clamp(1, MAX_PRODUCTION_SLOTS);
        Self {
            slots: vec![SlotState::Empty; count],
            max_multiplier: max_multiplier.max(1),
        }
    }

    /// Return the number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Return the largest accepted multiplier.
    pub const fn max_multiplier(&self) -> u32 {
        self.max_multiplier
    }

    /// Return the state of `slot`, or `None` if out of range.
    pub fn slot_state(&self, slot: usize) -> Option<&SlotState> {
        self.slots.get(slot)
    }

    /// Return the running job in `slot`.
    pub fn get_active_job(&self, slot: usize) -> Option<&ProductionJob> {
        match self.slots.get(slot) {
            Some(SlotState::Running(job)) => Some(job),
            _ => None,
        }
    }

    /// Iterate over running jobs in slot order.
    pub fn jobs(&self) -> impl Iterator<Item = &ProductionJob> {
        self.slots.iter().filter_map(|state| match state {
            SlotState::Running(job) => Some(job),
            _ => None,
        })
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut SlotState, Rejection> {
        self.slots.get_mut(slot).ok_or(Rejection::InvalidSlot { slot })
    }

    /// Choose `recipe` for `slot` without consuming anything.
    ///
    /// Replaces an existing placeholder.
    ///
    /// # Errors
    ///
    /// [`Rejection::InvalidSlot`] or [`Rejection::SlotOccupied`] if a job is
    /// running there.
    pub fn set_placeholder(
        &mut self,
        slot: usize,
        recipe: &ProductionRecipe,
    ) -> Result<(), Rejection> {
        let state = self.slot_mut(slot)?;
        if matches!(state, SlotState::Running(_)) {
            return Err(Rejection::SlotOccupied { slot });
        }
        *state = SlotState::Placeholder(recipe.id.clone());
        Ok(())
    }

    /// Consume `recipe`'s ingredients x `multiplier` and start a job in
    /// `slot` at `now`. A placeholder in the slot is replaced.
    ///
    /// # Errors
    ///
    /// - [`Rejection::InvalidSlot`] for an out-of-range slot.
    /// - [`Rejection::SlotOccupied`] if a job is already running there.
    /// - [`Rejection::InvalidQuantity`] for a multiplier of zero or above
    ///   the maximum.
    /// - [`Rejection::InsufficientResources`] if any ingredient is short;
    ///   nothing is consumed in that case.
    pub fn start_production(
        &mut self,
        slot: usize,
        recipe: &ProductionRecipe,
        multiplier: u32,
        ledger: &mut ResourceLedger,
        now: DateTime<Utc>,
    ) -> Result<ProductionJob, Rejection> {
        let max_multiplier = self.max_multiplier;
        let state = self.slot_mut(slot)?;
        if matches!(state, SlotState::Running(_)) {
            return Err(Rejection::SlotOccupied { slot });
        }
        if multiplier == 0 || multiplier > max_multiplier {
            return Err(Rejection::InvalidQuantity {
                quantity: u64::from(multiplier),
            });
        }
        let cost = recipe.cost(multiplier).ok_or(Rejection::InvalidQuantity {
            quantity: u64::from(multiplier),
        })?;
        ledger.remove_all(&cost)?;

        let job = ProductionJob {
            slot,
            recipe_id: recipe.id.clone(),
            result: recipe.result.clone(),
            multiplier,
            total_duration_secs: recipe.total_duration_secs(multiplier),
            elapsed_before_secs: 0.0,
            resumed_at: now,
            saved_elapsed_secs: 0.0,
            consumed: cost,
        };
        tracing::info!(
            slot,
            recipe = %job.recipe_id,
            multiplier,
            total_secs = job.total_duration_secs,
            "Production started"
        );
        *state = SlotState::Running(job.clone());
        Ok(job)
    }

    /// Clear `slot`, refunding a running job's consumed ingredients.
    ///
    /// # Errors
    ///
    /// [`Rejection::InvalidSlot`], [`Rejection::SlotEmpty`], or
    /// [`Rejection::InvalidQuantity`] if the refund would overflow the
    /// ledger (the job is kept).
    pub fn cancel_production(
        &mut self,
        slot: usize,
        ledger: &mut ResourceLedger,
    ) -> Result<CancelledJob, Rejection> {
        let state = self.slot_mut(slot)?;
        match std::mem::take(state) {
            SlotState::Empty => Err(Rejection::SlotEmpty { slot }),
            SlotState::Placeholder(recipe_id) => Ok(CancelledJob {
                slot,
                recipe_id,
                refunded: Vec::new(),
            }),
            SlotState::Running(job) => {
                if let Err(rejection) = ledger.add_all(&job.consumed) {
                    *state = SlotState::Running(job);
                    return Err(rejection);
                }
                tracing::info!(slot, recipe = %job.recipe_id, "Production cancelled");
                Ok(CancelledJob {
                    slot,
                    recipe_id: job.recipe_id,
                    refunded: job.consumed,
                })
            }
        }
    }

    /// Credit and clear every job that is complete at `now`.
    ///
    /// A job whose output would overflow the ledger stays in its slot.
    pub fn poll(&mut self, now: DateTime<Utc>, ledger: &mut ResourceLedger) -> Vec<CompletedJob> {
        let mut completed = Vec::new();
        for (slot, state) in self.slots.iter_mut().enumerate() {
            let SlotState::Running(job) = state else {
                continue;
            };
            if !job.is_complete(now) {
                continue;
            }
            let output = job.output();
            if let Err(rejection) = ledger.add(&output.resource_id, output.quantity) {
                tracing::warn!(slot, recipe = %job.recipe_id, %rejection, "Cannot credit production output");
                continue;
            }
            tracing::info!(
                slot,
                recipe = %job.recipe_id,
                resource = %output.resource_id,
                quantity = output.quantity,
                "Production completed"
            );
            completed.push(CompletedJob {
                slot,
                recipe_id: job.recipe_id.clone(),
                output,
            });
            *state = SlotState::Empty;
        }
        tracing::debug!(completed = completed.len(), "Production poll");
        completed
    }

    /// Refresh every job's saved elapsed time at `now` and return the
    /// persisted form.
    pub fn checkpoint(&mut self, now: DateTime<Utc>) -> ActiveProductionsDoc {
        let mut productions = Vec::new();
        for state in &mut self.slots {
            let SlotState::Running(job) = state else {
                continue;
            };
            job.saved_elapsed_secs = job.elapsed_secs(now);
            productions.push(ProductionDoc {
                slot_index: job.slot,
                production_id: job.recipe_id.as_str().to_owned(),
                multiplier: job.multiplier,
                start_time: secs_between(DateTime::<Utc>::UNIX_EPOCH, job.start_time()),
                total_time: job.total_duration_secs,
                saved_elapsed_time: job.saved_elapsed_secs,
            });
        }
        ActiveProductionsDoc {
            schema_version: SchemaVersion::default(),
            productions,
        }
    }

    /// Rebuild the scheduler from a checkpoint, resuming every job at `now`
    /// with its saved elapsed time.
    ///
    /// Entries naming an unknown recipe, an out-of-range or already used
    /// slot, or a zero multiplier are skipped with a warning. Consumed
    /// stacks are recomputed from the catalog so a later cancel refunds
    /// them.
    pub fn restore(
        doc: &ActiveProductionsDoc,
        catalog: &RecipeCatalog,
        slot_count: usize,
        max_multiplier: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let mut scheduler = Self::new(slot_count, max_multiplier);
        for entry in &doc.productions {
            let Some(recipe) = catalog.production(&entry.production_id) else {
                tracing::warn!(recipe = %entry.production_id, "Skipping job for unknown recipe");
                continue;
            };
            let Some(cost) = (entry.multiplier > 0)
                .then(|| recipe.cost(entry.multiplier))
                .flatten()
            else {
                tracing::warn!(
                    recipe = %entry.production_id,
                    multiplier = entry.multiplier,
                    "Skipping job with invalid multiplier"
                );
                continue;
            };
            let Some(state) = scheduler.slots.get_mut(entry.slot_index) else {
                tracing::warn!(slot = entry.slot_index, "Skipping job in out-of-range slot");
                continue;
            };
            if !matches!(state, SlotState::Empty) {
                tracing::warn!(slot = entry.slot_index, "Skipping duplicate job for slot");
                continue;
            }
            let saved = if entry.saved_elapsed_time.is_finite() && entry.saved_elapsed_time >= 0.0 {
                entry.saved_elapsed_time
            } else {
                0.0
            };
            let total = if entry.total_time.is_finite() && entry.total_time > 0.0 {
                entry.total_time
            } else {
                recipe.total_duration_secs(entry.multiplier)
            };
            *state = SlotState::Running(ProductionJob {
                slot: entry.slot_index,
                recipe_id: recipe.id.clone(),
                result: recipe.result.clone(),
                multiplier: entry.multiplier,
                total_duration_secs: total,
                elapsed_before_secs: saved,
                resumed_at: now,
                saved_elapsed_secs: saved,
                consumed: cost,
            });
        }
        scheduler
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::arithmetic_side_effects,
    clippy::float_cmp,
    clippy::indexing_slicing
)]
mod tests {
    use iconforge_recipes::reference_catalog;
    use iconforge_types::ProductionCategory;

    use super::*;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn wheat() -> ProductionRecipe {
        ProductionRecipe {
            id: RecipeId::new("wheat_production"),
            ingredients: vec![ResourceId::new("seed_wheat")],
            result: ResourceId::new("wheat"),
            base_duration_secs: 15.0,
            category: ProductionCategory::Plant,
            discovered: true,
        }
    }

    fn glass() -> ProductionRecipe {
        ProductionRecipe {
            id: RecipeId::new("glass_production"),
            ingredients: vec![ResourceId::new("sand"), ResourceId::new("sand")],
            result: ResourceId::new("glass"),
            base_duration_secs: 30.0,
            category: ProductionCategory::ManufacturedGood,
            discovered: false,
        }
    }

    fn ledger(stacks: &[(&str, u64)]) -> ResourceLedger {
        ResourceLedger::from_stacks(stacks.iter().map(|&(id, q)| ResourceStack::new(id, q)))
    }

    #[test]
    fn start_consumes_ingredients_times_multiplier() {
        let mut scheduler = ProductionScheduler::new(5, 10);
        let mut ledger = ledger(&[("seed_wheat", 3)]);
        let job = scheduler
            .start_production(0, &wheat(), 2, &mut ledger, t(0))
            .unwrap();
        assert_eq!(ledger.quantity("seed_wheat"), 1);
        assert_eq!(job.total_duration_secs(), 30.0);
        assert_eq!(job.consumed(), [ResourceStack::new("seed_wheat", 2)]);
        assert!(scheduler.get_active_job(0).is_some());
    }

    #[test]
    fn start_counts_repeated_ingredients() {
        let mut scheduler = ProductionScheduler::new(5, 10);
        let mut ledger = ledger(&[("sand", 5)]);
        assert_eq!(
            scheduler.start_production(1, &glass(), 3, &mut ledger, t(0)),
            Err(Rejection::InsufficientResources {
                resource: ResourceId::new("sand"),
                required: 6,
                available: 5,
            })
        );
        assert_eq!(ledger.quantity("sand"), 5);
        assert!(scheduler.start_production(1, &glass(), 2, &mut ledger, t(0)).is_ok());
        assert_eq!(ledger.quantity("sand"), 1);
    }

    #[test]
    fn second_start_on_same_slot_is_rejected() {
        let mut scheduler = ProductionScheduler::new(5, 10);
        let mut ledger = ledger(&[("seed_wheat", 5)]);
        let first = scheduler
            .start_production(2, &wheat(), 1, &mut ledger, t(0))
            .unwrap();
        assert_eq!(
            scheduler.start_production(2, &wheat(), 1, &mut ledger, t(1)),
            Err(Rejection::SlotOccupied { slot: 2 })
        );
        assert_eq!(scheduler.get_active_job(2), Some(&first));
        assert_eq!(ledger.quantity("seed_wheat"), 4);
    }

    #[test]
    fn multiplier_bounds() {
        let mut scheduler = ProductionScheduler::new(5, 3);
        let mut ledger = ledger(&[("seed_wheat", 50)]);
        assert_eq!(
            scheduler.start_production(0, &wheat(), 0, &mut ledger, t(0)),
            Err(Rejection::InvalidQuantity { quantity: 0 })
        );
        assert_eq!(
            scheduler.start_production(0, &wheat(), 4, &mut ledger, t(0)),
            Err(Rejection::InvalidQuantity { quantity: 4 })
        );
        assert_eq!(
            scheduler.start_production(5, &wheat(), 1, &mut ledger, t(0)),
            Err(Rejection::InvalidSlot { slot: 5 })
        );
        assert_eq!(ledger.quantity("seed_wheat"), 50);
    }

    #[test]
    fn placeholder_lifecycle() {
        let mut scheduler = ProductionScheduler::new(5, 10);
        let mut ledger = ledger(&[("seed_wheat", 1)]);
        assert!(scheduler.set_placeholder(3, &wheat()).is_ok());
        assert_eq!(
            scheduler.slot_state(3),
            Some(&SlotState::Placeholder(RecipeId::new("wheat_production")))
        );
        assert!(scheduler.get_active_job(3).is_none());

        let cancelled = scheduler.cancel_production(3, &mut ledger).unwrap();
        assert!(cancelled.refunded.is_empty());
        assert_eq!(scheduler.slot_state(3), Some(&SlotState::Empty));

        assert!(scheduler.set_placeholder(3, &wheat()).is_ok());
        assert!(scheduler.start_production(3, &wheat(), 1, &mut ledger, t(0)).is_ok());
        assert_eq!(
            scheduler.set_placeholder(3, &wheat()),
            Err(Rejection::SlotOccupied { slot: 3 })
        );
        assert_eq!(
            scheduler.cancel_production(4, &mut ledger),
            Err(Rejection::SlotEmpty { slot: 4 })
        );
    }

    #[test]
    fn cancel_refunds_consumed_regardless_of_elapsed() {
        let mut scheduler = ProductionScheduler::new(5, 10);
        let mut ledger = ledger(&[("sand", 4)]);
        assert!(scheduler.start_production(0, &glass(), 2, &mut ledger, t(0)).is_ok());
        assert!(ledger.is_empty());
        assert!(scheduler.poll(t(59), &mut ledger).is_empty());
        let cancelled = scheduler.cancel_production(0, &mut ledger).unwrap();
        assert_eq!(cancelled.refunded, vec![ResourceStack::new("sand", 4)]);
        assert_eq!(ledger.quantity("sand"), 4);
        assert_eq!(scheduler.slot_state(0), Some(&SlotState::Empty));
    }

    #[test]
    fn poll_credits_result_times_multiplier() {
        let mut scheduler = ProductionScheduler::new(5, 10);
        let mut ledger = ledger(&[("seed_wheat", 3)]);
        assert!(scheduler.start_production(0, &wheat(), 3, &mut ledger, t(0)).is_ok());
        let job = scheduler.get_active_job(0).unwrap();
        assert_eq!(job.remaining_secs(t(15)), 30.0);
        assert_eq!(job.progress(t(15)), 1.0 / 3.0);

        assert!(scheduler.poll(t(44), &mut ledger).is_empty());
        let done = scheduler.poll(t(45), &mut ledger);
        assert_eq!(
            done,
            vec![CompletedJob {
                slot: 0,
                recipe_id: RecipeId::new("wheat_production"),
                output: ResourceStack::new("wheat", 3),
            }]
        );
        assert_eq!(ledger.quantity("wheat"), 3);
        assert!(scheduler.get_active_job(0).is_none());
    }

    #[test]
    fn late_poll_still_completes() {
        let mut scheduler = ProductionScheduler::new(5, 10);
        let mut ledger = ledger(&[("seed_wheat", 1)]);
        assert!(scheduler.start_production(4, &wheat(), 1, &mut ledger, t(0)).is_ok());
        assert_eq!(scheduler.poll(t(3_600), &mut ledger).len(), 1);
        assert_eq!(ledger.quantity("wheat"), 1);
    }

    #[test]
    fn checkpoint_and_restore_preserve_remaining_time() {
        let catalog = reference_catalog().unwrap();
        let recipe = catalog.production("wheat_production").unwrap().clone();
        let mut scheduler = ProductionScheduler::new(5, 10);
        let mut ledger = ledger(&[("seed_wheat", 2)]);
        assert!(scheduler.start_production(1, &recipe, 2, &mut ledger, t(0)).is_ok());

        let save_at = t(12) + TimeDelta::milliseconds(345);
        let remaining_before = scheduler.get_active_job(1).unwrap().remaining_secs(save_at);
        let doc = scheduler.checkpoint(save_at);
        assert_eq!(doc.productions.len(), 1);
        assert!((doc.productions[0].saved_elapsed_time - 12.345).abs() < 1e-9);

        // Load a day later: the job resumes where it was saved.
        let load_at = t(86_400);
        let restored = ProductionScheduler::restore(&doc, &catalog, 5, 10, load_at);
        let job = restored.get_active_job(1).unwrap();
        assert_eq!(job.saved_elapsed_secs(), doc.productions[0].saved_elapsed_time);
        assert_eq!(job.remaining_secs(load_at), remaining_before);
        assert_eq!(job.consumed(), [ResourceStack::new("seed_wheat", 2)]);
    }

    #[test]
    fn restore_skips_bad_entries() {
        let catalog = reference_catalog().unwrap();
        let entry = |slot_index: usize, production_id: &str, multiplier: u32| ProductionDoc {
            slot_index,
            production_id: production_id.to_owned(),
            multiplier,
            start_time: 0.0,
            total_time: 15.0,
            saved_elapsed_time: 1.0,
        };
        let doc = ActiveProductionsDoc {
            schema_version: SchemaVersion::default(),
            productions: vec![
                entry(0, "wheat_production", 1),
                entry(0, "plank_production", 1),
                entry(7, "wheat_production", 1),
                entry(1, "no_such_recipe", 1),
                entry(2, "wheat_production", 0),
            ],
        };
        let restored = ProductionScheduler::restore(&doc, &catalog, 5, 10, t(0));
        assert_eq!(restored.jobs().count(), 1);
        assert_eq!(
            restored.get_active_job(0).map(|j| j.recipe_id().as_str()),
            Some("wheat_production")
        );
    }
}
