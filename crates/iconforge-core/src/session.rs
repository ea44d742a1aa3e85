//! The game session: one save slot's state and every operation on it.
//!
//! [`GameSession`] is constructed once per active save slot and owns the
//! ledger, currency, scheduler, registries, and event bus. The host passes
//! `now` into every time-dependent call and drives [`GameSession::tick`]
//! from its loop. Every successful mutation publishes [`GameEvent`]s;
//! rejected operations change nothing and publish nothing.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

use iconforge_ledger::{CurrencyAccount, ResourceLedger};
use iconforge_recipes::{RecipeCatalog, RecipeResolver};
use iconforge_store::schema::{
    CurrencyDoc, DiscoveredProductionsDoc, InventoryDoc, InventoryItemDoc, SchemaVersion,
    UnlockedIconsDoc,
};
use iconforge_store::{KeyValueStore, PersistenceGateway, StorageKey, StorageScope, StoreError};
use iconforge_types::{GameEvent, Rejection, RecipeId, ResourceId, ResourceStack};

use crate::clock::{AccrualClock, PollGate};
use crate::config::{GameConfig, RewardsConfig};
use crate::discovery::{DiscoveryRegistry, IconRegistry};
use crate::events::{EventBus, EventObserver, SubscriptionId};
use crate::production::{
    CancelledJob, CompletedJob, ProductionJob, ProductionScheduler, SlotState,
};

/// Result of a combine attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombineOutcome {
    /// The ingredients matched a recipe and were turned into its result.
    Crafted {
        /// The matched combination recipe.
        recipe_id: RecipeId,
        /// The credited result (one unit).
        result: ResourceStack,
        /// Whether this combine discovered the recipe.
        newly_discovered: bool,
    },
    /// No recipe matched. Nothing was consumed.
    NothingHappened,
}

/// What one [`GameSession::tick`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Whether the poll interval had elapsed and work ran.
    pub polled: bool,
    /// Jobs credited during this tick.
    pub completed: Vec<CompletedJob>,
    /// Coins granted by passive income during this tick.
    pub income: u64,
}

/// One save slot's live state.
#[derive(Debug)]
pub struct GameSession {
    scope: StorageScope,
    catalog: RecipeCatalog,
    resolver: RecipeResolver,
    ledger: ResourceLedger,
    currency: CurrencyAccount,
    scheduler: ProductionScheduler,
    discovery: DiscoveryRegistry,
    icons: IconRegistry,
    income: AccrualClock,
    poll_gate: PollGate,
    rewards: RewardsConfig,
    bus: EventBus,
}

impl GameSession {
    /// Start a new game in `scope` with the configured starting state.
    pub fn new(
        catalog: RecipeCatalog,
        config: &GameConfig,
        scope: StorageScope,
        now: DateTime<Utc>,
    ) -> Self {
        let mut session = Self::empty(catalog, config, scope, now);
        for (resource, quantity) in &config.discovery.starting_inventory {
            if *quantity == 0 {
                continue;
            }
            let id = ResourceId::new(resource.as_str());
            if session.ledger.add(&id, *quantity).is_ok() {
                session.icons.unlock(id);
            }
        }
        tracing::info!(
            suffix = %scope.suffix(),
            resources = session.ledger.len(),
            discovered = session.discovery.len(),
            "Started new game"
        );
        session
    }

    /// Load the game saved in `scope`, or start a new one if nothing was
    /// saved there.
    ///
    /// Missing or corrupt documents fall back to their defaults. A missing
    /// or corrupt currency document starts a fresh account at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the backing store cannot be read.
    pub fn load<S: KeyValueStore>(
        gateway: &PersistenceGateway<S>,
        catalog: RecipeCatalog,
        config: &GameConfig,
        scope: StorageScope,
        now: DateTime<Utc>,
    ) -> Result<Self, StoreError> {
        let inventory: Option<InventoryDoc> =
            gateway.load_optional(StorageKey::PlayerInventory, scope)?;
        let currency: Option<CurrencyDoc> =
            gateway.load_optional(StorageKey::CurrencyData, scope)?;
        if inventory.is_none() && currency.is_none() {
            return Ok(Self::new(catalog, config, scope, now));
        }

        let mut session = Self::empty(catalog, config, scope, now);

        for item in inventory.unwrap_or_default().items {
            let quantity = u64::try_from(item.quantity).unwrap_or(0);
            if quantity == 0 {
                tracing::warn!(resource = %item.icon_id, quantity = item.quantity, "Dropping non-positive stack");
                continue;
            }
            if let Err(rejection) = session.ledger.add(&ResourceId::new(item.icon_id), quantity) {
                tracing::warn!(%rejection, "Dropping unloadable stack");
            }
        }

        let discovered: DiscoveredProductionsDoc =
            gateway.load(StorageKey::DiscoveredProductions, scope)?;
        for id in discovered.discovered_ids {
            if session.catalog.contains(&id) {
                session.discovery.discover(RecipeId::new(id));
            } else {
                tracing::warn!(recipe = %id, "Dropping discovery of unknown recipe");
            }
        }

        let unlocked: UnlockedIconsDoc = gateway.load(StorageKey::UnlockedIcons, scope)?;
        for id in unlocked.unlocked_icon_ids {
            session.icons.unlock(ResourceId::new(id));
        }
        let owned: Vec<ResourceId> = session.ledger.iter().map(|(id, _)| id.clone()).collect();
        for id in owned {
            session.icons.unlock(id);
        }

        session.scheduler = ProductionScheduler::restore(
            &gateway.load(StorageKey::ActiveProductions, scope)?,
            &session.catalog,
            config.production.slot_count,
            config.production.max_multiplier,
            now,
        );

        if let Some(doc) = currency {
            session.currency = CurrencyAccount::from_parts(doc.coins, doc.last_passive_income_timestamp);
        }

        tracing::info!(
            suffix = %scope.suffix(),
            resources = session.ledger.len(),
            jobs = session.scheduler.jobs().count(),
            coins = session.currency.balance(),
            "Loaded game"
        );
        Ok(session)
    }

    fn empty(
        catalog: RecipeCatalog,
        config: &GameConfig,
        scope: StorageScope,
        now: DateTime<Utc>,
    ) -> Self {
        let mut bootstrap: Vec<RecipeId> = catalog.initially_discovered().cloned().collect();
        for id in &config.discovery.bootstrap_recipes {
            if catalog.contains(id) {
                bootstrap.push(RecipeId::new(id.as_str()));
            } else {
                tracing::warn!(recipe = %id, "Ignoring unknown bootstrap recipe");
            }
        }
        let poll_interval = i64::try_from(config.production.poll_interval_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX);
        Self {
            scope,
            resolver: RecipeResolver::new(&catalog),
            catalog,
            ledger: ResourceLedger::new(),
            currency: CurrencyAccount::new(now.timestamp()),
            scheduler: ProductionScheduler::new(
                config.production.slot_count,
                config.production.max_multiplier,
            ),
            discovery: DiscoveryRegistry::with_bootstrap(bootstrap),
            icons: IconRegistry::with_unlocked(
                config
                    .discovery
                    .bootstrap_icons
                    .iter()
                    .map(|id| ResourceId::new(id.as_str())),
            ),
            income: AccrualClock::new(
                config.passive_income.coins_per_interval,
                config.passive_income.interval_secs,
            ),
            poll_gate: PollGate::new(poll_interval),
            rewards: config.rewards.clone(),
            bus: EventBus::new(),
        }
    }

    /// Write every per-slot document, refreshing each job's saved elapsed
    /// time to `now` first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a write fails. Documents written before
    /// the failure stay written.
    pub fn checkpoint<S: KeyValueStore>(
        &mut self,
        gateway: &mut PersistenceGateway<S>,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let scope = self.scope;
        let inventory = InventoryDoc {
            schema_version: SchemaVersion::default(),
            items: self
                .ledger
                .iter()
                .map(|(id, quantity)| InventoryItemDoc {
                    icon_id: id.as_str().to_owned(),
                    quantity: i64::try_from(quantity).unwrap_or(i64::MAX),
                })
                .collect(),
        };
        gateway.save(StorageKey::PlayerInventory, scope, &inventory)?;
        gateway.save(StorageKey::ActiveProductions, scope, &self.scheduler.checkpoint(now))?;
        gateway.save(
            StorageKey::DiscoveredProductions,
            scope,
            &DiscoveredProductionsDoc {
                schema_version: SchemaVersion::default(),
                discovered_ids: self.discovery.iter().map(|id| id.as_str().to_owned()).collect(),
            },
        )?;
        gateway.save(
            StorageKey::UnlockedIcons,
            scope,
            &UnlockedIconsDoc {
                schema_version: SchemaVersion::default(),
                unlocked_icon_ids: self.icons.iter().map(|id| id.as_str().to_owned()).collect(),
            },
        )?;
        gateway.save(
            StorageKey::CurrencyData,
            scope,
            &CurrencyDoc {
                schema_version: SchemaVersion::default(),
                coins: self.currency.balance(),
                last_passive_income_timestamp: self.currency.last_accrual_timestamp(),
            },
        )?;
        tracing::info!(suffix = %scope.suffix(), "Checkpoint written");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Register an observer for every event published from now on.
    pub fn subscribe(&mut self, observer: Box<dyn EventObserver>) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn publish(&mut self, event: &GameEvent) {
        self.bus.publish(event);
    }

    fn publish_quantity(&mut self, resource_id: &ResourceId) {
        let quantity = self.ledger.quantity(resource_id.as_str());
        self.publish(&GameEvent::InventoryChanged {
            resource_id: resource_id.clone(),
            quantity,
        });
    }

    fn unlock_icon(&mut self, resource_id: &ResourceId) {
        if self.icons.unlock(resource_id.clone()) {
            tracing::debug!(resource = %resource_id, "Icon unlocked");
            self.publish(&GameEvent::IconUnlocked {
                resource_id: resource_id.clone(),
            });
        }
    }

    fn publish_balance(&mut self, delta: i64) {
        self.publish(&GameEvent::BalanceChanged {
            balance: self.currency.balance(),
            delta,
        });
    }

    // -----------------------------------------------------------------------
    // Ledger
    // -----------------------------------------------------------------------

    /// Add `quantity` of `resource`, unlocking its icon on first ownership.
    /// Returns the new total.
    ///
    /// # Errors
    ///
    /// [`Rejection::InvalidQuantity`] for zero or an overflowing total.
    pub fn add_resource(&mut self, resource: &str, quantity: u64) -> Result<u64, Rejection> {
        let id = ResourceId::new(resource);
        let total = self
            .ledger
            .add(&id, quantity)
            .inspect_err(|rejection| tracing::debug!(%rejection, resource, "Add rejected"))?;
        self.publish_quantity(&id);
        self.unlock_icon(&id);
        Ok(total)
    }

    /// Remove `quantity` of `resource`. Returns `false` and changes
    /// nothing if fewer are owned.
    pub fn remove_resource(&mut self, resource: &str, quantity: u64) -> bool {
        if !self.ledger.remove(resource, quantity) {
            tracing::debug!(resource, quantity, "Remove refused");
            return false;
        }
        self.publish_quantity(&ResourceId::new(resource));
        true
    }

    /// Return whether at least `quantity` of `resource` is owned.
    pub fn has_resource(&self, resource: &str, quantity: u64) -> bool {
        self.ledger.has(resource, quantity)
    }

    /// Return every owned stack, ordered by resource id.
    pub fn snapshot(&self) -> Vec<ResourceStack> {
        self.ledger.snapshot()
    }

    // -----------------------------------------------------------------------
    // Combination
    // -----------------------------------------------------------------------

    /// Combine `ingredients` (order irrelevant, repeats counted).
    ///
    /// On a match, every ingredient is consumed, one unit of the result is
    /// credited, and the recipe becomes discovered. No match is
    /// [`CombineOutcome::NothingHappened`].
    ///
    /// # Errors
    ///
    /// [`Rejection::InsufficientResources`] if a matched recipe's
    /// ingredients are not all owned; nothing is consumed.
    pub fn combine(&mut self, ingredients: &[ResourceId]) -> Result<CombineOutcome, Rejection> {
        let Some(recipe) = self.resolver.find_match(ingredients).cloned() else {
            tracing::debug!(count = ingredients.len(), "Nothing happens");
            return Ok(CombineOutcome::NothingHappened);
        };
        let cost = recipe.cost();
        self.ledger
            .remove_all(&cost)
            .inspect_err(|rejection| tracing::debug!(%rejection, recipe = %recipe.id, "Combine rejected"))?;
        if let Err(rejection) = self.ledger.add(&recipe.result, 1) {
            // Put the ingredients back; they were just removed so this fits.
            if self.ledger.add_all(&cost).is_err() {
                tracing::error!(recipe = %recipe.id, "Failed to restore combine ingredients");
            }
            return Err(rejection);
        }

        for stack in &cost {
            self.publish_quantity(&stack.resource_id);
        }
        self.publish_quantity(&recipe.result);
        self.unlock_icon(&recipe.result);
        let newly_discovered = self.discovery.discover(recipe.id.clone());
        if newly_discovered {
            self.publish(&GameEvent::RecipeDiscovered {
                recipe_id: recipe.id.clone(),
            });
        }
        tracing::debug!(recipe = %recipe.id, result = %recipe.result, "Combined");
        Ok(CombineOutcome::Crafted {
            recipe_id: recipe.id,
            result: ResourceStack {
                resource_id: recipe.result,
                quantity: 1,
            },
            newly_discovered,
        })
    }

    // -----------------------------------------------------------------------
    // Discovery
    // -----------------------------------------------------------------------

    /// Discover `recipe`. Returns `true` only the first time.
    ///
    /// # Errors
    ///
    /// [`Rejection::RecipeNotFound`] if no recipe has this id.
    pub fn discover(&mut self, recipe: &str) -> Result<bool, Rejection> {
        if !self.catalog.contains(recipe) {
            return Err(Rejection::RecipeNotFound(RecipeId::new(recipe)));
        }
        let recipe_id = RecipeId::new(recipe);
        let newly = self.discovery.discover(recipe_id.clone());
        if newly {
            self.publish(&GameEvent::RecipeDiscovered { recipe_id });
        }
        Ok(newly)
    }

    /// Return whether `recipe` is discovered.
    pub fn is_discovered(&self, recipe: &str) -> bool {
        self.discovery.is_discovered(recipe)
    }

    // -----------------------------------------------------------------------
    // Production
    // -----------------------------------------------------------------------

    /// Choose a production recipe for `slot` without consuming anything.
    ///
    /// # Errors
    ///
    /// [`Rejection::RecipeNotFound`], [`Rejection::InvalidSlot`], or
    /// [`Rejection::SlotOccupied`].
    pub fn set_placeholder(&mut self, slot: usize, recipe: &str) -> Result<(), Rejection> {
        let found = self
            .catalog
            .production(recipe)
            .ok_or_else(|| Rejection::RecipeNotFound(RecipeId::new(recipe)))
            .inspect_err(|rejection| tracing::debug!(%rejection, slot, "Placeholder rejected"))?;
        self.scheduler
            .set_placeholder(slot, found)
            .inspect_err(|rejection| tracing::debug!(%rejection, slot, "Placeholder rejected"))?;
        self.publish(&GameEvent::PlaceholderSet {
            slot,
            recipe_id: RecipeId::new(recipe),
        });
        Ok(())
    }

    /// Start `multiplier` batches of `recipe` in `slot` at `now`.
    ///
    /// # Errors
    ///
    /// [`Rejection::RecipeNotFound`], [`Rejection::RecipeNotDiscovered`],
    /// and the scheduler's slot, multiplier, and sufficiency rejections.
    pub fn start_production(
        &mut self,
        slot: usize,
        recipe: &str,
        multiplier: u32,
        now: DateTime<Utc>,
    ) -> Result<ProductionJob, Rejection> {
        let result = self.try_start(slot, recipe, multiplier, now);
        let job = result.inspect_err(
            |rejection| tracing::debug!(%rejection, slot, recipe, multiplier, "Start rejected"),
        )?;
        for stack in job.consumed() {
            self.publish_quantity(&stack.resource_id);
        }
        self.publish(&GameEvent::ProductionStarted {
            slot,
            recipe_id: job.recipe_id().clone(),
            multiplier,
            total_duration_secs: job.total_duration_secs(),
        });
        Ok(job)
    }

    fn try_start(
        &mut self,
        slot: usize,
        recipe: &str,
        multiplier: u32,
        now: DateTime<Utc>,
    ) -> Result<ProductionJob, Rejection> {
        let found = self
            .catalog
            .production(recipe)
            .ok_or_else(|| Rejection::RecipeNotFound(RecipeId::new(recipe)))?;
        if !self.discovery.is_discovered(recipe) {
            return Err(Rejection::RecipeNotDiscovered(found.id.clone()));
        }
        self.scheduler
            .start_production(slot, found, multiplier, &mut self.ledger, now)
    }

    /// Cancel whatever is in `slot`, refunding a running job's ingredients.
    ///
    /// # Errors
    ///
    /// [`Rejection::InvalidSlot`] or [`Rejection::SlotEmpty`].
    pub fn cancel_production(&mut self, slot: usize) -> Result<CancelledJob, Rejection> {
        let cancelled = self
            .scheduler
            .cancel_production(slot, &mut self.ledger)
            .inspect_err(|rejection| tracing::debug!(%rejection, slot, "Cancel rejected"))?;
        for stack in &cancelled.refunded {
            self.publish_quantity(&stack.resource_id);
        }
        self.publish(&GameEvent::ProductionCancelled {
            slot,
            recipe_id: cancelled.recipe_id.clone(),
            refunded: cancelled.refunded.clone(),
        });
        Ok(cancelled)
    }

    /// Return the running job in `slot`.
    pub fn get_active_job(&self, slot: usize) -> Option<&ProductionJob> {
        self.scheduler.get_active_job(slot)
    }

    /// Return the state of `slot`.
    pub fn slot_state(&self, slot: usize) -> Option<&SlotState> {
        self.scheduler.slot_state(slot)
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Advance the session to `now`.
    ///
    /// Work only runs once the poll interval has elapsed since the last
    /// run: completed jobs are credited and passive income is collected.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickSummary {
        if !self.poll_gate.ready(now) {
            return TickSummary::default();
        }
        let completed = self.scheduler.poll(now, &mut self.ledger);
        for job in &completed {
            self.publish_quantity(&job.output.resource_id);
            self.unlock_icon(&job.output.resource_id);
            self.publish(&GameEvent::ProductionCompleted {
                slot: job.slot,
                recipe_id: job.recipe_id.clone(),
                output: job.output.clone(),
            });
        }
        let income = self.collect_passive_income(now);
        TickSummary {
            polled: true,
            completed,
            income,
        }
    }

    /// Grant coins for every whole passive-income interval since the last
    /// collection. Returns the coins granted.
    pub fn collect_passive_income(&mut self, now: DateTime<Utc>) -> u64 {
        let accrual = self
            .income
            .collect(now.timestamp(), self.currency.last_accrual_timestamp());
        if accrual.units == 0 {
            return 0;
        }
        let balance = self.currency.apply_accrual(accrual.units, accrual.new_timestamp);
        tracing::info!(coins = accrual.units, balance, "Passive income collected");
        self.publish_balance(i64::try_from(accrual.units).unwrap_or(i64::MAX));
        accrual.units
    }

    // -----------------------------------------------------------------------
    // Currency
    // -----------------------------------------------------------------------

    /// Add `amount` coins. Returns the new balance.
    pub fn deposit_coins(&mut self, amount: u64) -> u64 {
        let balance = self.currency.deposit(amount);
        if amount > 0 {
            self.publish_balance(i64::try_from(amount).unwrap_or(i64::MAX));
        }
        balance
    }

    /// Spend `amount` coins. Returns the new balance.
    ///
    /// # Errors
    ///
    /// [`Rejection::InsufficientFunds`] if the balance is too small.
    pub fn spend_coins(&mut self, amount: u64) -> Result<u64, Rejection> {
        let available = self.currency.balance();
        if !self.currency.try_spend(amount) {
            tracing::debug!(amount, available, "Spend refused");
            return Err(Rejection::InsufficientFunds {
                required: amount,
                available,
            });
        }
        if amount > 0 {
            let delta = i64::try_from(amount)
                .ok()
                .and_then(i64::checked_neg)
                .unwrap_or(i64::MIN);
            self.publish_balance(delta);
        }
        Ok(self.currency.balance())
    }

    // -----------------------------------------------------------------------
    // Rewards
    // -----------------------------------------------------------------------

    /// Grant a random resource from the reward pool in a random quantity
    /// within the configured bounds. Returns `None` if the pool is empty.
    ///
    /// # Errors
    ///
    /// [`Rejection::InvalidQuantity`] if the grant would overflow.
    pub fn grant_random_reward<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<ResourceStack>, Rejection> {
        if self.rewards.pool.is_empty() {
            return Ok(None);
        }
        let index = rng.random_range(0..self.rewards.pool.len());
        let Some(resource) = self.rewards.pool.get(index).cloned() else {
            return Ok(None);
        };
        let low = self.rewards.min_quantity.max(1);
        let high = self.rewards.max_quantity.max(low);
        let quantity = rng.random_range(low..=high);
        self.add_resource(&resource, quantity)?;
        tracing::info!(resource = %resource, quantity, "Reward granted");
        Ok(Some(ResourceStack::new(resource, quantity)))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Return the storage scope this session saves to.
    pub const fn scope(&self) -> StorageScope {
        self.scope
    }

    /// Return the recipe catalog.
    pub const fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// Return the resource ledger.
    pub const fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Return the currency account.
    pub const fn currency(&self) -> &CurrencyAccount {
        &self.currency
    }

    /// Return the production scheduler.
    pub const fn scheduler(&self) -> &ProductionScheduler {
        &self.scheduler
    }

    /// Return the recipe discovery registry.
    pub const fn discovery(&self) -> &DiscoveryRegistry {
        &self.discovery
    }

    /// Return the unlocked icon registry.
    pub const fn icons(&self) -> &IconRegistry {
        &self.icons
    }

    /// Return how many icons are unlocked.
    pub fn unlocked_icons_count(&self) -> u64 {
        u64::try_from(self.icons.len()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use iconforge_recipes::reference_catalog;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn empty_start() -> GameConfig {
        let mut config = GameConfig::default();
        config.discovery.starting_inventory.clear();
        config.discovery.bootstrap_icons.clear();
        config
    }

    fn session() -> GameSession {
        GameSession::new(reference_catalog().unwrap(), &empty_start(), StorageScope::Legacy, t(0))
    }

    fn record(session: &mut GameSession) -> Rc<RefCell<Vec<GameEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(Box::new(move |event: &GameEvent| {
            sink.borrow_mut().push(event.clone());
        }));
        events
    }

    fn ids(names: &[&str]) -> Vec<ResourceId> {
        names.iter().map(|&n| ResourceId::new(n)).collect()
    }

    #[test]
    fn new_game_uses_starting_inventory() {
        let session = GameSession::new(
            reference_catalog().unwrap(),
            &GameConfig::default(),
            StorageScope::Legacy,
            t(0),
        );
        assert_eq!(session.ledger().quantity("seed_wheat"), 3);
        assert!(session.icons().is_unlocked("wood"));
        assert!(session.is_discovered("wheat_production"));
        assert_eq!(session.currency().last_accrual_timestamp(), t(0).timestamp());
    }

    #[test]
    fn first_add_unlocks_icon_once() {
        let mut session = session();
        let events = record(&mut session);
        assert_eq!(session.add_resource("clay", 2), Ok(2));
        assert_eq!(session.add_resource("clay", 1), Ok(3));
        let unlocks = events
            .borrow()
            .iter()
            .filter(|e| matches!(e, GameEvent::IconUnlocked { .. }))
            .count();
        assert_eq!(unlocks, 1);
        assert_eq!(session.add_resource("clay", 0), Err(Rejection::InvalidQuantity { quantity: 0 }));
    }

    #[test]
    fn remove_publishes_pruned_quantity() {
        let mut session = session();
        assert!(session.add_resource("wood", 2).is_ok());
        let events = record(&mut session);
        assert!(!session.remove_resource("wood", 3));
        assert!(session.remove_resource("wood", 2));
        assert!(!session.has_resource("wood", 1));
        assert_eq!(
            *events.borrow(),
            vec![GameEvent::InventoryChanged {
                resource_id: ResourceId::new("wood"),
                quantity: 0,
            }]
        );
    }

    #[test]
    fn combine_consumes_and_discovers() {
        let mut session = session();
        assert!(session.add_resource("grain", 1).is_ok());
        assert!(session.add_resource("hardware", 1).is_ok());
        let outcome = session.combine(&ids(&["hardware", "grain"])).unwrap();
        assert_eq!(
            outcome,
            CombineOutcome::Crafted {
                recipe_id: RecipeId::new("combo_flour"),
                result: ResourceStack::new("nutrition", 1),
                newly_discovered: true,
            }
        );
        assert_eq!(session.ledger().quantity("grain"), 0);
        assert_eq!(session.ledger().quantity("nutrition"), 1);
        assert!(session.is_discovered("combo_flour"));
        assert!(session.icons().is_unlocked("nutrition"));
    }

    #[test]
    fn combine_without_match_does_nothing() {
        let mut session = session();
        assert!(session.add_resource("grain", 1).is_ok());
        let before = session.snapshot();
        assert_eq!(
            session.combine(&ids(&["grain", "grain", "grain", "grain"])),
            Ok(CombineOutcome::NothingHappened)
        );
        assert_eq!(session.combine(&[]), Ok(CombineOutcome::NothingHappened));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn combine_requires_every_ingredient() {
        let mut session = session();
        assert!(session.add_resource("wheat", 1).is_ok());
        assert_eq!(
            session.combine(&ids(&["wheat", "wheat"])),
            Err(Rejection::InsufficientResources {
                resource: ResourceId::new("wheat"),
                required: 2,
                available: 1,
            })
        );
        assert_eq!(session.ledger().quantity("wheat"), 1);
    }

    #[test]
    fn start_requires_discovery() {
        let mut session = session();
        assert!(session.add_resource("sand", 2).is_ok());
        assert_eq!(
            session.start_production(0, "glass_production", 1, t(0)),
            Err(Rejection::RecipeNotDiscovered(RecipeId::new("glass_production")))
        );
        assert_eq!(
            session.start_production(0, "gold_production", 1, t(0)),
            Err(Rejection::RecipeNotFound(RecipeId::new("gold_production")))
        );
        assert_eq!(session.discover("glass_production"), Ok(true));
        assert_eq!(session.discover("glass_production"), Ok(false));
        assert!(session.start_production(0, "glass_production", 1, t(0)).is_ok());
        assert_eq!(session.ledger().quantity("sand"), 0);
    }

    #[test]
    fn tick_is_throttled_and_completes_jobs() {
        let mut session = session();
        assert!(session.add_resource("seed_wheat", 1).is_ok());
        assert!(session.start_production(0, "wheat_production", 1, t(0)).is_ok());
        let events = record(&mut session);

        assert!(session.tick(t(0)).polled);
        assert!(!session.tick(t(0)).polled);
        let summary = session.tick(t(15));
        assert!(summary.polled);
        assert_eq!(summary.completed.len(), 1);
        assert_eq!(session.ledger().quantity("wheat"), 1);
        assert!(events.borrow().iter().any(|e| matches!(
            e,
            GameEvent::ProductionCompleted { slot: 0, .. }
        )));
        assert_eq!(session.slot_state(0), Some(&SlotState::Empty));
    }

    #[test]
    fn passive_income_through_tick() {
        let mut session = session();
        let summary = session.tick(t(3 * 3_600 + 1_800));
        assert_eq!(summary.income, 3);
        assert_eq!(session.currency().balance(), 3);
        assert_eq!(session.currency().last_accrual_timestamp(), t(3 * 3_600).timestamp());
    }

    #[test]
    fn spending_never_goes_negative() {
        let mut session = session();
        assert_eq!(session.deposit_coins(5), 5);
        assert_eq!(
            session.spend_coins(6),
            Err(Rejection::InsufficientFunds {
                required: 6,
                available: 5
            })
        );
        assert_eq!(session.spend_coins(5), Ok(0));
    }

    #[test]
    fn random_reward_comes_from_pool() {
        let mut session = session();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let granted = session.grant_random_reward(&mut rng).unwrap().unwrap();
            assert!(session.rewards.pool.iter().any(|p| p == granted.resource_id.as_str()));
            assert!((1..=3).contains(&granted.quantity));
        }
    }

    #[test]
    fn empty_reward_pool_grants_nothing() {
        let mut config = empty_start();
        config.rewards.pool.clear();
        let mut session =
            GameSession::new(reference_catalog().unwrap(), &config, StorageScope::Legacy, t(0));
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(session.grant_random_reward(&mut rng), Ok(None));
        assert!(session.ledger().is_empty());
    }
}
