//! Production scheduling, time accrual, discovery, and the game session for
//! Iconforge.
//!
//! # Modules
//!
//! - [`clock`] -- Host clocks, whole-interval accrual, and the poll throttle.
//! - [`config`] -- `iconforge.yaml` loading into [`GameConfig`].
//! - [`discovery`] -- Monotonic recipe and icon registries.
//! - [`events`] -- [`EventBus`] and the [`EventObserver`] trait.
//! - [`production`] -- The five-slot [`ProductionScheduler`].
//! - [`session`] -- [`GameSession`], which owns one save slot's state and
//!   exposes every player operation.
//!
//! [`GameConfig`]: config::GameConfig
//! [`EventBus`]: events::EventBus
//! [`EventObserver`]: events::EventObserver
//! [`ProductionScheduler`]: production::ProductionScheduler
//! [`GameSession`]: session::GameSession

pub mod clock;
pub mod config;
pub mod discovery;
pub mod events;
pub mod production;
pub mod session;

pub use clock::{Accrual, AccrualClock, Clock, ManualClock, PollGate, SystemClock, collect_elapsed};
pub use config::{ConfigError, GameConfig};
pub use discovery::{DiscoveryRegistry, IconRegistry};
pub use events::{EventBus, EventObserver, SubscriptionId};
pub use production::{
    CancelledJob, CompletedJob, MAX_PRODUCTION_SLOTS, ProductionJob, ProductionScheduler,
    SlotState,
};
pub use session::{CombineOutcome, GameSession, TickSummary};
