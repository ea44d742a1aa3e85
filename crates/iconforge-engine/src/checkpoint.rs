//! Periodic checkpoints during a run.
//!
//! The final checkpoint only happens when the run ends. A
//! [`PeriodicCheckpoint`] also flushes the session every interval, so an
//! interrupted run loses at most one interval of progress.

use chrono::{DateTime, TimeDelta, Utc};
use iconforge_core::{GameSession, PollGate};
use iconforge_store::{KeyValueStore, PersistenceGateway, StoreError};
use tracing::debug;

/// Writes a session checkpoint at most once per interval.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicCheckpoint {
    gate: Option<PollGate>,
}

impl PeriodicCheckpoint {
    /// Create a schedule whose first checkpoint is due one `interval` after
    /// `started`. A non-positive interval disables it.
    pub fn new(interval: TimeDelta, started: DateTime<Utc>) -> Self {
        if interval <= TimeDelta::zero() {
            return Self { gate: None };
        }
        let mut gate = PollGate::new(interval);
        gate.ready(started);
        Self { gate: Some(gate) }
    }

    /// Checkpoint `session` if the interval has elapsed at `now`. Returns
    /// whether a checkpoint was written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the checkpoint cannot be written.
    pub fn flush_if_due<S: KeyValueStore>(
        &mut self,
        session: &mut GameSession,
        gateway: &mut PersistenceGateway<S>,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let Some(gate) = self.gate.as_mut() else {
            return Ok(false);
        };
        if !gate.ready(now) {
            return Ok(false);
        }
        session.checkpoint(gateway, now)?;
        debug!(at = %now, "Periodic checkpoint written");
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use iconforge_core::GameConfig;
    use iconforge_recipes::reference_catalog;
    use iconforge_store::{MemoryStore, SaveSlotIndex, StorageKey, StorageScope};

    use super::*;

    fn session(scope: StorageScope, now: DateTime<Utc>) -> GameSession {
        GameSession::new(reference_catalog().unwrap(), &GameConfig::default(), scope, now)
    }

    #[test]
    fn flushes_once_per_interval() {
        let started = DateTime::<Utc>::UNIX_EPOCH;
        let scope = StorageScope::Slot(SaveSlotIndex::new(1).unwrap());
        let mut session = session(scope, started);
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        let mut checkpoint = PeriodicCheckpoint::new(TimeDelta::seconds(30), started);

        let early = started + TimeDelta::seconds(29);
        assert!(!checkpoint.flush_if_due(&mut session, &mut gateway, early).unwrap());
        assert!(gateway.store().is_empty());

        let due = started + TimeDelta::seconds(30);
        assert!(checkpoint.flush_if_due(&mut session, &mut gateway, due).unwrap());
        let inventory_key = StorageKey::PlayerInventory.key(scope);
        assert!(gateway.store().keys().any(|k| k == inventory_key));

        assert!(!checkpoint.flush_if_due(&mut session, &mut gateway, due).unwrap());
    }

    #[test]
    fn interrupted_run_keeps_flushed_progress() {
        let started = DateTime::<Utc>::UNIX_EPOCH;
        let scope = StorageScope::Slot(SaveSlotIndex::new(0).unwrap());
        let mut live = session(scope, started);
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        let mut checkpoint = PeriodicCheckpoint::new(TimeDelta::seconds(10), started);

        assert!(live.add_resource("stone", 4).is_ok());
        let due = started + TimeDelta::seconds(10);
        assert!(checkpoint.flush_if_due(&mut live, &mut gateway, due).unwrap());
        drop(live);

        let reloaded = GameSession::load(
            &gateway,
            reference_catalog().unwrap(),
            &GameConfig::default(),
            scope,
            due + TimeDelta::seconds(5),
        )
        .unwrap();
        assert_eq!(reloaded.ledger().quantity("stone"), 4);
    }

    #[test]
    fn zero_interval_never_flushes() {
        let started = DateTime::<Utc>::UNIX_EPOCH;
        let mut session = session(StorageScope::Legacy, started);
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        let mut checkpoint = PeriodicCheckpoint::new(TimeDelta::zero(), started);
        let later = started + TimeDelta::hours(1);
        assert!(!checkpoint.flush_if_due(&mut session, &mut gateway, later).unwrap());
        assert!(gateway.store().is_empty());
    }
}
