//! Headless host for the Iconforge crafting economy.
//!
//! Loads configuration, opens the save directory, activates the configured
//! save slot, and drives the session's `tick(now)` loop for a fixed run
//! time before flushing a checkpoint and exiting.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `iconforge.yaml`
//! 3. Load the recipe catalog (YAML file or built-in reference)
//! 4. Open the save directory and the save-slot directory
//! 5. Create and activate the configured save slot
//! 6. Load the slot's session
//! 7. Run the tick loop, checkpointing periodically
//! 8. Checkpoint, record play time, and exit

mod autopilot;
mod checkpoint;
mod error;
mod event_log;

use std::path::Path;
use std::time::Duration;

use chrono::TimeDelta;
use iconforge_core::{Clock, GameConfig, GameSession, SystemClock};
use iconforge_recipes::{RecipeCatalog, reference_catalog};
use iconforge_store::{
    FileStore, MAX_SAVE_SLOTS, PersistenceGateway, SaveSlotDirectory, SaveSlotIndex, StorageScope,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::autopilot::Autopilot;
use crate::checkpoint::PeriodicCheckpoint;
use crate::error::EngineError;
use crate::event_log::EventLog;

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the final checkpoint
/// fails.
fn main() -> Result<(), EngineError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("iconforge-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        slot_count = config.production.slot_count,
        poll_interval_ms = config.production.poll_interval_ms,
        tick_interval_ms = config.engine.tick_interval_ms,
        run_seconds = config.engine.run_seconds,
        save_dir = %config.storage.save_dir.display(),
        "Configuration loaded"
    );

    // 3. Load the recipe catalog.
    let catalog = load_catalog(&config)?;
    info!(
        combinations = catalog.combinations().len(),
        productions = catalog.productions().len(),
        "Recipe catalog loaded"
    );

    // 4. Open storage.
    let mut gateway = PersistenceGateway::new(FileStore::open(&config.storage.save_dir)?);
    let mut directory = SaveSlotDirectory::load(&gateway)?;

    // 5. Activate the configured save slot.
    let clock = SystemClock;
    let started = clock.now();
    let index =
        SaveSlotIndex::new(config.engine.save_slot).ok_or(EngineError::InvalidSaveSlot {
            index: config.engine.save_slot,
            max: MAX_SAVE_SLOTS,
        })?;
    if directory.get(index).is_none() {
        directory.create(index, config.engine.slot_name.clone(), started.timestamp())?;
    }
    directory.activate(index, started.timestamp())?;
    directory.save(&mut gateway)?;

    // 6. Load the session.
    let mut session = GameSession::load(
        &gateway,
        catalog,
        &config,
        StorageScope::Slot(index),
        started,
    )?;
    session.subscribe(Box::new(EventLog::new()));

    // 7. Run.
    let mut autopilot = config
        .engine
        .autopilot
        .then(|| Autopilot::new(config.engine.reward_every_polls));
    let mut rng = rand::rng();
    let run_for = i64::try_from(config.engine.run_seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);
    let tick_interval = Duration::from_millis(config.engine.tick_interval_ms);
    let checkpoint_every = i64::try_from(config.engine.checkpoint_interval_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);
    let mut periodic = PeriodicCheckpoint::new(checkpoint_every, started);

    info!(slot = %index, "Entering tick loop");
    let mut ticks: u64 = 0;
    let now = loop {
        let now = clock.now();
        let summary = session.tick(now);
        ticks = ticks.saturating_add(1);
        if let Some(pilot) = autopilot.as_mut().filter(|_| summary.polled) {
            pilot.step(&mut session, &mut rng, now);
        }
        if summary.polled {
            periodic.flush_if_due(&mut session, &mut gateway, now)?;
        }
        if now.signed_duration_since(started) >= run_for {
            break now;
        }
        std::thread::sleep(tick_interval);
    };

    // 8. Flush.
    session.checkpoint(&mut gateway, now)?;
    let played = now
        .signed_duration_since(started)
        .to_std()
        .map_or(0.0, |d| d.as_secs_f64());
    directory.record_play_time(index, played, session.unlocked_icons_count(), now.timestamp())?;
    directory.save(&mut gateway)?;

    info!(
        ticks,
        played_secs = played,
        coins = session.currency().balance(),
        resources = session.ledger().len(),
        running_jobs = session.scheduler().jobs().count(),
        unlocked_icons = session.unlocked_icons_count(),
        "iconforge-engine shutdown complete"
    );
    Ok(())
}

/// Load configuration from `iconforge.yaml` in the working directory, or
/// defaults if it is absent.
fn load_config() -> Result<GameConfig, EngineError> {
    let config_path = Path::new("iconforge.yaml");
    if config_path.exists() {
        let config = GameConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        let mut config = GameConfig::default();
        config.storage.apply_env_overrides();
        Ok(config)
    }
}

/// Load the configured catalog file, or the built-in reference catalog.
fn load_catalog(config: &GameConfig) -> Result<RecipeCatalog, EngineError> {
    match &config.catalog.path {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .map_err(|source| EngineError::CatalogIo { source })?;
            Ok(RecipeCatalog::from_yaml(&yaml)?)
        }
        None => Ok(reference_catalog()?),
    }
}
