//! Configuration loading and typed config structures.
//!
//! The host reads an optional `iconforge.yaml`. Every section and field is
//! optional; anything omitted takes the default listed on its field.
//! `ICONFORGE_SAVE_DIR` overrides `storage.save_dir`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::production::MAX_PRODUCTION_SLOTS;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Production slot settings.
    #[serde(default)]
    pub production: ProductionConfig,

    /// Passive coin income.
    #[serde(default)]
    pub passive_income: PassiveIncomeConfig,

    /// What a new save starts with.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Mini-game reward table.
    #[serde(default)]
    pub rewards: RewardsConfig,

    /// Recipe catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Where saves are written.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Headless host loop.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.storage.apply_env_overrides();
        Ok(config)
    }
}

/// Production slot settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionConfig {
    /// Usable slots, capped at 5.
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,

    /// Milliseconds between completion checks.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Largest batch multiplier accepted by `StartProduction`.
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: u32,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            slot_count: default_slot_count(),
            poll_interval_ms: default_poll_interval_ms(),
            max_multiplier: default_max_multiplier(),
        }
    }
}

/// Passive coin income settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PassiveIncomeConfig {
    /// Coins granted per whole interval.
    #[serde(default = "default_coins_per_interval")]
    pub coins_per_interval: u64,

    /// Interval length in seconds.
    #[serde(default = "default_income_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PassiveIncomeConfig {
    fn default() -> Self {
        Self {
            coins_per_interval: default_coins_per_interval(),
            interval_secs: default_income_interval_secs(),
        }
    }
}

/// Starting state of a new save.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscoveryConfig {
    /// Recipes discovered in addition to those flagged in the catalog.
    #[serde(default)]
    pub bootstrap_recipes: Vec<String>,

    /// Icons visible before they are first owned.
    #[serde(default = "default_bootstrap_icons")]
    pub bootstrap_icons: Vec<String>,

    /// Resources granted to a new save.
    #[serde(default = "default_starting_inventory")]
    pub starting_inventory: BTreeMap<String, u64>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            bootstrap_recipes: Vec::new(),
            bootstrap_icons: default_bootstrap_icons(),
            starting_inventory: default_starting_inventory(),
        }
    }
}

/// Reward table for `GrantRandomReward`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewardsConfig {
    /// Resources a reward can be drawn from.
    #[serde(default = "default_reward_pool")]
    pub pool: Vec<String>,

    /// Smallest quantity granted.
    #[serde(default = "default_reward_min")]
    pub min_quantity: u64,

    /// Largest quantity granted.
    #[serde(default = "default_reward_max")]
    pub max_quantity: u64,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            pool: default_reward_pool(),
            min_quantity: default_reward_min(),
            max_quantity: default_reward_max(),
        }
    }
}

/// Recipe catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// YAML catalog to load instead of the built-in reference catalog.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Save storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
}

impl StorageConfig {
    /// Apply environment variable overrides:
    /// - `ICONFORGE_SAVE_DIR` overrides `save_dir`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ICONFORGE_SAVE_DIR") {
            self.save_dir = PathBuf::from(val);
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
        }
    }
}

/// Headless host loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seconds to run before checkpointing and exiting.
    #[serde(default = "default_run_seconds")]
    pub run_seconds: u64,

    /// Save slot to play, `0..3`.
    #[serde(default)]
    pub save_slot: u8,

    /// Name given to the save slot if it has to be created.
    #[serde(default = "default_slot_name")]
    pub slot_name: String,

    /// Whether the host plays by itself: fills idle production slots and
    /// wins a mini-game reward every `reward_every_polls` polls.
    #[serde(default = "default_true")]
    pub autopilot: bool,

    /// Polls between simulated mini-game rewards. Zero disables them.
    #[serde(default = "default_reward_every_polls")]
    pub reward_every_polls: u32,

    /// Seconds between checkpoints written during the run. Zero writes
    /// only the final checkpoint.
    #[serde(default = "default_checkpoint_interval_secs")]
    pub checkpoint_interval_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            run_seconds: default_run_seconds(),
            save_slot: 0,
            slot_name: default_slot_name(),
            autopilot: true,
            reward_every_polls: default_reward_every_polls(),
            checkpoint_interval_secs: default_checkpoint_interval_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_slot_count() -> usize {
    MAX_PRODUCTION_SLOTS
}

const fn default_poll_interval_ms() -> u64 {
    500
}

const fn default_max_multiplier() -> u32 {
    10
}

const fn default_coins_per_interval() -> u64 {
    1
}

const fn default_income_interval_secs() -> u64 {
    3_600
}

fn default_bootstrap_icons() -> Vec<String> {
    vec!["seed_wheat".to_owned(), "wood".to_owned()]
}

fn default_starting_inventory() -> BTreeMap<String, u64> {
    let mut inventory = BTreeMap::new();
    inventory.insert("seed_wheat".to_owned(), 3);
    inventory.insert("wood".to_owned(), 2);
    inventory
}

fn default_reward_pool() -> Vec<String> {
    ["seed_wheat", "wood", "clay", "sand", "water", "stone"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

const fn default_reward_min() -> u64 {
    1
}

const fn default_reward_max() -> u64 {
    3
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_run_seconds() -> u64 {
    60
}

fn default_slot_name() -> String {
    "Slot 1".to_owned()
}

const fn default_true() -> bool {
    true
}

const fn default_reward_every_polls() -> u32 {
    20
}

const fn default_checkpoint_interval_secs() -> u64 {
    30
}
