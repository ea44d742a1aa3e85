//! Observer that writes every game event to the log.
//!
//! The headless host has no UI to render changes, so events are logged as
//! JSON at `debug` level, with discoveries and unlocks at `info`.

use iconforge_core::EventObserver;
use iconforge_types::GameEvent;
use tracing::{debug, info};

/// Logs each published event and counts them.
#[derive(Debug, Default)]
pub struct EventLog {
    seen: u64,
}

impl EventLog {
    /// Create a logger with a zero count.
    pub const fn new() -> Self {
        Self { seen: 0 }
    }
}

impl EventObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.seen = self.seen.saturating_add(1);
        match event {
            GameEvent::IconUnlocked { resource_id } => {
                info!(resource = %resource_id, "New icon unlocked");
            }
            GameEvent::RecipeDiscovered { recipe_id } => {
                info!(recipe = %recipe_id, "New recipe discovered");
            }
            _ => match serde_json::to_string(event) {
                Ok(json) => debug!(seq = self.seen, event = %json, "Game event"),
                Err(e) => debug!(seq = self.seen, error = %e, "Unserializable game event"),
            },
        }
    }
}
