//! Stand-in player for unattended runs.
//!
//! Each poll, the autopilot starts one batch of the first affordable
//! discovered production recipe in every empty slot, then turns any owned
//! resources it can into combination results. Every `reward_every` polls it
//! plays a mini-game and claims a random reward.

use chrono::{DateTime, Utc};
use iconforge_core::{CombineOutcome, GameSession, SlotState};
use iconforge_types::{RecipeId, ResourceId};
use rand::Rng;
use tracing::debug;

/// Scripted player that keeps production busy.
#[derive(Debug, Clone)]
pub struct Autopilot {
    reward_every: u32,
    polls: u32,
}

impl Autopilot {
    /// Create an autopilot claiming a reward every `reward_every` polls
    /// (never if zero).
    pub const fn new(reward_every: u32) -> Self {
        Self {
            reward_every,
            polls: 0,
        }
    }

    /// Take one turn at `now`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        session: &mut GameSession,
        rng: &mut R,
        now: DateTime<Utc>,
    ) {
        self.polls = self.polls.wrapping_add(1);
        if self.polls.checked_rem(self.reward_every) == Some(0) {
            match session.grant_random_reward(rng) {
                Ok(Some(stack)) => debug!(resource = %stack.resource_id, quantity = stack.quantity, "Mini-game won"),
                Ok(None) => {}
                Err(rejection) => debug!(%rejection, "Mini-game reward refused"),
            }
        }
        fill_idle_slots(session, now);
        combine_known(session);
    }
}

fn fill_idle_slots(session: &mut GameSession, now: DateTime<Utc>) {
    let candidates: Vec<RecipeId> = session
        .catalog()
        .productions()
        .iter()
        .filter(|recipe| session.is_discovered(recipe.id.as_str()))
        .map(|recipe| recipe.id.clone())
        .collect();
    for slot in 0..session.scheduler().slot_count() {
        if session.slot_state(slot) != Some(&SlotState::Empty) {
            continue;
        }
        for recipe in &candidates {
            let affordable = session
                .catalog()
                .production(recipe.as_str())
                .and_then(|r| r.cost(1))
                .is_some_and(|cost| session.ledger().check_all(&cost).is_ok());
            if affordable && session.start_production(slot, recipe.as_str(), 1, now).is_ok() {
                break;
            }
        }
    }
}

/// Try every combination whose ingredients are all owned, once each.
fn combine_known(session: &mut GameSession) {
    let affordable: Vec<Vec<ResourceId>> = session
        .catalog()
        .combinations()
        .iter()
        .filter(|recipe| session.ledger().check_all(&recipe.cost()).is_ok())
        .map(|recipe| recipe.ingredients.clone())
        .collect();
    for ingredients in affordable {
        if let Ok(CombineOutcome::Crafted { result, .. }) = session.combine(&ingredients) {
            debug!(result = %result.resource_id, "Autopilot combined");
        }
    }
}
