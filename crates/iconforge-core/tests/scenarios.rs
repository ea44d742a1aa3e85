//! End-to-end scenarios across ledger, recipes, scheduler, clocks, and
//! persistence.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::float_cmp)]

use chrono::{DateTime, TimeDelta, Utc};

use iconforge_core::{
    Clock, CombineOutcome, GameConfig, GameSession, ManualClock, SlotState, collect_elapsed,
};
use iconforge_recipes::{RecipeResolver, reference_catalog};
use iconforge_store::{
    KeyValueStore, MemoryStore, PersistenceGateway, SaveSlotDirectory, SaveSlotIndex, StorageKey,
    StorageScope,
};
use iconforge_types::{Rejection, ResourceId, ResourceStack};

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

fn bare_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.discovery.starting_inventory.clear();
    config.discovery.bootstrap_icons.clear();
    config
}

fn slot(index: u8) -> StorageScope {
    StorageScope::Slot(SaveSlotIndex::new(index).unwrap())
}

fn new_session(now: DateTime<Utc>) -> GameSession {
    GameSession::new(reference_catalog().unwrap(), &bare_config(), slot(0), now)
}

#[test]
fn start_production_consumes_multiplied_cost() {
    let mut session = new_session(epoch());
    assert!(session.add_resource("seed_wheat", 3).is_ok());

    let job = session
        .start_production(0, "wheat_production", 2, epoch())
        .unwrap();

    assert_eq!(session.ledger().quantity("seed_wheat"), 1);
    assert_eq!(job.total_duration_secs(), 30.0);
    assert_eq!(job.multiplier(), 2);
}

#[test]
fn reference_catalog_resolves_flour() {
    let catalog = reference_catalog().unwrap();
    let resolver = RecipeResolver::new(&catalog);
    let found = resolver
        .find_match(&[ResourceId::new("grain"), ResourceId::new("hardware")])
        .unwrap();
    assert_eq!(found.id.as_str(), "combo_flour");
    assert_eq!(found.result.as_str(), "nutrition");
}

#[test]
fn accrual_keeps_half_hour_remainder() {
    let now = epoch().timestamp();
    let last = now - 12_600;
    let accrual = collect_elapsed(now, last, 1, 3_600);
    assert_eq!(accrual.units, 3);
    assert_eq!(accrual.new_timestamp, last + 10_800);
    assert_eq!(now - accrual.new_timestamp, 1_800);

    // Same through the session: a half hour later the fourth coin is due.
    let mut session = new_session(epoch() - TimeDelta::seconds(12_600));
    assert_eq!(session.collect_passive_income(epoch()), 3);
    assert_eq!(
        session.collect_passive_income(epoch() + TimeDelta::seconds(1_799)),
        0
    );
    assert_eq!(
        session.collect_passive_income(epoch() + TimeDelta::seconds(1_800)),
        1
    );
    assert_eq!(session.currency().balance(), 4);
}

#[test]
fn cancel_refunds_exact_consumption() {
    let mut clock = ManualClock::new(epoch());
    let mut session = new_session(clock.now());
    assert!(session.add_resource("cotton", 5).is_ok());
    assert!(session.discover("cloth_production").unwrap());

    assert!(session
        .start_production(1, "cloth_production", 2, clock.now())
        .is_ok());
    assert_eq!(session.ledger().quantity("cotton"), 1);

    clock.advance(TimeDelta::seconds(40));
    let _ = session.tick(clock.now());
    let cancelled = session.cancel_production(1).unwrap();

    assert_eq!(cancelled.refunded, vec![ResourceStack::new("cotton", 4)]);
    assert_eq!(session.ledger().quantity("cotton"), 5);
    assert_eq!(session.slot_state(1), Some(&SlotState::Empty));
}

#[test]
fn second_start_on_same_slot_is_rejected() {
    let mut session = new_session(epoch());
    assert!(session.add_resource("wood", 4).is_ok());

    let first = session
        .start_production(3, "plank_production", 1, epoch())
        .unwrap();
    let second = session.start_production(3, "plank_production", 1, epoch() + TimeDelta::seconds(2));

    assert_eq!(second, Err(Rejection::SlotOccupied { slot: 3 }));
    assert_eq!(session.get_active_job(3), Some(&first));
    assert_eq!(session.ledger().quantity("wood"), 3);
}

#[test]
fn remove_succeeds_iff_has() {
    let mut session = new_session(epoch());
    assert!(session.add_resource("clay", 3).is_ok());
    for quantity in 1..=5 {
        let had = session.has_resource("clay", quantity);
        let before = session.ledger().quantity("clay");
        let removed = session.remove_resource("clay", quantity);
        assert_eq!(removed, had);
        if removed {
            assert_eq!(session.ledger().quantity("clay"), before - quantity);
            assert!(session.add_resource("clay", quantity).is_ok());
        }
    }
}

#[test]
fn checkpoint_and_reload_preserve_remaining_time() {
    let mut gateway = PersistenceGateway::new(MemoryStore::new());
    let catalog = reference_catalog().unwrap();
    let mut session = GameSession::new(catalog.clone(), &bare_config(), slot(1), epoch());
    assert!(session.add_resource("iron_ore", 1).is_ok());
    assert!(session.add_resource("coal", 1).is_ok());
    assert!(session.discover("iron_production").unwrap());
    assert!(session.start_production(2, "iron_production", 1, epoch()).is_ok());
    assert!(session.deposit_coins(7) == 7);

    let save_at = epoch() + TimeDelta::milliseconds(9_876);
    let remaining = session.get_active_job(2).unwrap().remaining_secs(save_at);
    session.checkpoint(&mut gateway, save_at).unwrap();

    // Reload much later: production paused while closed.
    let load_at = save_at + TimeDelta::hours(5);
    let reloaded =
        GameSession::load(&gateway, catalog, &bare_config(), slot(1), load_at).unwrap();
    let job = reloaded.get_active_job(2).unwrap();
    assert_eq!(job.remaining_secs(load_at), remaining);
    assert_eq!(
        job.saved_elapsed_secs(),
        session.get_active_job(2).unwrap().saved_elapsed_secs()
    );
    assert!(reloaded.is_discovered("iron_production"));
    assert!(reloaded.icons().is_unlocked("coal"));
    assert_eq!(reloaded.currency().balance(), 7);
    assert_eq!(reloaded.snapshot(), session.snapshot());
}

#[test]
fn save_slots_are_namespaced() {
    let mut gateway = PersistenceGateway::new(MemoryStore::new());
    let catalog = reference_catalog().unwrap();

    let mut first = GameSession::new(catalog.clone(), &bare_config(), slot(0), epoch());
    assert!(first.add_resource("wood", 9).is_ok());
    first.checkpoint(&mut gateway, epoch()).unwrap();

    let mut legacy = GameSession::new(catalog.clone(), &bare_config(), StorageScope::Legacy, epoch());
    assert!(legacy.add_resource("sand", 1).is_ok());
    legacy.checkpoint(&mut gateway, epoch()).unwrap();

    let keys: Vec<&str> = gateway.store().keys().collect();
    assert!(keys.contains(&"PlayerInventory_Slot0"));
    assert!(keys.contains(&"ActiveProductions_Slot0"));
    assert!(keys.contains(&"PlayerInventory"));
    assert!(!keys.iter().any(|k| k.ends_with("_Slot1")));

    let second = GameSession::load(&gateway, catalog, &bare_config(), slot(1), epoch()).unwrap();
    assert!(second.ledger().is_empty());
}

#[test]
fn corrupt_documents_fall_back_to_defaults() {
    let mut gateway = PersistenceGateway::new(MemoryStore::new());
    let catalog = reference_catalog().unwrap();
    let mut session = GameSession::new(catalog.clone(), &bare_config(), slot(2), epoch());
    assert!(session.add_resource("stone", 2).is_ok());
    assert!(session.deposit_coins(3) == 3);
    session.checkpoint(&mut gateway, epoch()).unwrap();

    gateway
        .store_mut()
        .set("ActiveProductions_Slot2", "[[[ not json")
        .unwrap();
    gateway
        .store_mut()
        .set("CurrencyData_Slot2", "{\"coins\": \"lots\"}")
        .unwrap();

    let later = epoch() + TimeDelta::minutes(10);
    let loaded = GameSession::load(&gateway, catalog, &bare_config(), slot(2), later).unwrap();
    assert_eq!(loaded.ledger().quantity("stone"), 2);
    assert_eq!(loaded.scheduler().jobs().count(), 0);
    assert_eq!(loaded.currency().balance(), 0);
    assert_eq!(loaded.currency().last_accrual_timestamp(), later.timestamp());
}

#[test]
fn combine_then_produce_flow() {
    let mut session = new_session(epoch());
    assert!(session.add_resource("wheat", 2).is_ok());
    assert!(session.add_resource("hardware", 1).is_ok());

    let grain = session
        .combine(&[ResourceId::new("wheat"), ResourceId::new("wheat")])
        .unwrap();
    assert!(matches!(grain, CombineOutcome::Crafted { .. }));
    let flour = session
        .combine(&[ResourceId::new("hardware"), ResourceId::new("grain")])
        .unwrap();
    assert!(matches!(
        flour,
        CombineOutcome::Crafted { ref result, .. } if result.resource_id.as_str() == "nutrition"
    ));
    assert!(session.is_discovered("combo_grain"));
    assert!(session.is_discovered("combo_flour"));
    assert_eq!(
        session.snapshot(),
        vec![ResourceStack::new("nutrition", 1)]
    );
}

#[test]
fn slot_directory_tracks_active_session() {
    let mut gateway = PersistenceGateway::new(MemoryStore::new());
    let mut directory = SaveSlotDirectory::load(&gateway).unwrap();
    let index = directory.first_vacant().unwrap();
    directory.create(index, "Meadow", epoch().timestamp()).unwrap();
    directory.activate(index, epoch().timestamp()).unwrap();
    let scope = directory.active_scope().unwrap();

    let mut session =
        GameSession::new(reference_catalog().unwrap(), &GameConfig::default(), scope, epoch());
    session.checkpoint(&mut gateway, epoch()).unwrap();
    directory
        .record_play_time(index, 120.0, session.unlocked_icons_count(), epoch().timestamp())
        .unwrap();
    directory.save(&mut gateway).unwrap();

    let reloaded = SaveSlotDirectory::load(&gateway).unwrap();
    assert_eq!(reloaded.active(), Some(index));
    assert_eq!(
        reloaded.get(index).map(|m| m.unlocked_icons_count),
        Some(session.unlocked_icons_count())
    );

    assert!(directory.reset(index, &mut gateway).unwrap());
    assert!(gateway
        .store()
        .get(&StorageKey::PlayerInventory.key(scope))
        .unwrap()
        .is_none());
}
