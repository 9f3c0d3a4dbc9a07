//! Randomized interleavings of pickups, frames and despawns. Every slot
//! reservation must be released exactly once.

use std::collections::HashMap;

use glam::Vec3;
use pickup_content::builtin;
use pickup_core::{
    AgentId, ItemId, ItemKind, ItemSpec, ItemState, PickupConfig, Rotator, Viewpoint,
};
use pickup_runtime::{RecordingHost, World, WorldEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const AGENTS: usize = 3;
const ITEMS: usize = 40;

fn spawn_agent(world: &mut World<RecordingHost>, rng: &mut StdRng) -> AgentId {
    let location = Vec3::new(
        rng.random_range(-500.0..500.0),
        rng.random_range(-500.0..500.0),
        90.0,
    );
    let yaw = rng.random_range(-180.0..180.0);
    world
        .spawn_agent(Viewpoint::new(location, Rotator::from_yaw(yaw)))
        .unwrap()
}

fn spawn_items(world: &mut World<RecordingHost>, rng: &mut StdRng) -> Vec<ItemId> {
    (0..ITEMS)
        .map(|n| {
            let kind = if rng.random_bool(0.5) {
                ItemKind::Weapon
            } else {
                ItemKind::Ammo
            };
            let spec = ItemSpec::new(format!("item {n}"), kind).with_count(5);
            let location = Vec3::new(
                rng.random_range(-800.0..800.0),
                rng.random_range(-800.0..800.0),
                0.0,
            );
            world.spawn_item(
                &spec,
                builtin::default_curves(),
                location,
                rng.random_range(0.0..360.0),
            )
        })
        .collect()
}

/// Slot counters of every live agent must equal the number of its in-flight
/// items, slot by slot.
fn assert_paired(world: &World<RecordingHost>) {
    let mut expected: HashMap<(AgentId, usize), u32> = HashMap::new();
    for (_, item) in world.items() {
        if let Some(transfer) = item.transfer() {
            assert_eq!(item.state(), ItemState::TransferringToOwner);
            *expected.entry((transfer.agent(), transfer.slot().0)).or_default() += 1;
        }
    }
    for (agent, character) in world.agents() {
        for (slot, interp) in character.slots().iter().enumerate() {
            let want = expected.get(&(agent, slot)).copied().unwrap_or(0);
            assert_eq!(interp.occupancy, want, "{agent} slot {slot}");
        }
    }
}

fn run_interleaving(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = World::new(PickupConfig::default(), RecordingHost::new()).unwrap();
    let mut agents: Vec<_> = (0..AGENTS).map(|_| spawn_agent(&mut world, &mut rng)).collect();
    let items = spawn_items(&mut world, &mut rng);

    for _ in 0..600 {
        match rng.random_range(0..10) {
            0..=4 => {
                let item = items[rng.random_range(0..items.len())];
                let agent = agents[rng.random_range(0..agents.len())];
                let resting = world
                    .item(item)
                    .is_some_and(|item| item.state() == ItemState::Pickup);
                let result = world.request_pickup(item, agent, rng.random_bool(0.2));
                assert_eq!(result.is_ok(), resting);
            }
            5 if rng.random_bool(0.05) => {
                let index = rng.random_range(0..agents.len());
                world.despawn_agent(agents[index]).unwrap();
                agents[index] = spawn_agent(&mut world, &mut rng);
            }
            _ => world.tick(rng.random_range(0.005..0.05)),
        }
        assert_paired(&world);
    }

    // Let every transfer in flight land.
    for _ in 0..100 {
        world.tick(1.0 / 60.0);
    }
    assert_paired(&world);
    assert_eq!(world.count_in_state(ItemState::TransferringToOwner), 0);
    for (_, character) in world.agents() {
        assert!(character.slots().iter().all(|slot| slot.occupancy == 0));
    }

    let started = count(&world, |event| matches!(event, WorldEvent::TransferStarted { .. }));
    let ended = count(&world, |event| {
        matches!(
            event,
            WorldEvent::TransferFinished { .. } | WorldEvent::TransferAborted { .. }
        )
    });
    assert_eq!(started, ended, "seed {seed}");
}

fn count(world: &World<RecordingHost>, pred: impl Fn(&WorldEvent) -> bool) -> usize {
    world
        .events()
        .iter()
        .filter(|stamped| pred(&stamped.event))
        .count()
}

#[test]
fn interleavings_keep_slot_counters_paired() {
    for seed in 0..16 {
        run_interleaving(seed);
    }
}

#[test]
fn simultaneous_pickups_by_one_agent_release_every_slot() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut world = World::new(PickupConfig::default(), RecordingHost::new()).unwrap();
    let agent = spawn_agent(&mut world, &mut rng);
    let items = spawn_items(&mut world, &mut rng);

    for &item in &items {
        world.request_pickup(item, agent, false).unwrap();
    }
    let peak: u32 = world
        .agent(agent)
        .unwrap()
        .slots()
        .iter()
        .map(|slot| slot.occupancy)
        .sum();
    assert_eq!(peak as usize, ITEMS);

    for _ in 0..60 {
        world.tick(1.0 / 60.0);
        assert_paired(&world);
    }
    assert_eq!(world.count_in_state(ItemState::TransferringToOwner), 0);
    assert!(
        world
            .agent(agent)
            .unwrap()
            .slots()
            .iter()
            .all(|slot| slot.occupancy == 0)
    );
}
