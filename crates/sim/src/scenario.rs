//! Scripted pickup run: one agent at the origin, catalog items laid out on a
//! ring around it, pickups requested one after another.

use std::io::Write;

use anyhow::{Context, Result};
use glam::Vec3;
use pickup_core::{
    AgentId, ItemCurves, ItemId, ItemSpec, ItemState, PickupConfig, ReceivingAgent, Rotator,
    Viewpoint,
};
use pickup_runtime::{FrameEvent, RecordingHost, World, WorldEvent};

/// Distance from the agent at which items are placed.
const RING_RADIUS: f32 = 400.0;
const EYE_HEIGHT: f32 = 90.0;

pub struct ScenarioOptions {
    pub frames: u32,
    pub dt: f32,
    pub stagger: u32,
    pub turn_rate: f32,
    pub json: bool,
}

pub struct Scenario {
    world: World<RecordingHost>,
    agent: AgentId,
    pending: Vec<ItemId>,
}

impl Scenario {
    pub fn new(config: PickupConfig, curves: ItemCurves, catalog: &[ItemSpec]) -> Result<Self> {
        let mut world = World::new(config, RecordingHost::new()).context("invalid config")?;
        let agent = world.spawn_agent(Viewpoint::new(
            Vec3::new(0.0, 0.0, EYE_HEIGHT),
            Rotator::ZERO,
        ))?;

        let step = std::f32::consts::TAU / catalog.len().max(1) as f32;
        let pending = catalog
            .iter()
            .enumerate()
            .map(|(n, spec)| {
                let angle = step * n as f32;
                let location = Vec3::new(angle.cos(), angle.sin(), 0.0) * RING_RADIUS;
                world.spawn_item(spec, curves.clone(), location, angle.to_degrees())
            })
            .collect::<Vec<_>>();

        // Requests are popped from the back.
        let pending = pending.into_iter().rev().collect();
        Ok(Self {
            world,
            agent,
            pending,
        })
    }

    pub fn run(&mut self, options: &ScenarioOptions, out: &mut impl Write) -> Result<()> {
        self.flush(options.json, out)?;

        let mut yaw = 0.0_f32;
        for frame in 0..options.frames {
            if frame % options.stagger.max(1) == 0 {
                if let Some(item) = self.pending.pop() {
                    if let Err(err) = self.world.request_pickup(item, self.agent, false) {
                        tracing::warn!(%item, error = %err, "pickup refused");
                    }
                }
            }

            if options.turn_rate != 0.0
                && self.world.count_in_state(ItemState::TransferringToOwner) > 0
            {
                yaw += options.turn_rate * options.dt;
                let location = self
                    .world
                    .agent(self.agent)
                    .map(|character| character.viewpoint().location)
                    .unwrap_or(Vec3::new(0.0, 0.0, EYE_HEIGHT));
                self.world.set_agent_viewpoint(
                    self.agent,
                    Viewpoint::new(location, Rotator::from_yaw(yaw)),
                )?;
            }

            self.world.tick(options.dt);
            self.flush(options.json, out)?;
        }

        self.summary(out)
    }

    fn flush(&mut self, json: bool, out: &mut impl Write) -> Result<()> {
        for stamped in self.world.drain_events() {
            if json {
                writeln!(out, "{}", stamped.to_json_line()?)?;
            } else {
                writeln!(out, "{}", describe(&stamped))?;
            }
        }
        Ok(())
    }

    fn summary(&self, out: &mut impl Write) -> Result<()> {
        let character = self
            .world
            .agent(self.agent)
            .context("agent disappeared")?;
        let name = |id: ItemId| {
            self.world
                .item(id)
                .map_or_else(|| id.to_string(), |item| item.name().to_string())
        };

        writeln!(out, "--- after {} frames ---", self.world.frame())?;
        writeln!(
            out,
            "equipped: {}",
            character.equipped().map_or_else(|| "nothing".to_string(), name)
        )?;
        let stowed: Vec<_> = character.inventory().iter().map(|&id| name(id)).collect();
        writeln!(out, "inventory: [{}]", stowed.join(", "))?;
        writeln!(out, "ammo: {}", character.ammo())?;
        for state in [
            ItemState::Pickup,
            ItemState::TransferringToOwner,
            ItemState::Equipped,
            ItemState::Falling,
            ItemState::Consumed,
        ] {
            writeln!(out, "{state}: {}", self.world.count_in_state(state))?;
        }
        Ok(())
    }
}

fn describe(stamped: &FrameEvent) -> String {
    let body = match &stamped.event {
        WorldEvent::ItemSpawned {
            item,
            name,
            kind,
            rarity,
            location,
        } => format!("{item} spawned: {name} ({kind:?}, {rarity}) at {location}"),
        WorldEvent::AgentSpawned { agent } => format!("{agent} spawned"),
        WorldEvent::TransferStarted {
            item,
            agent,
            slot,
            sound_played,
        } => format!(
            "{item} flying to {agent} slot {slot}{}",
            if *sound_played { " (sound)" } else { "" }
        ),
        WorldEvent::TransferFinished {
            item,
            agent,
            placement,
            ..
        } => format!("{item} reached {agent}: {placement:?}"),
        WorldEvent::TransferAborted { item, agent, .. } => {
            format!("{item} lost {agent}, falling")
        }
        WorldEvent::ItemSettled { item } => format!("{item} settled"),
        WorldEvent::ItemStateChanged { item, from, to } => format!("{item} {from} -> {to}"),
        WorldEvent::AgentDespawned {
            agent,
            dropped,
            removed,
        } => format!(
            "{agent} despawned, {} dropped, {} removed",
            dropped.len(),
            removed.len()
        ),
    };
    format!("[{:>4}] {body}", stamped.frame)
}
