//! Single-threaded world that owns items and agents and drives them per frame.
//!
//! Items refer to their receiving agent only by [`AgentId`]; the world resolves
//! the handle every frame, so despawning an agent is visible to its in-flight
//! items on the next tick at the latest.

use glam::Vec3;
use pickup_core::{
    AgentConfig, AgentError, AgentId, Character, Item, ItemCurves, ItemEvent, ItemHost, ItemId,
    ItemKind, ItemSpec, ItemState, PickupConfig, Placement, Pose, ReceivingAgent, Rotator, SlotIndex,
    TransferTicket, TransitionError, Viewpoint,
};

use crate::error::{Result, RuntimeError};
use crate::events::{FrameEvent, WorldEvent};
use crate::registry::Registry;

pub struct World<H: ItemHost> {
    config: PickupConfig,
    host: H,
    items: Registry<ItemId, Item>,
    agents: Registry<AgentId, Character>,
    events: Vec<FrameEvent>,
    frame: u64,
}

impl<H: ItemHost> World<H> {
    pub fn new(config: PickupConfig, host: H) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            host,
            items: Registry::new(),
            agents: Registry::new(),
            events: Vec::new(),
            frame: 0,
        })
    }

    // ===== spawning =====

    pub fn spawn_agent(&mut self, viewpoint: Viewpoint) -> Result<AgentId> {
        let config = self.config.agent.clone();
        self.spawn_agent_with(&config, viewpoint)
    }

    /// Spawns an agent with its own slot layout and inventory size.
    pub fn spawn_agent_with(
        &mut self,
        config: &AgentConfig,
        viewpoint: Viewpoint,
    ) -> Result<AgentId> {
        let character = Character::new(config, viewpoint)?;
        let agent = self.agents.insert_with(|_| character);
        tracing::info!(%agent, "agent spawned");
        self.emit(WorldEvent::AgentSpawned { agent });
        Ok(agent)
    }

    pub fn spawn_item(
        &mut self,
        spec: &ItemSpec,
        curves: ItemCurves,
        location: Vec3,
        yaw: f32,
    ) -> ItemId {
        let pose = Pose::new(location, Rotator::from_yaw(yaw));
        let config = self.config.item;
        let host = &mut self.host;
        let item = self
            .items
            .insert_with(|id| Item::spawn(id, spec.clone(), pose, config, curves, host));
        tracing::info!(%item, name = %spec.name, rarity = %spec.rarity, "item spawned");
        self.emit(WorldEvent::ItemSpawned {
            item,
            name: spec.name.clone(),
            kind: spec.kind,
            rarity: spec.rarity,
            location,
        });
        item
    }

    /// Removes an agent. Items flying toward it fall back into the world, the
    /// equipped weapon is dropped and stowed items leave with the agent.
    pub fn despawn_agent(&mut self, agent: AgentId) -> Result<()> {
        let character = self
            .agents
            .remove(agent)
            .ok_or(RuntimeError::AgentNotFound(agent))?;

        let in_flight: Vec<_> = self
            .items
            .iter()
            .filter(|(_, item)| item.receiving_agent() == Some(agent))
            .map(|(id, _)| id)
            .collect();
        for id in in_flight {
            self.advance_item(id, |item, host| item.abort_transfer(host));
        }

        let mut dropped = Vec::new();
        let mut removed = Vec::new();
        let anchor = character.slot_position(SlotIndex::WEAPON);
        for &id in character.inventory() {
            if Some(id) == character.equipped() {
                match self.drop_item(id, anchor) {
                    Ok(()) => dropped.push(id),
                    Err(err) => tracing::warn!(%agent, item = %id, error = %err, "equipped item not dropped"),
                }
            } else if self.items.remove(id).is_some() {
                removed.push(id);
            }
        }

        tracing::info!(%agent, dropped = dropped.len(), removed = removed.len(), "agent despawned");
        self.emit(WorldEvent::AgentDespawned {
            agent,
            dropped,
            removed,
        });
        Ok(())
    }

    // ===== interaction =====

    /// Starts pulling `item` toward `agent`. Unknown handles and items that are
    /// not resting in the world are errors; nothing changes on failure.
    pub fn request_pickup(
        &mut self,
        item: ItemId,
        agent: AgentId,
        force_sound: bool,
    ) -> Result<TransferTicket> {
        let character = self
            .agents
            .get_mut(agent)
            .ok_or(RuntimeError::AgentNotFound(agent))?;
        let target = self
            .items
            .get_mut(item)
            .ok_or(RuntimeError::ItemNotFound(item))?;

        let from = target.state();
        let ticket = target.begin_transfer(agent, character, force_sound, &mut self.host)?;
        let to = target.state();
        if target.kind() == ItemKind::Weapon {
            character.highlight_next_free_slot();
        }

        tracing::debug!(
            %item,
            %agent,
            slot = %ticket.slot,
            sound = ticket.sound_played,
            "transfer started"
        );
        self.emit(WorldEvent::ItemStateChanged { item, from, to });
        self.emit(WorldEvent::TransferStarted {
            item,
            agent,
            slot: ticket.slot,
            sound_played: ticket.sound_played,
        });
        Ok(ticket)
    }

    /// Drops the agent's equipped weapon in front of it.
    pub fn drop_equipped(&mut self, agent: AgentId) -> Result<ItemId> {
        let character = self
            .agents
            .get(agent)
            .ok_or(RuntimeError::AgentNotFound(agent))?;
        let equipped = character
            .equipped()
            .ok_or(AgentError::NothingEquipped)?;
        let anchor = character.slot_position(SlotIndex::WEAPON);

        self.drop_item(equipped, anchor)?;
        if let Some(character) = self.agents.get_mut(agent) {
            character.remove_equipped()?;
        }
        tracing::info!(%agent, item = %equipped, "weapon dropped");
        Ok(equipped)
    }

    /// Equips the weapon stowed in inventory slot `slot`, stowing the one
    /// currently in hand.
    pub fn equip_inventory_slot(&mut self, agent: AgentId, slot: usize) -> Result<ItemId> {
        let character = self
            .agents
            .get_mut(agent)
            .ok_or(RuntimeError::AgentNotFound(agent))?;
        let (outgoing, incoming) = character.exchange_equipped(slot)?;

        if let Some(outgoing) = outgoing {
            self.transition(outgoing, |item, host| item.consume(host))?;
        }
        self.transition(incoming, |item, host| item.equip_from_inventory(host))?;
        self.play_equip_sound(incoming, agent, false);
        tracing::info!(%agent, slot, item = %incoming, "weapon swapped from inventory");
        Ok(incoming)
    }

    /// Host physics reports a falling item at rest.
    pub fn settle_item(&mut self, item: ItemId) -> Result<()> {
        self.transition(item, |item, host| item.settle(host))?;
        self.emit(WorldEvent::ItemSettled { item });
        Ok(())
    }

    pub fn set_agent_viewpoint(&mut self, agent: AgentId, viewpoint: Viewpoint) -> Result<()> {
        self.agents
            .get_mut(agent)
            .ok_or(RuntimeError::AgentNotFound(agent))?
            .set_viewpoint(viewpoint);
        Ok(())
    }

    /// Host-driven placement, e.g. from the physics step of a falling item.
    pub fn set_item_pose(&mut self, item: ItemId, pose: Pose) -> Result<()> {
        self.items
            .get_mut(item)
            .ok_or(RuntimeError::ItemNotFound(item))?
            .set_pose(pose, &mut self.host);
        Ok(())
    }

    // ===== frame loop =====

    /// Advances every agent and item by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.frame += 1;
        for (_, character) in self.agents.iter_mut() {
            character.tick(dt);
        }

        let mut outcomes = Vec::new();
        for (id, item) in self.items.iter_mut() {
            let agent = item
                .receiving_agent()
                .and_then(|agent| self.agents.get_mut(agent))
                .map(|character| character as &mut dyn ReceivingAgent);
            let from = item.state();
            let event = item.tick(dt, agent, &mut self.host);
            let to = item.state();
            if from != to || event.is_some() {
                outcomes.push((id, from, to, event));
            }
        }

        for (id, from, to, event) in outcomes {
            if from != to {
                self.emit(WorldEvent::ItemStateChanged { item: id, from, to });
            }
            if let Some(event) = event {
                self.follow_up(id, event);
            }
        }
    }

    /// Removes and returns the events emitted so far.
    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[FrameEvent] {
        &self.events
    }

    // ===== accessors =====

    pub fn config(&self) -> &PickupConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn item(&self, item: ItemId) -> Option<&Item> {
        self.items.get(item)
    }

    pub fn agent(&self, agent: AgentId) -> Option<&Character> {
        self.agents.get(agent)
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter()
    }

    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &Character)> {
        self.agents.iter()
    }

    /// Number of items currently in `state`.
    pub fn count_in_state(&self, state: ItemState) -> usize {
        self.items
            .iter()
            .filter(|(_, item)| item.state() == state)
            .count()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // ===== internals =====

    fn emit(&mut self, event: WorldEvent) {
        self.events.push(FrameEvent {
            frame: self.frame,
            event,
        });
    }

    fn follow_up(&mut self, id: ItemId, event: ItemEvent) {
        match event {
            ItemEvent::TransferFinished {
                agent,
                slot,
                placement,
                release_error,
            } => {
                if let Some(err) = release_error {
                    tracing::warn!(item = %id, %agent, %slot, error = %err, "slot release unpaired");
                }
                tracing::debug!(item = %id, %agent, ?placement, "transfer finished");
                self.emit(WorldEvent::TransferFinished {
                    item: id,
                    agent,
                    slot,
                    placement,
                });
                self.place(id, agent, placement);
            }
            ItemEvent::TransferAborted { agent, slot } => {
                tracing::warn!(item = %id, %agent, %slot, "receiving agent gone, item dropped");
                self.emit(WorldEvent::TransferAborted {
                    item: id,
                    agent,
                    slot,
                });
            }
            ItemEvent::Settled => {
                tracing::debug!(item = %id, "item settled");
                self.emit(WorldEvent::ItemSettled { item: id });
            }
        }
    }

    /// Applies the agent's placement decision to the world.
    fn place(&mut self, id: ItemId, agent: AgentId, placement: Placement) {
        let result = match placement {
            Placement::Equipped { .. } => {
                self.play_equip_sound(id, agent, false);
                Ok(())
            }
            Placement::Swapped { dropped, .. } => {
                self.play_equip_sound(id, agent, false);
                let at = self.items.get(id).map(|item| item.pose().location);
                self.drop_item(dropped, at)
            }
            Placement::Stowed { .. } | Placement::Absorbed { .. } => {
                self.transition(id, |item, host| item.consume(host))
            }
        };
        if let Err(err) = result {
            tracing::warn!(item = %id, %agent, error = %err, "placement follow-up failed");
        }
    }

    fn play_equip_sound(&mut self, id: ItemId, agent: AgentId, force: bool) {
        if let (Some(item), Some(character)) = (self.items.get_mut(id), self.agents.get_mut(agent)) {
            item.play_equip_sound(character, force, &mut self.host);
        }
    }

    /// Equipped → Falling, optionally teleporting the item to `at` first.
    fn drop_item(&mut self, id: ItemId, at: Option<Vec3>) -> Result<()> {
        if let (Some(location), Some(item)) = (at, self.items.get_mut(id)) {
            let pose = Pose {
                location,
                ..*item.pose()
            };
            item.set_pose(pose, &mut self.host);
        }
        self.transition(id, |item, host| item.drop_to_world(host))
    }

    /// Runs a checked lifecycle step and records the state change.
    fn transition<F>(&mut self, id: ItemId, step: F) -> Result<()>
    where
        F: FnOnce(&mut Item, &mut H) -> std::result::Result<(), TransitionError>,
    {
        let item = self
            .items
            .get_mut(id)
            .ok_or(RuntimeError::ItemNotFound(id))?;
        let from = item.state();
        step(item, &mut self.host)?;
        let to = item.state();
        tracing::info!(item = %id, %from, %to, "item state changed");
        self.emit(WorldEvent::ItemStateChanged { item: id, from, to });
        Ok(())
    }

    /// Runs an unchecked item step that may report an event, recording the
    /// resulting state change and following up on the event.
    fn advance_item<F>(&mut self, id: ItemId, step: F)
    where
        F: FnOnce(&mut Item, &mut H) -> Option<ItemEvent>,
    {
        let Some(item) = self.items.get_mut(id) else {
            return;
        };
        let from = item.state();
        let event = step(item, &mut self.host);
        let to = item.state();
        if from != to {
            self.emit(WorldEvent::ItemStateChanged { item: id, from, to });
        }
        if let Some(event) = event {
            self.follow_up(id, event);
        }
    }
}
