//! Reference receiving agent: a character with a camera, interp anchors, a
//! weapon inventory and an ammo counter.

use arrayvec::ArrayVec;
use glam::Vec3;

use super::{
    AgentError, InterpSlot, Placement, ReceivingAgent, SlotIndex, SoundGate, SoundKind, Viewpoint,
};
use crate::config::{AgentConfig, ConfigError};
use crate::item::{ItemId, ItemKind};

#[derive(Clone, Debug)]
pub struct Character {
    viewpoint: Viewpoint,
    slots: ArrayVec<InterpSlot, { AgentConfig::MAX_INTERP_SLOTS }>,
    pickup_gate: SoundGate,
    equip_gate: SoundGate,
    inventory: ArrayVec<ItemId, { AgentConfig::MAX_INVENTORY_SLOTS }>,
    inventory_capacity: usize,
    equipped_slot: Option<usize>,
    ammo: u32,
    highlighted_slot: Option<usize>,
}

impl Character {
    pub fn new(config: &AgentConfig, viewpoint: Viewpoint) -> Result<Self, ConfigError> {
        config.validate()?;
        let slots = config
            .slot_offsets
            .iter()
            .copied()
            .map(InterpSlot::new)
            .collect();

        Ok(Self {
            viewpoint,
            slots,
            pickup_gate: SoundGate::new(config.pickup_sound_cooldown_secs),
            equip_gate: SoundGate::new(config.equip_sound_cooldown_secs),
            inventory: ArrayVec::new(),
            inventory_capacity: config.inventory_capacity,
            equipped_slot: None,
            ammo: 0,
            highlighted_slot: None,
        })
    }

    /// Advances the sound cooldowns.
    pub fn tick(&mut self, dt: f32) {
        self.pickup_gate.tick(dt);
        self.equip_gate.tick(dt);
    }

    pub fn set_viewpoint(&mut self, viewpoint: Viewpoint) {
        self.viewpoint = viewpoint;
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.viewpoint.rotation.yaw = yaw;
    }

    pub fn slots(&self) -> &[InterpSlot] {
        &self.slots
    }

    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    pub fn inventory_capacity(&self) -> usize {
        self.inventory_capacity
    }

    pub fn equipped(&self) -> Option<ItemId> {
        self.equipped_slot.map(|slot| self.inventory[slot])
    }

    pub fn equipped_slot(&self) -> Option<usize> {
        self.equipped_slot
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn highlighted_slot(&self) -> Option<usize> {
        self.highlighted_slot
    }

    /// Highlights the inventory slot the next pickup would land in.
    pub fn highlight_next_free_slot(&mut self) {
        self.highlighted_slot = (!self.inventory_full()).then_some(self.inventory.len());
    }

    /// Removes the equipped weapon from the inventory and returns it. The
    /// freed slot keeps an empty hand from ever facing a full inventory.
    pub fn remove_equipped(&mut self) -> Result<ItemId, AgentError> {
        let slot = self.equipped_slot.take().ok_or(AgentError::NothingEquipped)?;
        Ok(self.inventory.remove(slot))
    }

    /// Equips the weapon in `slot`, returning `(previously equipped, newly
    /// equipped)`.
    pub fn exchange_equipped(
        &mut self,
        slot: usize,
    ) -> Result<(Option<ItemId>, ItemId), AgentError> {
        let incoming = *self
            .inventory
            .get(slot)
            .ok_or(AgentError::InventorySlotEmpty { slot })?;
        if self.equipped_slot == Some(slot) {
            return Err(AgentError::AlreadyEquipped { slot });
        }
        let outgoing = self.equipped();
        self.equipped_slot = Some(slot);
        Ok((outgoing, incoming))
    }

    fn slot(&self, slot: SlotIndex) -> Result<&InterpSlot, AgentError> {
        self.slots.get(slot.0).ok_or(AgentError::SlotOutOfRange {
            slot,
            count: self.slots.len(),
        })
    }

    fn place_weapon(&mut self, item: ItemId) -> Placement {
        match self.equipped_slot {
            // Only this arm and the stow arm grow the inventory, and both leave
            // a weapon equipped, so an empty hand always has a free slot.
            None => {
                let slot = self.inventory.len();
                self.inventory.push(item);
                self.equipped_slot = Some(slot);
                Placement::Equipped { slot }
            }
            Some(_) if !self.inventory_full() => {
                let slot = self.inventory.len();
                self.inventory.push(item);
                Placement::Stowed { slot }
            }
            Some(slot) => {
                let dropped = core::mem::replace(&mut self.inventory[slot], item);
                Placement::Swapped { slot, dropped }
            }
        }
    }
}

impl ReceivingAgent for Character {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn slot_occupancy(&self, slot: SlotIndex) -> Option<u32> {
        self.slots.get(slot.0).map(|s| s.occupancy)
    }

    fn adjust_slot_occupancy(&mut self, slot: SlotIndex, delta: i32) -> Result<u32, AgentError> {
        let count = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot.0)
            .ok_or(AgentError::SlotOutOfRange { slot, count })?;
        entry.occupancy = entry
            .occupancy
            .checked_add_signed(delta)
            .ok_or(AgentError::OccupancyUnderflow { slot })?;
        Ok(entry.occupancy)
    }

    fn slot_position(&self, slot: SlotIndex) -> Option<Vec3> {
        self.slot(slot)
            .ok()
            .map(|s| self.viewpoint.anchor(s.offset))
    }

    fn viewpoint(&self) -> Viewpoint {
        self.viewpoint
    }

    fn inventory_full(&self) -> bool {
        self.inventory.len() >= self.inventory_capacity
    }

    fn try_start_sound_cooldown(&mut self, kind: SoundKind) -> bool {
        match kind {
            SoundKind::Pickup => self.pickup_gate.try_trigger(),
            SoundKind::Equip => self.equip_gate.try_trigger(),
        }
    }

    fn receive_item(&mut self, item: ItemId, kind: ItemKind, count: u32) -> Placement {
        match kind {
            ItemKind::Ammo => {
                self.ammo = self.ammo.saturating_add(count);
                Placement::Absorbed { total: self.ammo }
            }
            ItemKind::Weapon => self.place_weapon(item),
        }
    }

    fn clear_highlight(&mut self) {
        self.highlighted_slot = None;
    }
}
