//! The receiving side of a pickup.
//!
//! An item mid-transfer holds only an [`AgentId`]; the host resolves it to
//! something implementing [`ReceivingAgent`] each frame. [`Character`] is the
//! reference implementation used by the runtime.
mod character;
mod error;
mod slots;
mod sound;

pub use character::Character;
pub use error::AgentError;
pub use slots::{InterpSlot, SlotIndex};
pub use sound::{SoundGate, SoundKind};

use glam::Vec3;

use crate::item::{ItemId, ItemKind};
use crate::math::Rotator;

/// Generational handle to an agent owned by the host.
///
/// A handle whose agent has been despawned no longer resolves, which is how
/// items detect that the agent pulling them is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId {
    pub index: u32,
    pub generation: u32,
}

impl AgentId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "agent#{}v{}", self.index, self.generation)
    }
}

/// Camera-like point of view of an agent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewpoint {
    pub location: Vec3,
    pub rotation: Rotator,
}

impl Viewpoint {
    pub fn new(location: Vec3, rotation: Rotator) -> Self {
        Self { location, rotation }
    }

    /// World position of an anchor given relative to this viewpoint.
    ///
    /// Anchors follow the viewpoint's heading (yaw) only.
    pub fn anchor(&self, local_offset: Vec3) -> Vec3 {
        self.location + self.rotation.yaw_quat() * local_offset
    }
}

/// What the agent did with an item whose transfer finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Item became the equipped weapon in inventory slot `slot`.
    Equipped { slot: usize },
    /// Item went into a free inventory slot and is hidden.
    Stowed { slot: usize },
    /// Inventory was full: the item replaced the equipped weapon, which the
    /// caller must drop into the world.
    Swapped { slot: usize, dropped: ItemId },
    /// Item was merged into a counter (ammo) and is consumed.
    Absorbed { total: u32 },
}

impl Placement {
    /// True when the item ends up in the agent's hands.
    pub const fn is_equipped(&self) -> bool {
        matches!(self, Self::Equipped { .. } | Self::Swapped { .. })
    }
}

/// Agent operations needed to pull an item in and put it away.
pub trait ReceivingAgent {
    fn slot_count(&self) -> usize;

    /// Number of items currently reserved on `slot`, or `None` if out of range.
    fn slot_occupancy(&self, slot: SlotIndex) -> Option<u32>;

    /// Adds `delta` to a slot counter and returns the new value.
    fn adjust_slot_occupancy(&mut self, slot: SlotIndex, delta: i32) -> Result<u32, AgentError>;

    /// World position of the slot anchor, or `None` if out of range.
    fn slot_position(&self, slot: SlotIndex) -> Option<Vec3>;

    fn viewpoint(&self) -> Viewpoint;

    fn inventory_full(&self) -> bool;

    /// Returns true and closes the gate if the sound may play now.
    fn try_start_sound_cooldown(&mut self, kind: SoundKind) -> bool;

    /// Finalizes a pickup.
    fn receive_item(&mut self, item: ItemId, kind: ItemKind, count: u32) -> Placement;

    /// Clears any inventory-slot highlight shown by the UI.
    fn clear_highlight(&mut self);

    /// Slot with the fewest concurrently transferring items, lowest index on
    /// ties. Spreads simultaneous pickups across anchor points.
    fn least_loaded_slot(&self) -> Option<SlotIndex> {
        (0..self.slot_count())
            .map(SlotIndex)
            .filter_map(|slot| self.slot_occupancy(slot).map(|count| (slot, count)))
            .min_by_key(|&(slot, count)| (count, slot))
            .map(|(slot, _)| slot)
    }
}
