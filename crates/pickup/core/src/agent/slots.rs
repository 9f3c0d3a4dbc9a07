use glam::Vec3;

/// Index into an agent's interp slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotIndex(pub usize);

impl SlotIndex {
    /// Anchor used by weapons regardless of the slot they reserve.
    pub const WEAPON: Self = Self(0);
}

impl core::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "slot{}", self.0)
    }
}

/// Anchor point near the viewpoint plus the number of items heading to it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpSlot {
    pub offset: Vec3,
    pub occupancy: u32,
}

impl InterpSlot {
    pub const fn new(offset: Vec3) -> Self {
        Self {
            offset,
            occupancy: 0,
        }
    }
}
