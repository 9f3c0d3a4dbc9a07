//! Item lifecycle states.

/// Exactly one of these holds for an item at any time.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemState {
    /// Resting in the world, can be picked up.
    #[default]
    Pickup,
    /// In the owner's hands.
    Equipped,
    /// Dropped and physically simulated until it settles.
    Falling,
    /// Moving from the world into a receiving agent's slot.
    TransferringToOwner,
    /// Hidden: stowed in an inventory or absorbed into a counter.
    Consumed,
}

impl ItemState {
    /// Whether `self -> next` is a legal lifecycle step.
    pub const fn can_transition_to(self, next: ItemState) -> bool {
        use ItemState::*;
        matches!(
            (self, next),
            (Pickup, TransferringToOwner)
                | (TransferringToOwner, Equipped)
                | (TransferringToOwner, Falling)
                | (Falling, Pickup)
                | (Equipped, Consumed)
                | (Equipped, Falling)
                | (Consumed, Equipped)
        )
    }
}
