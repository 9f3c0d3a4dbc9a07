//! Per-state collision and visibility records.
//!
//! Each [`ItemState`] maps to one immutable [`Presentation`]. The mapping is an
//! exhaustive `match`, so adding a state without a record fails to compile.

use super::ItemState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum CollisionEnabled {
    NoCollision,
    QueryOnly,
    QueryAndPhysics,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum CollisionResponse {
    Ignore,
    Overlap,
    Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum CollisionChannel {
    Visibility,
    Camera,
    WorldStatic,
    WorldDynamic,
    Pawn,
}

/// Collision settings of one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionSetup {
    pub enabled: CollisionEnabled,
    /// Response to every channel not listed in `overrides`.
    pub default_response: CollisionResponse,
    pub overrides: &'static [(CollisionChannel, CollisionResponse)],
}

impl CollisionSetup {
    pub const DISABLED: Self = Self {
        enabled: CollisionEnabled::NoCollision,
        default_response: CollisionResponse::Ignore,
        overrides: &[],
    };

    /// Effective response for `channel`, ignoring whether collision is enabled.
    pub fn response(&self, channel: CollisionChannel) -> CollisionResponse {
        self.overrides
            .iter()
            .find(|(c, _)| *c == channel)
            .map_or(self.default_response, |(_, response)| *response)
    }
}

/// What a state does to the floating pickup widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetPolicy {
    /// Leave it as it is (shown/hidden by the host's focus logic).
    Unchanged,
    Hidden,
}

/// Visibility, physics and collision configuration applied on entering a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub mesh_visible: bool,
    pub simulate_physics: bool,
    pub gravity: bool,
    pub pickup_widget: WidgetPolicy,
    pub mesh: CollisionSetup,
    /// Overlap volume that tells agents an item is nearby.
    pub area_sphere: CollisionSetup,
    /// Box hit by the agent's item trace.
    pub collision_box: CollisionSetup,
}

const PICKUP: Presentation = Presentation {
    mesh_visible: true,
    simulate_physics: false,
    gravity: false,
    pickup_widget: WidgetPolicy::Unchanged,
    mesh: CollisionSetup::DISABLED,
    area_sphere: CollisionSetup {
        enabled: CollisionEnabled::QueryOnly,
        default_response: CollisionResponse::Overlap,
        overrides: &[],
    },
    collision_box: CollisionSetup {
        enabled: CollisionEnabled::QueryAndPhysics,
        default_response: CollisionResponse::Ignore,
        overrides: &[(CollisionChannel::Visibility, CollisionResponse::Block)],
    },
};

const HELD: Presentation = Presentation {
    mesh_visible: true,
    simulate_physics: false,
    gravity: false,
    pickup_widget: WidgetPolicy::Hidden,
    mesh: CollisionSetup::DISABLED,
    area_sphere: CollisionSetup::DISABLED,
    collision_box: CollisionSetup::DISABLED,
};

const FALLING: Presentation = Presentation {
    mesh_visible: true,
    simulate_physics: true,
    gravity: true,
    pickup_widget: WidgetPolicy::Unchanged,
    mesh: CollisionSetup {
        enabled: CollisionEnabled::QueryAndPhysics,
        default_response: CollisionResponse::Ignore,
        overrides: &[(CollisionChannel::WorldStatic, CollisionResponse::Block)],
    },
    area_sphere: CollisionSetup::DISABLED,
    collision_box: CollisionSetup::DISABLED,
};

const CONSUMED: Presentation = Presentation {
    mesh_visible: false,
    ..HELD
};

impl ItemState {
    /// The configuration record applied when entering this state.
    pub fn presentation(self) -> &'static Presentation {
        match self {
            ItemState::Pickup => &PICKUP,
            ItemState::Equipped | ItemState::TransferringToOwner => &HELD,
            ItemState::Falling => &FALLING,
            ItemState::Consumed => &CONSUMED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn mapping_covers_every_state() {
        let mapped: Vec<_> = ItemState::iter()
            .map(|state| (state, state.presentation()))
            .collect();
        assert_eq!(mapped.len(), ItemState::COUNT);
    }

    #[test]
    fn mapping_is_deterministic() {
        for state in ItemState::iter() {
            assert_eq!(state.presentation(), state.presentation());
        }
    }

    #[test]
    fn only_falling_simulates_physics() {
        for state in ItemState::iter() {
            let presentation = state.presentation();
            assert_eq!(presentation.simulate_physics, state == ItemState::Falling);
            assert_eq!(presentation.gravity, state == ItemState::Falling);
        }
    }

    #[test]
    fn only_pickup_is_traceable_and_overlappable() {
        for state in ItemState::iter() {
            let presentation = state.presentation();
            let traceable = presentation.collision_box.enabled != CollisionEnabled::NoCollision
                && presentation
                    .collision_box
                    .response(CollisionChannel::Visibility)
                    == CollisionResponse::Block;
            let overlappable = presentation.area_sphere.enabled != CollisionEnabled::NoCollision;
            assert_eq!(traceable, state == ItemState::Pickup);
            assert_eq!(overlappable, state == ItemState::Pickup);
        }
    }

    #[test]
    fn consumed_items_are_hidden() {
        for state in ItemState::iter() {
            assert_eq!(
                state.presentation().mesh_visible,
                state != ItemState::Consumed
            );
        }
    }

    #[test]
    fn falling_mesh_blocks_world_static_only() {
        let mesh = ItemState::Falling.presentation().mesh;
        for channel in CollisionChannel::iter() {
            let expected = if channel == CollisionChannel::WorldStatic {
                CollisionResponse::Block
            } else {
                CollisionResponse::Ignore
            };
            assert_eq!(mesh.response(channel), expected);
        }
    }
}
