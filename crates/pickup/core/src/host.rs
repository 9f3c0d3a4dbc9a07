//! The presentation collaborator.
//!
//! Everything an item wants the host engine to show or play goes through
//! [`ItemHost`]. The item also caches what it last sent, so hosts that poll
//! instead of listening can read the same values from the item.

use crate::item::{ItemId, ItemState, Presentation};
use crate::math::Pose;

/// Shader-facing scalar parameters written by items.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialParam {
    GlowAmount,
    FresnelExponent,
    FresnelReflectFraction,
    /// 0 shows the glow material, 1 hides it.
    GlowBlendAlpha,
}

/// Reference to a sound asset owned by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SoundCue(pub String);

impl SoundCue {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Host-side sink for item presentation changes.
pub trait ItemHost {
    /// Applies the collision/visibility record for a newly entered state.
    fn apply_presentation(&mut self, item: ItemId, state: ItemState, presentation: &Presentation);

    fn set_material_scalar(&mut self, item: ItemId, param: MaterialParam, value: f32);

    fn set_outline(&mut self, item: ItemId, enabled: bool);

    fn play_sound(&mut self, item: ItemId, cue: &SoundCue);

    /// Teleport-style placement; the host must not sweep for collisions.
    fn set_pose(&mut self, _item: ItemId, _pose: &Pose) {}
}

/// Host that ignores every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl ItemHost for NullHost {
    fn apply_presentation(&mut self, _: ItemId, _: ItemState, _: &Presentation) {}

    fn set_material_scalar(&mut self, _: ItemId, _: MaterialParam, _: f32) {}

    fn set_outline(&mut self, _: ItemId, _: bool) {}

    fn play_sound(&mut self, _: ItemId, _: &SoundCue) {}
}
