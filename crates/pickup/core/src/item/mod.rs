//! Items and their lifecycle.
//!
//! An [`Item`] owns its state, pose and presentation cache. Every state change
//! goes through one place so the presentation record of the new state is always
//! applied, and the transfer and pulse logic (see the `transfer` and `pulse`
//! submodules) only ever runs in the states that own it.
mod error;
mod presentation;
mod pulse;
mod rarity;
mod state;
mod transfer;

pub use error::{TransferError, TransitionError};
pub use presentation::{
    CollisionChannel, CollisionEnabled, CollisionResponse, CollisionSetup, Presentation,
    WidgetPolicy,
};
pub use pulse::MaterialParams;
pub use rarity::{Rarity, StarFlags};
pub use state::ItemState;
pub use transfer::{Transfer, TransferTicket};

use crate::agent::{AgentError, AgentId, Placement, ReceivingAgent, SlotIndex, SoundKind};
use crate::config::ItemConfig;
use crate::curve::ItemCurves;
use crate::host::{ItemHost, MaterialParam, SoundCue};
use crate::math::Pose;
use crate::timer::Countdown;

/// Generational handle to an item owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId {
    pub index: u32,
    pub generation: u32,
}

impl ItemId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "item#{}v{}", self.index, self.generation)
    }
}

/// What the receiving agent does with the item once it arrives.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    /// Goes to the inventory or the agent's hands; flies to the weapon anchor.
    #[default]
    Weapon,
    /// Merged into the agent's ammo counter.
    Ammo,
}

/// Static description of an item, as found in an item catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default = "ItemSpec::default_count"))]
    pub count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pickup_sound: Option<SoundCue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equip_sound: Option<SoundCue>,
}

impl ItemSpec {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            count: Self::default_count(),
            rarity: Rarity::default(),
            pickup_sound: None,
            equip_sound: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_sounds(mut self, pickup: Option<SoundCue>, equip: Option<SoundCue>) -> Self {
        self.pickup_sound = pickup;
        self.equip_sound = equip;
        self
    }

    const fn default_count() -> u32 {
        1
    }
}

/// Something an item reports back from `tick` that its owner has to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEvent {
    /// The transfer countdown expired and the agent placed the item.
    TransferFinished {
        agent: AgentId,
        slot: SlotIndex,
        placement: Placement,
        /// Set when releasing the reserved slot failed (unpaired counter).
        release_error: Option<AgentError>,
    },
    /// The transfer could not complete because the agent is gone; the item
    /// dropped back into the world.
    TransferAborted { agent: AgentId, slot: SlotIndex },
    /// A falling item came to rest and can be picked up again.
    Settled,
}

#[derive(Debug)]
pub struct Item {
    id: ItemId,
    name: String,
    kind: ItemKind,
    count: u32,
    rarity: Rarity,
    state: ItemState,
    pose: Pose,
    config: ItemConfig,
    curves: ItemCurves,
    pickup_sound: Option<SoundCue>,
    equip_sound: Option<SoundCue>,
    transfer: Option<Transfer>,
    pulse: Option<Countdown>,
    fall: Option<Countdown>,
    presentation: &'static Presentation,
    outline_enabled: bool,
    can_change_outline: bool,
    material: MaterialParams,
}

impl Item {
    /// Creates an item resting in the world in the `Pickup` state.
    ///
    /// Applies the `Pickup` presentation, switches the outline off, turns the
    /// glow material on and starts the idle pulse.
    pub fn spawn(
        id: ItemId,
        spec: ItemSpec,
        pose: Pose,
        config: ItemConfig,
        curves: ItemCurves,
        host: &mut dyn ItemHost,
    ) -> Self {
        let mut item = Self {
            id,
            name: spec.name,
            kind: spec.kind,
            count: spec.count,
            rarity: spec.rarity,
            state: ItemState::Pickup,
            pose,
            config,
            curves,
            pickup_sound: spec.pickup_sound,
            equip_sound: spec.equip_sound,
            transfer: None,
            pulse: None,
            fall: None,
            presentation: ItemState::Pickup.presentation(),
            outline_enabled: false,
            can_change_outline: true,
            material: MaterialParams::default(),
        };
        item.enter_state(ItemState::Pickup, host);
        host.set_outline(id, false);
        item.enable_glow(host);
        host.set_pose(id, &item.pose);
        item
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    /// Star flags recomputed from the rarity.
    pub fn active_stars(&self) -> StarFlags {
        self.rarity.stars()
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn presentation(&self) -> &'static Presentation {
        self.presentation
    }

    pub fn outline_enabled(&self) -> bool {
        self.outline_enabled
    }

    /// False while a transfer suspends outline toggling.
    pub fn can_change_outline(&self) -> bool {
        self.can_change_outline
    }

    pub fn material(&self) -> &MaterialParams {
        &self.material
    }

    pub fn curves(&self) -> &ItemCurves {
        &self.curves
    }

    pub fn curves_mut(&mut self) -> &mut ItemCurves {
        &mut self.curves
    }

    pub fn transfer(&self) -> Option<&Transfer> {
        self.transfer.as_ref()
    }

    /// Agent currently pulling this item in, if any.
    pub fn receiving_agent(&self) -> Option<AgentId> {
        self.transfer.as_ref().map(Transfer::agent)
    }

    /// Host-driven placement (physics while falling, the hand socket while
    /// equipped).
    pub fn set_pose(&mut self, pose: Pose, host: &mut dyn ItemHost) {
        self.pose = pose;
        host.set_pose(self.id, &self.pose);
    }

    /// Advances the item by one frame.
    ///
    /// `agent` is the resolved receiving agent while transferring, or `None` if
    /// the handle no longer resolves.
    pub fn tick(
        &mut self,
        dt: f32,
        agent: Option<&mut dyn ReceivingAgent>,
        host: &mut dyn ItemHost,
    ) -> Option<ItemEvent> {
        match self.state {
            ItemState::TransferringToOwner => self.tick_transfer(dt, agent, host),
            ItemState::Pickup => {
                if let Some(pulse) = self.pulse.as_mut() {
                    pulse.advance_wrapping(dt);
                }
                self.update_pulse(host);
                None
            }
            ItemState::Falling => {
                let settled = self.fall.as_mut().is_some_and(|fall| fall.advance(dt));
                if settled {
                    self.enter_state(ItemState::Pickup, host);
                    return Some(ItemEvent::Settled);
                }
                None
            }
            ItemState::Equipped | ItemState::Consumed => None,
        }
    }

    /// Falling → Pickup, when the host's physics reports the item at rest.
    pub fn settle(&mut self, host: &mut dyn ItemHost) -> Result<(), TransitionError> {
        self.transition(ItemState::Pickup, host)
    }

    /// Equipped → Consumed: stowed, absorbed or unequipped by a swap.
    pub fn consume(&mut self, host: &mut dyn ItemHost) -> Result<(), TransitionError> {
        self.transition(ItemState::Consumed, host)
    }

    /// Consumed → Equipped: brought back out of the inventory.
    pub fn equip_from_inventory(&mut self, host: &mut dyn ItemHost) -> Result<(), TransitionError> {
        self.transition(ItemState::Equipped, host)
    }

    /// Equipped → Falling: dropped or thrown by the owner.
    pub fn drop_to_world(&mut self, host: &mut dyn ItemHost) -> Result<(), TransitionError> {
        self.transition(ItemState::Falling, host)
    }

    /// Plays the equip cue, through the agent's cooldown unless forced.
    pub fn play_equip_sound(
        &mut self,
        agent: &mut dyn ReceivingAgent,
        force: bool,
        host: &mut dyn ItemHost,
    ) -> bool {
        self.play_feedback(SoundKind::Equip, force, agent, host)
    }

    pub fn enable_outline(&mut self, host: &mut dyn ItemHost) {
        self.set_outline(true, host);
    }

    pub fn disable_outline(&mut self, host: &mut dyn ItemHost) {
        self.set_outline(false, host);
    }

    pub fn enable_glow(&mut self, host: &mut dyn ItemHost) {
        self.set_material(MaterialParam::GlowBlendAlpha, 0.0, host);
    }

    pub fn disable_glow(&mut self, host: &mut dyn ItemHost) {
        self.set_material(MaterialParam::GlowBlendAlpha, 1.0, host);
    }

    fn set_outline(&mut self, enabled: bool, host: &mut dyn ItemHost) {
        if !self.can_change_outline {
            return;
        }
        self.outline_enabled = enabled;
        host.set_outline(self.id, enabled);
    }

    fn set_material(&mut self, param: MaterialParam, value: f32, host: &mut dyn ItemHost) {
        self.material.set(param, value);
        host.set_material_scalar(self.id, param, value);
    }

    fn play_feedback(
        &mut self,
        kind: SoundKind,
        force: bool,
        agent: &mut dyn ReceivingAgent,
        host: &mut dyn ItemHost,
    ) -> bool {
        if !force && !agent.try_start_sound_cooldown(kind) {
            return false;
        }
        let cue = match kind {
            SoundKind::Pickup => self.pickup_sound.as_ref(),
            SoundKind::Equip => self.equip_sound.as_ref(),
        };
        match cue {
            Some(cue) => {
                host.play_sound(self.id, cue);
                true
            }
            None => false,
        }
    }

    fn transition(&mut self, next: ItemState, host: &mut dyn ItemHost) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(next) {
            return Err(TransitionError {
                item: self.id,
                from: self.state,
                to: next,
            });
        }
        self.enter_state(next, host);
        Ok(())
    }

    /// Sets the state, applies its presentation record and (re)starts the
    /// countdowns owned by that state.
    fn enter_state(&mut self, next: ItemState, host: &mut dyn ItemHost) {
        self.state = next;
        self.presentation = next.presentation();
        host.apply_presentation(self.id, next, self.presentation);

        self.pulse = None;
        self.fall = None;
        match next {
            ItemState::Pickup => self.pulse = Some(Countdown::new(self.config.pulse_period_secs)),
            ItemState::Falling => self.fall = Some(Countdown::new(self.config.fall_settle_secs)),
            ItemState::Equipped | ItemState::TransferringToOwner | ItemState::Consumed => {}
        }
    }
}
