//! Ambient glow pulse.

use strum::IntoEnumIterator;

use super::{Item, ItemState};
use crate::host::{ItemHost, MaterialParam};

/// Last material scalar values an item sent to its host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialParams {
    pub glow_amount: f32,
    pub fresnel_exponent: f32,
    pub fresnel_reflect_fraction: f32,
    pub glow_blend_alpha: f32,
}

impl MaterialParams {
    pub fn get(&self, param: MaterialParam) -> f32 {
        match param {
            MaterialParam::GlowAmount => self.glow_amount,
            MaterialParam::FresnelExponent => self.fresnel_exponent,
            MaterialParam::FresnelReflectFraction => self.fresnel_reflect_fraction,
            MaterialParam::GlowBlendAlpha => self.glow_blend_alpha,
        }
    }

    pub fn set(&mut self, param: MaterialParam, value: f32) {
        match param {
            MaterialParam::GlowAmount => self.glow_amount = value,
            MaterialParam::FresnelExponent => self.fresnel_exponent = value,
            MaterialParam::FresnelReflectFraction => self.fresnel_reflect_fraction = value,
            MaterialParam::GlowBlendAlpha => self.glow_blend_alpha = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialParam, f32)> + '_ {
        MaterialParam::iter().map(|param| (param, self.get(param)))
    }
}

impl Item {
    /// Samples the pulse curve owned by the current state and pushes the
    /// three glow scalars to the host. Outputs keep their last values when
    /// the state has no pulse or its curve is missing.
    pub(super) fn update_pulse(&mut self, host: &mut dyn ItemHost) {
        let (curve, countdown) = match self.state {
            ItemState::Pickup => (self.curves.idle_pulse.as_ref(), self.pulse.as_ref()),
            ItemState::TransferringToOwner => (
                self.curves.transfer_pulse.as_ref(),
                self.transfer.as_ref().map(|transfer| transfer.countdown()),
            ),
            ItemState::Equipped | ItemState::Falling | ItemState::Consumed => return,
        };
        let (Some(curve), Some(countdown)) = (curve, countdown) else {
            return;
        };

        let sample = curve.sample(countdown.fraction());
        let config = self.config;
        self.set_material(MaterialParam::GlowAmount, sample.x * config.glow_amount, host);
        self.set_material(
            MaterialParam::FresnelExponent,
            sample.y * config.fresnel_exponent,
            host,
        );
        self.set_material(
            MaterialParam::FresnelReflectFraction,
            sample.z * config.fresnel_reflect_fraction,
            host,
        );
    }
}
