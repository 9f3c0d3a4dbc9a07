//! The bundle of optional curve resources attached to an item.

use std::sync::Arc;

use glam::Vec3;

use super::Curve;

/// Names of the curve resources an item may reference.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CurveId {
    VerticalEasing,
    Scale,
    IdlePulse,
    TransferPulse,
}

/// Curve handles used by an item. Every entry is optional: a missing curve
/// only disables the computation that needs it.
#[derive(Clone, Default)]
pub struct ItemCurves {
    /// Eases the vertical component of a transfer.
    pub vertical: Option<Arc<dyn Curve<f32>>>,
    /// Uniform scale over a transfer.
    pub scale: Option<Arc<dyn Curve<f32>>>,
    /// Glow pulse while the item waits to be picked up.
    pub idle_pulse: Option<Arc<dyn Curve<Vec3>>>,
    /// Glow pulse while the item is transferring.
    pub transfer_pulse: Option<Arc<dyn Curve<Vec3>>>,
}

impl ItemCurves {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_vertical(mut self, curve: impl Curve<f32> + 'static) -> Self {
        self.vertical = Some(Arc::new(curve));
        self
    }

    pub fn with_scale(mut self, curve: impl Curve<f32> + 'static) -> Self {
        self.scale = Some(Arc::new(curve));
        self
    }

    pub fn with_idle_pulse(mut self, curve: impl Curve<Vec3> + 'static) -> Self {
        self.idle_pulse = Some(Arc::new(curve));
        self
    }

    pub fn with_transfer_pulse(mut self, curve: impl Curve<Vec3> + 'static) -> Self {
        self.transfer_pulse = Some(Arc::new(curve));
        self
    }

    pub fn has(&self, id: CurveId) -> bool {
        match id {
            CurveId::VerticalEasing => self.vertical.is_some(),
            CurveId::Scale => self.scale.is_some(),
            CurveId::IdlePulse => self.idle_pulse.is_some(),
            CurveId::TransferPulse => self.transfer_pulse.is_some(),
        }
    }

    /// Drops the named curve, as when a host unloads the asset.
    pub fn clear(&mut self, id: CurveId) {
        match id {
            CurveId::VerticalEasing => self.vertical = None,
            CurveId::Scale => self.scale = None,
            CurveId::IdlePulse => self.idle_pulse = None,
            CurveId::TransferPulse => self.transfer_pulse = None,
        }
    }
}

impl core::fmt::Debug for ItemCurves {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemCurves")
            .field("vertical", &self.vertical.is_some())
            .field("scale", &self.scale.is_some())
            .field("idle_pulse", &self.idle_pulse.is_some())
            .field("transfer_pulse", &self.transfer_pulse.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ScalarCurve;
    use strum::IntoEnumIterator;

    #[test]
    fn clear_removes_only_named_curve() {
        let mut curves = ItemCurves::empty()
            .with_vertical(ScalarCurve::linear(0.0, 1.0))
            .with_scale(ScalarCurve::constant(1.0));

        curves.clear(CurveId::VerticalEasing);

        assert!(!curves.has(CurveId::VerticalEasing));
        assert!(curves.has(CurveId::Scale));
    }

    #[test]
    fn curve_ids_round_trip_through_names() {
        for id in CurveId::iter() {
            let parsed: CurveId = id.as_ref().parse().unwrap();
            assert_eq!(parsed, id);
        }
        assert_eq!(CurveId::TransferPulse.to_string(), "transfer_pulse");
    }
}
