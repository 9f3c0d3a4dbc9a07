//! Pose types and the interpolation helpers used by the transfer engine.
//!
//! World space is Z-up. Angles are stored in degrees.

use glam::{Quat, Vec3};

/// Euler rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Rotation about the vertical axis only.
    pub const fn from_yaw(yaw: f32) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// Quaternion for the yaw component alone.
    pub fn yaw_quat(&self) -> Quat {
        Quat::from_rotation_z(self.yaw.to_radians())
    }
}

/// Location, rotation and uniform scale of an item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub location: Vec3,
    pub rotation: Rotator,
    pub scale: f32,
}

impl Pose {
    pub fn new(location: Vec3, rotation: Rotator) -> Self {
        Self {
            location,
            rotation,
            scale: 1.0,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Rotator::ZERO)
    }
}

/// Frame-rate independent exponential approach of `current` toward `target`.
///
/// Equivalent to a first-order low-pass filter: the remaining distance shrinks
/// by `exp(-rate * dt)` each step, so the value never overshoots and converges
/// monotonically for any positive `dt`. A non-positive `rate` snaps to the
/// target; a non-positive `dt` leaves the value untouched.
pub fn approach(current: f32, target: f32, dt: f32, rate: f32) -> f32 {
    if !(dt > 0.0) {
        return current;
    }
    if !(rate > 0.0) {
        return target;
    }
    target + (current - target) * (-rate * dt).exp()
}

/// Applies [`approach`] to the X and Y components, keeping `current.z`.
pub fn approach_lateral(current: Vec3, target: Vec3, dt: f32, rate: f32) -> Vec3 {
    Vec3::new(
        approach(current.x, target.x, dt, rate),
        approach(current.y, target.y, dt, rate),
        current.z,
    )
}

/// Height of a transferring item: the start height plus the eased curve value
/// scaled by the vertical distance to the target.
///
/// Only the vertical separation feeds the scale factor; lateral motion is
/// handled separately by [`approach_lateral`].
pub fn eased_height(start: Vec3, target: Vec3, curve_value: f32) -> f32 {
    let vertical_only = Vec3::new(0.0, 0.0, target.z - start.z);
    start.z + curve_value * vertical_only.length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_never_overshoots() {
        let frame_times = [0.001, 0.016, 0.033, 0.1, 0.25, 1.0, 5.0];
        for &dt in &frame_times {
            let mut value = -40.0_f32;
            let target = 12.5_f32;
            let mut previous_gap = (target - value).abs();
            for _ in 0..200 {
                value = approach(value, target, dt, 30.0);
                let gap = (target - value).abs();
                assert!(value <= target, "overshoot at dt={dt}: {value}");
                assert!(gap <= previous_gap, "gap grew at dt={dt}");
                previous_gap = gap;
            }
        }
    }

    #[test]
    fn approach_is_frame_rate_independent() {
        let mut coarse = 0.0_f32;
        coarse = approach(coarse, 100.0, 0.1, 30.0);

        let mut fine = 0.0_f32;
        for _ in 0..10 {
            fine = approach(fine, 100.0, 0.01, 30.0);
        }

        assert!((coarse - fine).abs() < 1e-3);
    }

    #[test]
    fn approach_edge_rates() {
        assert_eq!(approach(1.0, 5.0, 0.0, 30.0), 1.0);
        assert_eq!(approach(1.0, 5.0, -0.5, 30.0), 1.0);
        assert_eq!(approach(1.0, 5.0, 0.016, 0.0), 5.0);
    }

    #[test]
    fn eased_height_uses_vertical_distance_only() {
        let start = Vec3::new(0.0, 0.0, 10.0);
        let target = Vec3::new(300.0, -200.0, 110.0);
        assert_eq!(eased_height(start, target, 0.0), 10.0);
        assert_eq!(eased_height(start, target, 0.5), 60.0);
        assert_eq!(eased_height(start, target, 1.0), 110.0);

        // Target below the start still scales by the absolute distance.
        let below = Vec3::new(0.0, 0.0, -90.0);
        assert_eq!(eased_height(start, below, 1.0), 110.0);
    }

    #[test]
    fn eased_height_is_deterministic() {
        let start = Vec3::new(3.0, 4.0, 5.0);
        let target = Vec3::new(-1.0, 8.0, 25.0);
        let a = eased_height(start, target, 0.37);
        let b = eased_height(start, target, 0.37);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
