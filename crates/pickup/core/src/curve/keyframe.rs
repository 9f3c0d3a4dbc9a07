//! Piecewise-linear keyframe curves.

use glam::Vec3;

use super::{Curve, CurveError};

/// A single `(time, value)` key.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Scalar curve with linear interpolation between keys and constant
/// extrapolation outside the key range.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")
)]
pub struct ScalarCurve {
    keys: Vec<Keyframe>,
}

impl ScalarCurve {
    /// Builds a curve from keys sorted by strictly increasing time.
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, key) in keys.iter().enumerate() {
            if !key.time.is_finite() || !key.value.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if index > 0 && key.time <= keys[index - 1].time {
                return Err(CurveError::Unsorted {
                    index,
                    time: key.time,
                });
            }
        }
        Ok(Self { keys })
    }

    /// Builds a curve from `(time, value)` pairs.
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Result<Self, CurveError> {
        Self::new(
            pairs
                .iter()
                .map(|&(time, value)| Keyframe::new(time, value))
                .collect(),
        )
    }

    /// A curve holding `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// A straight ramp from `(0, from)` to `(1, to)`.
    pub fn linear(from: f32, to: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, from), Keyframe::new(1.0, to)],
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if !t.is_finite() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after `t`; the bounds above keep it in 1..len.
        let upper = self.keys.partition_point(|key| key.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let alpha = (t - a.time) / (b.time - a.time);
        a.value + (b.value - a.value) * alpha
    }
}

impl TryFrom<Vec<Keyframe>> for ScalarCurve {
    type Error = CurveError;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<ScalarCurve> for Vec<Keyframe> {
    fn from(curve: ScalarCurve) -> Self {
        curve.keys
    }
}

impl Curve<f32> for ScalarCurve {
    fn sample(&self, t: f32) -> f32 {
        self.evaluate(t)
    }
}

/// Three independent scalar channels sampled together.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorCurve {
    pub x: ScalarCurve,
    pub y: ScalarCurve,
    pub z: ScalarCurve,
}

impl VectorCurve {
    pub fn new(x: ScalarCurve, y: ScalarCurve, z: ScalarCurve) -> Self {
        Self { x, y, z }
    }

    pub fn splat(channel: ScalarCurve) -> Self {
        Self {
            x: channel.clone(),
            y: channel.clone(),
            z: channel,
        }
    }
}

impl Curve<Vec3> for VectorCurve {
    fn sample(&self, t: f32) -> Vec3 {
        Vec3::new(self.x.evaluate(t), self.y.evaluate(t), self.z.evaluate(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_keys() {
        assert_eq!(ScalarCurve::new(Vec::new()), Err(CurveError::Empty));
        assert_eq!(
            ScalarCurve::from_pairs(&[(0.0, 0.0), (0.0, 1.0)]),
            Err(CurveError::Unsorted {
                index: 1,
                time: 0.0
            })
        );
        assert_eq!(
            ScalarCurve::from_pairs(&[(0.0, f32::INFINITY)]),
            Err(CurveError::NonFinite { index: 0 })
        );
    }

    #[test]
    fn interpolates_between_keys() {
        let curve = ScalarCurve::from_pairs(&[(0.0, 0.0), (0.5, 2.0), (1.0, 1.0)]).unwrap();
        assert_eq!(curve.sample(0.25), 1.0);
        assert_eq!(curve.sample(0.5), 2.0);
        assert_eq!(curve.sample(0.75), 1.5);
    }

    #[test]
    fn extrapolates_with_end_values() {
        let curve = ScalarCurve::from_pairs(&[(0.2, 3.0), (0.8, 7.0)]).unwrap();
        assert_eq!(curve.sample(-1.0), 3.0);
        assert_eq!(curve.sample(0.0), 3.0);
        assert_eq!(curve.sample(2.0), 7.0);
        assert_eq!(curve.sample(f32::NAN), 3.0);
    }

    #[test]
    fn vector_curve_samples_each_channel() {
        let curve = VectorCurve::new(
            ScalarCurve::linear(0.0, 1.0),
            ScalarCurve::constant(2.0),
            ScalarCurve::linear(4.0, 0.0),
        );
        assert_eq!(curve.sample(0.5), Vec3::new(0.5, 2.0, 2.0));
    }
}
