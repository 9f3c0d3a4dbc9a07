//! Curve assets sampled by the transfer engine and the ambient pulse.
//!
//! Curves are authored over the normalized domain `[0, 1]`; callers pass the
//! elapsed fraction of the countdown that drives them.
mod keyframe;
mod set;

pub use keyframe::{Keyframe, ScalarCurve, VectorCurve};
pub use set::{CurveId, ItemCurves};

use crate::error::{CoreError, ErrorSeverity};

/// A sampled curve resource.
pub trait Curve<T>: Send + Sync {
    fn sample(&self, t: f32) -> T;
}

/// Adapts a closure into a [`Curve`].
///
/// Handy for hosts that evaluate curves procedurally.
#[derive(Clone, Copy)]
pub struct FnCurve<F>(pub F);

impl<F, T> Curve<T> for FnCurve<F>
where
    F: Fn(f32) -> T + Send + Sync,
{
    fn sample(&self, t: f32) -> T {
        (self.0)(t)
    }
}

impl<F> core::fmt::Debug for FnCurve<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnCurve")
    }
}

/// Errors raised while building a keyframe curve.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("curve has no keyframes")]
    Empty,

    #[error("keyframe {index} is not finite")]
    NonFinite { index: usize },

    #[error("keyframe {index} at t={time} is not after the previous key")]
    Unsorted { index: usize, time: f32 },
}

impl CoreError for CurveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "CURVE_EMPTY",
            Self::NonFinite { .. } => "CURVE_NON_FINITE",
            Self::Unsorted { .. } => "CURVE_UNSORTED",
        }
    }
}
