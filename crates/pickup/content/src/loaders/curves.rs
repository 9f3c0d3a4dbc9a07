//! Curve asset loader.

use std::path::Path;
use std::sync::Arc;

use glam::Vec3;
use pickup_core::{Curve, ItemCurves, ScalarCurve, VectorCurve};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Curve assets as stored in RON. Every entry is optional.
///
/// ```ron
/// (
///     vertical_easing: Some([(time: 0.0, value: 0.0), (time: 1.0, value: 1.0)]),
///     idle_pulse: Some((
///         x: [(time: 0.0, value: 0.2), (time: 0.5, value: 1.0), (time: 1.0, value: 0.2)],
///         y: [(time: 0.0, value: 1.0)],
///         z: [(time: 0.0, value: 1.0)],
///     )),
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveAssets {
    pub vertical_easing: Option<ScalarCurve>,
    pub scale: Option<ScalarCurve>,
    pub idle_pulse: Option<VectorCurve>,
    pub transfer_pulse: Option<VectorCurve>,
}

impl CurveAssets {
    pub fn into_curves(self) -> ItemCurves {
        ItemCurves {
            vertical: self.vertical_easing.map(scalar),
            scale: self.scale.map(scalar),
            idle_pulse: self.idle_pulse.map(vector),
            transfer_pulse: self.transfer_pulse.map(vector),
        }
    }
}

fn scalar(curve: ScalarCurve) -> Arc<dyn Curve<f32>> {
    Arc::new(curve)
}

fn vector(curve: VectorCurve) -> Arc<dyn Curve<Vec3>> {
    Arc::new(curve)
}

/// Loader for curve assets from RON files.
pub struct CurveLoader;

impl CurveLoader {
    /// Loads curve assets. Keyframes are validated on deserialization, so an
    /// empty or unsorted curve fails the whole file.
    pub fn load(path: &Path) -> LoadResult<ItemCurves> {
        Self::load_assets(path).map(CurveAssets::into_curves)
    }

    pub fn load_assets(path: &Path) -> LoadResult<CurveAssets> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CurveAssets> {
        let assets: CurveAssets = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse curve assets RON: {}", e))?;

        Ok(assets)
    }
}
