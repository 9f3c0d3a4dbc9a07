//! Data-driven pickup content and its loaders.
//!
//! - Tuning configuration (TOML)
//! - Curve assets for transfer easing and glow pulses (RON)
//! - Item catalogs (RON)
//! - Built-in defaults used when no data file is given
//!
//! Loaders produce `pickup-core` types directly; nothing here keeps state.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, CurveAssets, CurveLoader, ItemCatalog, ItemLoader, LoadResult,
};
