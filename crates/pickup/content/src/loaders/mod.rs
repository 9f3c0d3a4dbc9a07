//! Loaders that turn TOML/RON data files into `pickup-core` values.

pub mod config;
pub mod curves;
pub mod factory;
pub mod items;

pub use config::ConfigLoader;
pub use curves::{CurveAssets, CurveLoader};
pub use factory::ContentFactory;
pub use items::{ItemCatalog, ItemLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
