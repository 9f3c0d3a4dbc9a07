//! Tuning configuration loader.

use std::path::Path;

use pickup_core::PickupConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`PickupConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates a config file. Missing sections and fields fall
    /// back to their defaults.
    pub fn load(path: &Path) -> LoadResult<PickupConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PickupConfig> {
        let config: PickupConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid pickup config: {}", e))?;

        Ok(config)
    }
}
