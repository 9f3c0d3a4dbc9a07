//! Item catalog loader.

use std::path::Path;

use pickup_core::ItemSpec;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemSpec>,
}

impl ItemCatalog {
    /// First entry named `name`.
    pub fn find(&self, name: &str) -> Option<&ItemSpec> {
        self.items.iter().find(|spec| spec.name == name)
    }
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog)
    }
}
