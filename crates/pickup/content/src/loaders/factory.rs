//! Content factory resolving each data source from a file or the built-ins.

use std::path::{Path, PathBuf};

use pickup_core::{ItemCurves, ItemSpec, PickupConfig};

use crate::builtin;
use crate::loaders::{ConfigLoader, CurveLoader, ItemLoader, LoadResult};

/// Where pickup content comes from.
///
/// Any source left unset falls back to the built-in default. A data directory
/// can fill all three at once:
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── curves.ron
/// └── items.ron
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentFactory {
    config: Option<PathBuf>,
    curves: Option<PathBuf>,
    items: Option<PathBuf>,
}

impl ContentFactory {
    /// A factory serving only built-in content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses whichever of the standard files exist in `data_dir`.
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let existing = |name: &str| {
            let path = data_dir.as_ref().join(name);
            path.is_file().then_some(path)
        };
        Self {
            config: existing("config.toml"),
            curves: existing("curves.ron"),
            items: existing("items.ron"),
        }
    }

    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.config = path;
        }
        self
    }

    pub fn with_curves(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.curves = path;
        }
        self
    }

    pub fn with_items(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.items = path;
        }
        self
    }

    pub fn load_config(&self) -> LoadResult<PickupConfig> {
        match &self.config {
            Some(path) => ConfigLoader::load(path),
            None => Ok(PickupConfig::default()),
        }
    }

    pub fn load_curves(&self) -> LoadResult<ItemCurves> {
        match &self.curves {
            Some(path) => CurveLoader::load(path),
            None => Ok(builtin::default_curves()),
        }
    }

    pub fn load_items(&self) -> LoadResult<Vec<ItemSpec>> {
        match &self.items {
            Some(path) => ItemLoader::load(path).map(|catalog| catalog.items),
            None => Ok(builtin::default_catalog()),
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn curves_path(&self) -> Option<&Path> {
        self.curves.as_deref()
    }

    pub fn items_path(&self) -> Option<&Path> {
        self.items.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickup_core::CurveId;

    #[test]
    fn unset_sources_fall_back_to_builtins() {
        let factory = ContentFactory::new();
        assert_eq!(factory.load_config().unwrap(), PickupConfig::default());
        assert!(factory.load_curves().unwrap().has(CurveId::TransferPulse));
        assert_eq!(factory.load_items().unwrap(), builtin::default_catalog());
    }

    #[test]
    fn data_dir_picks_up_existing_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[item]\nlateral_rate = 12.0\n").unwrap();
        std::fs::write(dir.path().join("items.ron"), r#"(items: [(name: "Stick")])"#).unwrap();

        let factory = ContentFactory::from_data_dir(dir.path());
        assert_eq!(factory.config_path(), Some(dir.path().join("config.toml").as_path()));
        assert!(factory.curves_path().is_none());

        assert_eq!(factory.load_config().unwrap().item.lateral_rate, 12.0);
        let items = factory.load_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Stick");
        assert!(factory.load_curves().unwrap().has(CurveId::VerticalEasing));
    }

    #[test]
    fn shipped_data_dir_loads() {
        let factory =
            ContentFactory::from_data_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"));
        let config = factory.load_config().unwrap();
        assert_eq!(config, PickupConfig::default());
        assert_eq!(factory.load_items().unwrap().len(), 3);
        let curves = factory.load_curves().unwrap();
        for id in [CurveId::VerticalEasing, CurveId::Scale, CurveId::IdlePulse] {
            assert!(curves.has(id));
        }
    }

    #[test]
    fn explicit_paths_override_and_none_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let curves = dir.path().join("custom.ron");
        std::fs::write(&curves, "()").unwrap();

        let factory = ContentFactory::new()
            .with_curves(Some(curves.clone()))
            .with_curves(None);
        assert_eq!(factory.curves_path(), Some(curves.as_path()));
        assert!(!factory.load_curves().unwrap().has(CurveId::Scale));
    }
}
