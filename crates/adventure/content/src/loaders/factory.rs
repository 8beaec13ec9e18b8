//! Content factory for building game data from a data directory.

use std::path::{Path, PathBuf};

use adventure_core::{GameConfig, ItemCatalog, MapBlueprint};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, MapLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── maps/
///     ├── office.ron
///     └── corridor.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the item catalog from `items.ron`.
    ///
    /// # Arguments
    ///
    /// * `strict` - Fail on unknown kinds/keys instead of skipping them
    pub fn load_catalog(&self, strict: bool) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        CatalogLoader::load(&path, strict)
    }

    /// Load a map from `maps/{map_name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `map_name` - Name of the map file (without `.ron` extension)
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapBlueprint> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Load everything a fresh game needs: the configuration, the catalog in
    /// the configured strictness, and the starting map.
    pub fn load_start(&self) -> LoadResult<(GameConfig, ItemCatalog, MapBlueprint)> {
        let config = self.load_config()?;
        let catalog = self.load_catalog(config.strict_catalog)?;
        let blueprint = self.load_map(&config.start_map)?;
        Ok((config, catalog, blueprint))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
