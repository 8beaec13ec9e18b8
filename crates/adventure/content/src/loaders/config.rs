//! Game configuration loader.

use std::path::Path;

use adventure_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing fields take their defaults, so a partial (or empty) file is
    /// valid configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config: GameConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_a_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "strict_catalog = true\nstart_map = \"corridor\"\n");

        let config = ConfigLoader::load(&path).unwrap();
        assert!(config.strict_catalog);
        assert_eq!(config.start_map, "corridor");
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "strict_catalog = true\n");

        let config = ConfigLoader::load(&path).unwrap();
        assert!(config.strict_catalog);
        assert_eq!(config.start_map, GameConfig::default().start_map);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "strict_catalog = \n");

        assert!(ConfigLoader::load(&path).is_err());
    }
}
