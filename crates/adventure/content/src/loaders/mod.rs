//! Content loaders for reading game data from files.
//!
//! Loaders convert RON/TOML files into `adventure-core` values. Lenient mode
//! (the default) logs and skips unusable catalog entries; strict mode turns
//! them into load failures.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod map;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::MapLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
