//! Runtime configuration knobs.
//!
//! Loaded from `config.toml` by the content crate; defaults apply when the
//! file or a field is absent.

pub const DEFAULT_STRICT_CATALOG: bool = false;
pub const DEFAULT_START_MAP: &str = "office";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Reject unknown item kinds and profile keys in the catalog instead of
    /// skipping them with a warning.
    pub strict_catalog: bool,
    /// Name of the map the player starts on.
    pub start_map: String,
}

impl GameConfig {
    pub fn new(strict_catalog: bool, start_map: impl Into<String>) -> Self {
        Self {
            strict_catalog,
            start_map: start_map.into(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            strict_catalog: DEFAULT_STRICT_CATALOG,
            start_map: DEFAULT_START_MAP.to_owned(),
        }
    }
}
