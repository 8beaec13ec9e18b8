//! Item catalog loader.
//!
//! `items.ron` maps item-kind keys to profile entries. Entries are free-form
//! key/value pairs validated against [`ProfileKey`]; what happens to entries
//! the game does not understand depends on the strictness mode. Lenient mode
//! warns and keeps going so hand-edited data stays loadable; strict mode
//! fails the load, which is what content CI wants.

use std::collections::BTreeMap;
use std::path::Path;

use adventure_core::{ItemCatalog, ItemKind, ItemProfile, ProfileKey, ProfileValue};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
///
/// Values stay raw [`ron::Value`]s at this stage; shape checking happens
/// against the profile key, not the file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogData {
    items: BTreeMap<String, BTreeMap<String, ron::Value>>,
}

/// Loader for the item catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load an item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing the catalog
    /// * `strict` - Fail on unknown kinds/keys instead of skipping them
    pub fn load(path: &Path, strict: bool) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        let data: CatalogData = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let catalog = assemble(data, strict)
            .map_err(|e| anyhow::anyhow!("Invalid item catalog {}: {}", path.display(), e))?;
        tracing::info!(
            "item catalog loaded from {} ({} profiles)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }
}

fn assemble(data: CatalogData, strict: bool) -> LoadResult<ItemCatalog> {
    let mut catalog = ItemCatalog::new();

    for (kind_key, entries) in data.items {
        let Ok(kind) = kind_key.parse::<ItemKind>() else {
            if strict {
                anyhow::bail!("unknown item kind '{}'", kind_key);
            }
            tracing::warn!("skipping unknown item kind '{}'", kind_key);
            continue;
        };

        let mut profile = ItemProfile::default();
        for (entry_key, raw) in entries {
            let Ok(key) = entry_key.parse::<ProfileKey>() else {
                if strict {
                    anyhow::bail!("item '{}': unknown profile key '{}'", kind_key, entry_key);
                }
                tracing::warn!("item '{}': skipping unknown profile key '{}'", kind_key, entry_key);
                continue;
            };

            let value = match profile_value(raw) {
                Ok(value) => value,
                Err(e) => {
                    if strict {
                        anyhow::bail!("item '{}', key '{}': {}", kind_key, entry_key, e);
                    }
                    tracing::warn!("item '{}', key '{}': {}; skipping", kind_key, entry_key, e);
                    continue;
                }
            };

            if let Err(e) = profile.set(key, value) {
                if strict {
                    anyhow::bail!("item '{}': {}", kind_key, e);
                }
                tracing::warn!("item '{}': {}; keeping the default", kind_key, e);
            }
        }
        catalog.insert(kind, profile);
    }

    Ok(catalog)
}

/// Narrows a raw RON value to the shapes profiles accept.
fn profile_value(raw: ron::Value) -> LoadResult<ProfileValue> {
    match raw {
        ron::Value::Bool(flag) => Ok(ProfileValue::Flag(flag)),
        ron::Value::String(text) => Ok(ProfileValue::Text(text)),
        ron::Value::Seq(entries) => {
            let mut kinds = Vec::with_capacity(entries.len());
            for entry in entries {
                let ron::Value::String(name) = entry else {
                    anyhow::bail!("split lists may only contain item-kind strings");
                };
                let kind = name
                    .parse::<ItemKind>()
                    .map_err(|_| anyhow::anyhow!("unknown item kind '{}' in split list", name))?;
                kinds.push(kind);
            }
            Ok(ProfileValue::Kinds(kinds))
        }
        other => anyhow::bail!("unsupported value {:?}", other),
    }
}
