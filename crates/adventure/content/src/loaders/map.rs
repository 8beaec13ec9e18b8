//! Map loader.
//!
//! Map RON files carry the object groups a tile-map editor exports: named
//! layers of point objects with string properties. The loader lifts them into
//! core object groups and lets [`MapBlueprint::from_object_groups`] do the
//! validation, so a map that loads here is a map the game can enter.

use std::collections::BTreeMap;
use std::path::Path;

use adventure_core::{MapBlueprint, MapObject, ObjectGroup, Position};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapData {
    name: String,
    background: String,
    groups: Vec<GroupData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GroupData {
    name: String,
    objects: Vec<ObjectData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectData {
    name: String,
    x: i32,
    y: i32,
    #[serde(default)]
    properties: BTreeMap<String, String>,
}

/// Loader for maps from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map blueprint from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing the map
    pub fn load(path: &Path) -> LoadResult<MapBlueprint> {
        let content = read_file(path)?;
        let data: MapData =
            ron::from_str(&content).map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let groups: Vec<ObjectGroup> = data
            .groups
            .into_iter()
            .map(|group| ObjectGroup {
                name: group.name,
                objects: group
                    .objects
                    .into_iter()
                    .map(|object| MapObject {
                        name: object.name,
                        position: Position::new(object.x, object.y),
                        properties: object.properties,
                    })
                    .collect(),
            })
            .collect();

        let blueprint = MapBlueprint::from_object_groups(data.name, data.background, &groups)
            .map_err(|e| anyhow::anyhow!("Invalid map {}: {}", path.display(), e))?;

        if blueprint.graph.spawn().is_none() {
            tracing::warn!(
                "map '{}' has no spawn waypoint; entering it keeps the player position",
                blueprint.name
            );
        }
        tracing::info!(
            "map '{}' loaded ({} waypoints, {} items, {} exits)",
            blueprint.name,
            blueprint.graph.len(),
            blueprint.items.len(),
            blueprint.exits.len()
        );
        Ok(blueprint)
    }
}
