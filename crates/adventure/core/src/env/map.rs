//! Map blueprints assembled from parsed object-group data.
//!
//! The core does not read map files. It consumes the already-parsed shape a
//! tile-map editor produces (named object groups whose objects carry a name,
//! a pixel position, and string properties) and assembles the typed
//! [`MapBlueprint`] the game runs on. File parsing lives in the content
//! crate.
//!
//! Recognized groups:
//! - `"waypoints"`: navigation nodes; `spawn` marks the player start,
//!   `connect` lists comma-separated neighbor names.
//! - `"items"`: placed items; the object name is the item-type key.
//! - `"exits"`: hotspots leading to other maps; `destination` names the
//!   target map.
//!
//! Groups with other names are ignored so maps can carry presentation-only
//! layers the core has no business interpreting.

use std::collections::BTreeMap;

use crate::error::{CoreError, ErrorSeverity};
use crate::nav::{GraphError, WaypointGraph, WaypointSpec};
use crate::state::{ItemKind, Position};

pub const GROUP_WAYPOINTS: &str = "waypoints";
pub const GROUP_ITEMS: &str = "items";
pub const GROUP_EXITS: &str = "exits";

const PROP_SPAWN: &str = "spawn";
const PROP_CONNECT: &str = "connect";
const PROP_DESTINATION: &str = "destination";

/// One object inside an object group: a named point with string properties.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapObject {
    pub name: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: BTreeMap<String, String>,
}

/// A named layer of map objects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectGroup {
    pub name: String,
    pub objects: Vec<MapObject>,
}

/// An item placed in the world by the map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPlacement {
    pub kind: ItemKind,
    pub position: Position,
}

/// A named hotspot leading to another map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exit {
    pub name: String,
    pub position: Position,
    /// Name of the destination map.
    pub destination: String,
}

/// Errors assembling a blueprint from object-group data.
///
/// All of these make the map unusable, so they surface at load time rather
/// than as latent panics during play.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapDataError {
    /// An item object's name is not a known item-type key.
    #[error("map object '{name}' is not a known item kind")]
    UnknownItemKind { name: String },

    /// An object lacks a property its group requires.
    #[error("map object '{object}' is missing the '{property}' property")]
    MissingProperty {
        object: String,
        property: &'static str,
    },

    /// A property value failed to parse.
    #[error("map object '{object}': property '{property}' has unusable value '{value}'")]
    BadProperty {
        object: String,
        property: &'static str,
        value: String,
    },

    /// The declared waypoints do not form a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl CoreError for MapDataError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownItemKind { .. } => "MAP_UNKNOWN_ITEM_KIND",
            Self::MissingProperty { .. } => "MAP_MISSING_PROPERTY",
            Self::BadProperty { .. } => "MAP_BAD_PROPERTY",
            Self::Graph(_) => "MAP_GRAPH_INVALID",
        }
    }
}

/// Everything one map contributes, validated and ready to enter.
///
/// Built once per map at load time; [`GameState::enter_map`](crate::state::GameState::enter_map)
/// instantiates it into running state as often as the player walks in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBlueprint {
    pub name: String,
    /// Background asset key handed to the presentation layer.
    pub background: String,
    pub graph: WaypointGraph,
    pub items: Vec<ItemPlacement>,
    pub exits: Vec<Exit>,
}

impl MapBlueprint {
    /// Assembles a blueprint from parsed object groups.
    ///
    /// # Errors
    ///
    /// Fails on unknown item kinds, missing or malformed properties, and any
    /// graph defect (duplicate waypoint names, dangling neighbor references,
    /// more than one spawn marker).
    pub fn from_object_groups(
        name: impl Into<String>,
        background: impl Into<String>,
        groups: &[ObjectGroup],
    ) -> Result<Self, MapDataError> {
        let mut specs: Vec<WaypointSpec> = Vec::new();
        let mut items: Vec<ItemPlacement> = Vec::new();
        let mut exits: Vec<Exit> = Vec::new();

        for group in groups {
            match group.name.as_str() {
                GROUP_WAYPOINTS => {
                    for object in &group.objects {
                        specs.push(waypoint_spec(object)?);
                    }
                }
                GROUP_ITEMS => {
                    for object in &group.objects {
                        items.push(item_placement(object)?);
                    }
                }
                GROUP_EXITS => {
                    for object in &group.objects {
                        exits.push(exit(object)?);
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            name: name.into(),
            background: background.into(),
            graph: WaypointGraph::build(specs)?,
            items,
            exits,
        })
    }
}

fn waypoint_spec(object: &MapObject) -> Result<WaypointSpec, MapDataError> {
    let spawn = match object.properties.get(PROP_SPAWN).map(String::as_str) {
        None => false,
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            return Err(MapDataError::BadProperty {
                object: object.name.clone(),
                property: PROP_SPAWN,
                value: other.to_owned(),
            });
        }
    };

    let connects = object
        .properties
        .get(PROP_CONNECT)
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    Ok(WaypointSpec {
        name: object.name.clone(),
        position: object.position,
        spawn,
        connects,
    })
}

fn item_placement(object: &MapObject) -> Result<ItemPlacement, MapDataError> {
    let kind: ItemKind = object
        .name
        .parse()
        .map_err(|_| MapDataError::UnknownItemKind {
            name: object.name.clone(),
        })?;
    Ok(ItemPlacement {
        kind,
        position: object.position,
    })
}

fn exit(object: &MapObject) -> Result<Exit, MapDataError> {
    let destination = object
        .properties
        .get(PROP_DESTINATION)
        .ok_or_else(|| MapDataError::MissingProperty {
            object: object.name.clone(),
            property: PROP_DESTINATION,
        })?;
    Ok(Exit {
        name: object.name.clone(),
        position: object.position,
        destination: destination.clone(),
    })
}
