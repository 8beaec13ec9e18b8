//! Waypoint graph: the walkable skeleton of a map.
//!
//! Waypoints are named points connected by directed edges. Maps declare them
//! in object groups; [`WaypointGraph::build`] resolves the declarations into
//! an arena indexed by [`WaypointId`], which the rest of the crate uses
//! instead of names.
//!
//! # Invariants
//!
//! - Ids are dense indices into the arena, assigned in declaration order.
//! - Waypoint names are unique within a graph.
//! - Every neighbor id refers to a waypoint in the same graph.
//! - At most one waypoint carries the spawn marker.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoreError, ErrorSeverity};
use crate::state::Position;

/// Identifier of a waypoint within one graph.
///
/// Plain index newtype; ids from different graphs must not be mixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointId(pub u32);

impl WaypointId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved navigation node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub name: String,
    pub position: Position,
    /// Whether the player starts here when entering the map.
    pub is_spawn: bool,
    /// Outgoing edges, in declaration order.
    pub neighbors: Vec<WaypointId>,
}

/// One waypoint as declared by map data, neighbors still by name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointSpec {
    pub name: String,
    pub position: Position,
    pub spawn: bool,
    pub connects: Vec<String>,
}

/// Defects in declared waypoint data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two waypoints share a name, so edges would be ambiguous.
    #[error("duplicate waypoint name '{name}'")]
    DuplicateName { name: String },

    /// A connect list names a waypoint that does not exist.
    #[error("waypoint '{of}' connects to unknown waypoint '{name}'")]
    UnknownNeighbor { of: String, name: String },

    /// More than one waypoint claims to be the spawn point.
    #[error("both '{first}' and '{second}' are marked as spawn")]
    MultipleSpawns { first: String, second: String },
}

impl CoreError for GraphError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } => "GRAPH_DUPLICATE_WAYPOINT",
            Self::UnknownNeighbor { .. } => "GRAPH_UNKNOWN_NEIGHBOR",
            Self::MultipleSpawns { .. } => "GRAPH_MULTIPLE_SPAWNS",
        }
    }
}

/// All waypoints of one map, with name lookup and an optional spawn marker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointGraph {
    nodes: Vec<Waypoint>,
    index: BTreeMap<String, WaypointId>,
    spawn: Option<WaypointId>,
}

impl WaypointGraph {
    /// Resolves declared waypoints into a graph.
    ///
    /// Edges are directed exactly as declared; a two-way link needs a
    /// `connect` entry on both ends. Repeated mentions of the same neighbor
    /// collapse into one edge.
    ///
    /// # Errors
    ///
    /// Rejects duplicate names, references to undeclared neighbors, and more
    /// than one spawn marker.
    pub fn build(specs: Vec<WaypointSpec>) -> Result<Self, GraphError> {
        let mut index: BTreeMap<String, WaypointId> = BTreeMap::new();
        let mut spawn: Option<WaypointId> = None;

        for (slot, spec) in specs.iter().enumerate() {
            let id = WaypointId(slot as u32);
            if index.insert(spec.name.clone(), id).is_some() {
                return Err(GraphError::DuplicateName {
                    name: spec.name.clone(),
                });
            }
            if spec.spawn {
                if let Some(first) = spawn {
                    return Err(GraphError::MultipleSpawns {
                        first: specs[first.index()].name.clone(),
                        second: spec.name.clone(),
                    });
                }
                spawn = Some(id);
            }
        }

        let mut nodes = Vec::with_capacity(specs.len());
        for spec in &specs {
            let mut neighbors: Vec<WaypointId> = Vec::with_capacity(spec.connects.len());
            for neighbor in &spec.connects {
                let id = *index
                    .get(neighbor)
                    .ok_or_else(|| GraphError::UnknownNeighbor {
                        of: spec.name.clone(),
                        name: neighbor.clone(),
                    })?;
                if !neighbors.contains(&id) {
                    neighbors.push(id);
                }
            }
            nodes.push(Waypoint {
                name: spec.name.clone(),
                position: spec.position,
                is_spawn: spec.spawn,
                neighbors,
            });
        }

        Ok(Self {
            nodes,
            index,
            spawn,
        })
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.nodes.get(id.index())
    }

    pub fn id_by_name(&self, name: &str) -> Option<WaypointId> {
        self.index.get(name).copied()
    }

    /// Outgoing edges of `id`, empty for ids outside this graph.
    pub fn neighbors(&self, id: WaypointId) -> &[WaypointId] {
        self.nodes
            .get(id.index())
            .map(|node| node.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// The waypoint closest to `position` by truncated Euclidean distance.
    ///
    /// Ties go to the earliest-declared waypoint. `None` only on an empty
    /// graph.
    pub fn nearest(&self, position: Position) -> Option<WaypointId> {
        let mut best: Option<(WaypointId, u32)> = None;
        for (slot, node) in self.nodes.iter().enumerate() {
            let distance = node.position.distance(position);
            if best.is_none_or(|(_, shortest)| distance < shortest) {
                best = Some((WaypointId(slot as u32), distance));
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn spawn(&self) -> Option<WaypointId> {
        self.spawn
    }

    pub fn spawn_waypoint(&self) -> Option<&Waypoint> {
        self.spawn.and_then(|id| self.waypoint(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WaypointId, &Waypoint)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (WaypointId(slot as u32), node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, x: i32, y: i32, spawn: bool, connects: &[&str]) -> WaypointSpec {
        WaypointSpec {
            name: name.to_owned(),
            position: Position::new(x, y),
            spawn,
            connects: connects.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn ids_follow_declaration_order() {
        let graph = WaypointGraph::build(vec![
            spec("entry", 0, 0, true, &["desk"]),
            spec("desk", 100, 0, false, &["entry"]),
        ])
        .unwrap();

        assert_eq!(graph.id_by_name("entry"), Some(WaypointId(0)));
        assert_eq!(graph.id_by_name("desk"), Some(WaypointId(1)));
        assert_eq!(graph.waypoint(WaypointId(0)).unwrap().name, "entry");
        assert_eq!(graph.spawn(), Some(WaypointId(0)));
        assert!(graph.spawn_waypoint().unwrap().is_spawn);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = WaypointGraph::build(vec![
            spec("desk", 0, 0, false, &[]),
            spec("desk", 50, 0, false, &[]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateName {
                name: "desk".to_owned()
            }
        );
    }

    #[test]
    fn unknown_neighbors_are_rejected() {
        let err = WaypointGraph::build(vec![spec("entry", 0, 0, false, &["void"])]).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownNeighbor {
                of: "entry".to_owned(),
                name: "void".to_owned()
            }
        );
        assert_eq!(err.error_code(), "GRAPH_UNKNOWN_NEIGHBOR");
    }

    #[test]
    fn second_spawn_marker_is_rejected() {
        let err = WaypointGraph::build(vec![
            spec("a", 0, 0, true, &[]),
            spec("b", 10, 0, true, &[]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::MultipleSpawns {
                first: "a".to_owned(),
                second: "b".to_owned()
            }
        );
    }

    #[test]
    fn edges_are_directed_and_deduplicated() {
        let graph = WaypointGraph::build(vec![
            spec("a", 0, 0, false, &["b", "b"]),
            spec("b", 10, 0, false, &[]),
        ])
        .unwrap();

        let a = graph.id_by_name("a").unwrap();
        let b = graph.id_by_name("b").unwrap();
        assert_eq!(graph.neighbors(a), &[b]);
        assert!(graph.neighbors(b).is_empty());
    }

    #[test]
    fn nearest_breaks_ties_by_declaration_order() {
        let graph = WaypointGraph::build(vec![
            spec("west", -10, 0, false, &[]),
            spec("east", 10, 0, false, &[]),
        ])
        .unwrap();

        // Equidistant from the origin; the first declaration wins.
        assert_eq!(graph.nearest(Position::ORIGIN), graph.id_by_name("west"));
        assert_eq!(graph.nearest(Position::new(9, 0)), graph.id_by_name("east"));
    }

    #[test]
    fn empty_graph_has_no_nearest() {
        let graph = WaypointGraph::default();
        assert!(graph.nearest(Position::ORIGIN).is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn neighbors_of_foreign_id_are_empty() {
        let graph = WaypointGraph::build(vec![spec("only", 0, 0, false, &[])]).unwrap();
        assert!(graph.neighbors(WaypointId(99)).is_empty());
    }
}
