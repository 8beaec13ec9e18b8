//! Greedy best-first routing over a waypoint graph.
//!
//! The search always expands the open waypoint whose straight-line distance
//! to the destination is smallest. There is no cost-so-far term and no
//! retraction: once a waypoint is expanded it stays in the route, so the
//! returned sequence lists every expanded waypoint in expansion order, dead
//! ends included. For hand-laid adventure maps with a handful of waypoints
//! per room this is deliberate; the wandering it can produce reads as the
//! character searching for the way.
//!
//! # Invariants
//!
//! - A returned route is never empty; its last node is the destination.
//! - No waypoint appears twice in a route.
//! - Routing from a waypoint to itself yields a single-node route.
//! - An unreachable destination is reported as [`RouteError::NoRoute`], never
//!   as an empty or partial route.

use std::fmt;

use crate::error::{CoreError, ErrorSeverity};
use crate::state::Position;

use super::graph::{WaypointGraph, WaypointId};

/// A walkable sequence of waypoints ending at the requested destination.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    nodes: Vec<WaypointId>,
}

impl Route {
    pub fn nodes(&self) -> &[WaypointId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<WaypointId> {
        self.nodes
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in &self.nodes {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{node}")?;
            first = false;
        }
        Ok(())
    }
}

/// Why no route could be produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The graph has no waypoints to route over.
    #[error("cannot route on an empty waypoint graph")]
    EmptyGraph,

    /// An endpoint id does not belong to this graph.
    #[error("waypoint {id} does not exist in this graph")]
    UnknownWaypoint { id: WaypointId },

    /// The search exhausted every reachable waypoint without touching the
    /// destination. Expected on maps with one-way or missing links.
    #[error("no route from waypoint {from} to waypoint {to}")]
    NoRoute { from: WaypointId, to: WaypointId },
}

impl CoreError for RouteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyGraph | Self::UnknownWaypoint { .. } => ErrorSeverity::Validation,
            Self::NoRoute { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyGraph => "ROUTE_EMPTY_GRAPH",
            Self::UnknownWaypoint { .. } => "ROUTE_UNKNOWN_WAYPOINT",
            Self::NoRoute { .. } => "ROUTE_NO_ROUTE",
        }
    }
}

/// Finds a route between two waypoints of `graph`.
///
/// Selection among open waypoints is by strictly smaller distance to the
/// destination, so the earliest-inserted waypoint wins ties. The destination
/// has distance zero and is therefore taken as soon as it enters the open
/// list.
///
/// # Errors
///
/// [`RouteError::UnknownWaypoint`] if an endpoint is not in the graph,
/// [`RouteError::NoRoute`] if the destination cannot be reached.
pub fn find_route(
    graph: &WaypointGraph,
    from: WaypointId,
    to: WaypointId,
) -> Result<Route, RouteError> {
    let goal = graph
        .waypoint(to)
        .ok_or(RouteError::UnknownWaypoint { id: to })?
        .position;
    if graph.waypoint(from).is_none() {
        return Err(RouteError::UnknownWaypoint { id: from });
    }

    if from == to {
        return Ok(Route { nodes: vec![to] });
    }

    let estimate = |id: WaypointId| -> u32 {
        // Endpoints are validated and neighbors come from the same graph.
        graph
            .waypoint(id)
            .map(|node| node.position.distance(goal))
            .unwrap_or(u32::MAX)
    };

    let mut open: Vec<(WaypointId, u32)> = vec![(from, estimate(from))];
    let mut closed = vec![false; graph.len()];
    let mut nodes: Vec<WaypointId> = Vec::new();

    loop {
        if open.is_empty() {
            return Err(RouteError::NoRoute { from, to });
        }

        let mut best = 0;
        for (slot, entry) in open.iter().enumerate().skip(1) {
            if entry.1 < open[best].1 {
                best = slot;
            }
        }
        let current = open[best].0;

        if current == to {
            nodes.push(to);
            return Ok(Route { nodes });
        }

        nodes.push(current);
        for &neighbor in graph.neighbors(current) {
            if closed[neighbor.index()] || open.iter().any(|(id, _)| *id == neighbor) {
                continue;
            }
            open.push((neighbor, estimate(neighbor)));
        }

        // remove() keeps the rest of the open list in insertion order, which
        // the tie-break above relies on.
        open.remove(best);
        closed[current.index()] = true;
    }
}

/// Routes between two world positions via their nearest waypoints.
///
/// # Errors
///
/// [`RouteError::EmptyGraph`] when the graph has no waypoints; otherwise as
/// [`find_route`].
pub fn route_between(
    graph: &WaypointGraph,
    from: Position,
    to: Position,
) -> Result<Route, RouteError> {
    let start = graph.nearest(from).ok_or(RouteError::EmptyGraph)?;
    let goal = graph.nearest(to).ok_or(RouteError::EmptyGraph)?;
    find_route(graph, start, goal)
}
