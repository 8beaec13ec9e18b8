//! Navigation: waypoint graphs and routing between them.

pub mod graph;
pub mod route;

pub use graph::{GraphError, Waypoint, WaypointGraph, WaypointId, WaypointSpec};
pub use route::{find_route, route_between, Route, RouteError};
