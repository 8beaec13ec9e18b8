//! Deterministic point-and-click adventure logic, free of I/O and rendering.
//!
//! `adventure-core` owns the rules of the world: items and the containers
//! that hold them, the waypoint graphs the player walks, greedy best-first
//! routing over those graphs, and the directional combination rules that
//! drive the puzzles. Content loading lives in `adventure-content`; drawing,
//! input, and animation belong to whatever presentation layer consumes these
//! types.
//!
//! All mutation flows through [`state::GameState`] and the verb functions in
//! [`interact`], so a scene controller holds exactly one mutable handle to
//! the game.
pub mod config;
pub mod env;
pub mod error;
pub mod interact;
pub mod nav;
pub mod state;

pub use config::GameConfig;
pub use env::{
    Exit, ItemCatalog, ItemPlacement, ItemProfile, MapBlueprint, MapDataError, MapObject,
    ObjectGroup, ProfileError, ProfileKey, ProfileValue,
};
pub use error::{CoreError, ErrorSeverity};
pub use interact::{
    add_item, combine, is_combination_possible, look_at, trigger_item_combination, use_item,
    CombinationCheck, CombineOutcome, InteractError,
};
pub use nav::{
    find_route, route_between, GraphError, Route, RouteError, Waypoint, WaypointGraph, WaypointId,
    WaypointSpec,
};
pub use state::{
    AttributeKey, AttributeMap, AttributeValue, ContainerId, GameState, ItemId, ItemKind,
    ItemMessages, ItemState, PlayerState, Position, StateError, WorldState,
};
