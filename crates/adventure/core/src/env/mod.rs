//! Environment definitions: what items are like and what maps contain.
//!
//! Everything here is load-time description, not running state. The content
//! crate produces these values from data files; [`crate::state`] instantiates
//! them.

pub mod catalog;
pub mod map;

pub use catalog::{ItemCatalog, ItemProfile, ProfileError, ProfileKey, ProfileValue};
pub use map::{
    Exit, ItemPlacement, MapBlueprint, MapDataError, MapObject, ObjectGroup, GROUP_EXITS,
    GROUP_ITEMS, GROUP_WAYPOINTS,
};
