//! World-level state for the currently loaded map.

use crate::env::Exit;
use crate::nav::WaypointGraph;
use crate::state::{ItemId, Position};

/// Everything the current map contributes to the running game.
///
/// Replaced wholesale by [`GameState::enter_map`](crate::state::GameState::enter_map);
/// the bag is the only state that survives a map change.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// Name of the loaded map, empty before the first `enter_map`.
    pub map_name: String,
    /// Background asset key, handed through to the presentation layer.
    pub background: String,
    /// The world container: ids of items placed in the map, in declaration
    /// order. Counterpart of the player's bag.
    pub field: Vec<ItemId>,
    /// Navigable topology of the map.
    pub graph: WaypointGraph,
    /// Named exit points leading to other maps.
    pub exits: Vec<Exit>,
}

impl WorldState {
    /// True if the world container currently holds `id`.
    pub fn holds(&self, id: ItemId) -> bool {
        self.field.contains(&id)
    }

    /// Returns the exit sitting exactly at `position`, if any.
    ///
    /// Exit hotspots are authored as points; the scene controller decides how
    /// generously clicks snap to them.
    pub fn exit_at(&self, position: Position) -> Option<&Exit> {
        self.exits.iter().find(|exit| exit.position == position)
    }
}
