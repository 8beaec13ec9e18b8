//! Authoritative game state representation.
//!
//! This module owns the item arena, the two containers (world and bag), and
//! the player's position. Interaction and combination logic query this state
//! and mutate it exclusively through the `GameState` methods, which keep the
//! container invariant intact: every live item is listed in exactly one
//! container, and its own handle agrees with that list.
pub mod common;
pub mod item;
pub mod player;
pub mod world;

pub use common::Position;
pub use item::{
    AttributeKey, AttributeMap, AttributeValue, ContainerId, ItemId, ItemKind, ItemMessages,
    ItemState,
};
pub use player::PlayerState;
pub use world::WorldState;

use crate::env::{ItemCatalog, ItemProfile, MapBlueprint};
use crate::error::{CoreError, ErrorSeverity};

/// Errors raised by state-level item operations.
///
/// These mark caller bugs or internal desyncs, never ordinary gameplay
/// outcomes (see [`crate::error`]).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// The id does not resolve to a live item.
    #[error("item {id} does not exist")]
    ItemNotFound { id: ItemId },

    /// An item's container handle disagrees with the container lists.
    #[error("item {id} is missing from its recorded container")]
    ContainerDesync { id: ItemId },
}

impl CoreError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ItemNotFound { .. } => ErrorSeverity::Validation,
            Self::ContainerDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound { .. } => "STATE_ITEM_NOT_FOUND",
            Self::ContainerDesync { .. } => "STATE_CONTAINER_DESYNC",
        }
    }
}

/// Canonical snapshot of the running game.
///
/// # Invariants
///
/// - Item ids are allocated monotonically and never reused.
/// - Each live item appears in exactly one container list, the one named by
///   its `container` handle.
/// - The arena holds no entry for consumed items; a stale id simply stops
///   resolving.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Sequential item id allocator (monotonically increasing).
    next_item_id: u32,
    /// All live item instances, in spawn order.
    items: Vec<ItemState>,
    pub player: PlayerState,
    pub world: WorldState,
}

impl GameState {
    /// Creates an empty state: no map loaded, empty bag, player at origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new unique [`ItemId`].
    ///
    /// # Panics
    ///
    /// Panics if all ids are exhausted.
    pub fn allocate_item_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id = self.next_item_id.checked_add(1).expect("ItemId overflow");
        id
    }

    /// Looks up a live item.
    pub fn item(&self, id: ItemId) -> Option<&ItemState> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Looks up a live item for mutation.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut ItemState> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// All live items in spawn order.
    pub fn items(&self) -> &[ItemState] {
        &self.items
    }

    /// The id list of one container, in insertion order.
    pub fn container(&self, container: ContainerId) -> &[ItemId] {
        match container {
            ContainerId::World => &self.world.field,
            ContainerId::Bag => &self.player.bag,
        }
    }

    fn container_mut(&mut self, container: ContainerId) -> &mut Vec<ItemId> {
        match container {
            ContainerId::World => &mut self.world.field,
            ContainerId::Bag => &mut self.player.bag,
        }
    }

    /// Live items currently held by `container`, in insertion order.
    pub fn items_in(&self, container: ContainerId) -> impl Iterator<Item = &ItemState> {
        self.container(container)
            .iter()
            .filter_map(|id| self.item(*id))
    }

    /// Spawns a new item configured by `profile` into `container`.
    ///
    /// This is the only way an instance comes to exist, so an item without an
    /// owning container is unrepresentable.
    pub fn spawn_item(
        &mut self,
        kind: ItemKind,
        profile: &ItemProfile,
        container: ContainerId,
        position: Position,
    ) -> ItemId {
        let id = self.allocate_item_id();
        self.items
            .push(ItemState::from_profile(id, kind, profile, container, position));
        self.container_mut(container).push(id);
        id
    }

    /// Removes an item from its container and the arena, returning its final
    /// state.
    ///
    /// This is how a combination consumes a participant: the id stops
    /// resolving and later lookups treat it as gone.
    pub fn despawn(&mut self, id: ItemId) -> Result<ItemState, StateError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StateError::ItemNotFound { id })?;
        let container = self.items[index].container;
        let list = self.container_mut(container);
        let slot = list
            .iter()
            .position(|entry| *entry == id)
            .ok_or(StateError::ContainerDesync { id })?;
        list.remove(slot);
        Ok(self.items.remove(index))
    }

    /// Moves an item into `target`, atomically with respect to this call:
    /// removed from the old list, appended to the new one, handle updated.
    ///
    /// Moving an item into the container it already occupies re-appends it at
    /// the end (it is first removed, so the invariant holds throughout).
    pub fn move_to_container(&mut self, id: ItemId, target: ContainerId) -> Result<(), StateError> {
        let source = self
            .item(id)
            .map(|item| item.container)
            .ok_or(StateError::ItemNotFound { id })?;
        let list = self.container_mut(source);
        let slot = list
            .iter()
            .position(|entry| *entry == id)
            .ok_or(StateError::ContainerDesync { id })?;
        list.remove(slot);
        self.container_mut(target).push(id);
        if let Some(item) = self.item_mut(id) {
            item.container = target;
        }
        Ok(())
    }

    /// Loads a map blueprint into the running state.
    ///
    /// World items of the previous map are dropped, the graph and exits are
    /// replaced, and fresh instances are spawned from the blueprint's
    /// placements. The bag travels with the player. If the new map has a
    /// spawn waypoint the player is placed there; otherwise the position is
    /// left untouched.
    pub fn enter_map(&mut self, blueprint: &MapBlueprint, catalog: &ItemCatalog) {
        let leaving: Vec<ItemId> = std::mem::take(&mut self.world.field);
        self.items.retain(|item| !leaving.contains(&item.id));

        self.world.map_name = blueprint.name.clone();
        self.world.background = blueprint.background.clone();
        self.world.graph = blueprint.graph.clone();
        self.world.exits = blueprint.exits.clone();

        for placement in &blueprint.items {
            self.spawn_item(
                placement.kind,
                catalog.profile(placement.kind),
                ContainerId::World,
                placement.position,
            );
        }

        if let Some(spawn) = blueprint.graph.spawn_waypoint() {
            self.player.position = spawn.position;
        }
    }
}
