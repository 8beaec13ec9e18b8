//! Player-owned state: the bag and the actor's screen position.

use crate::state::{ItemId, Position};

/// The player character's mutable state.
///
/// # Invariants
///
/// - `bag` holds ids in pick-up order; insertion order is display order.
/// - Every id in `bag` resolves to an item whose container handle is
///   [`ContainerId::Bag`](crate::state::ContainerId::Bag). Mutate through
///   `GameState` operations to keep the two in sync.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub bag: Vec<ItemId>,
    pub position: Position,
}

impl PlayerState {
    pub fn new(position: Position) -> Self {
        Self {
            bag: Vec::new(),
            position,
        }
    }

    /// True if the bag currently holds `id`.
    pub fn carries(&self, id: ItemId) -> bool {
        self.bag.contains(&id)
    }

    /// Number of items in the bag.
    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }
}
