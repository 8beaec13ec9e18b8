//! Player-facing interaction verbs.
//!
//! These are the operations a scene controller wires to the context menu:
//! picking an item up, looking at it, using it, and combining two items. They
//! orchestrate [`crate::state::GameState`] mutations; the combination rule
//! table itself lives in [`combine`].
//!
//! Expected negatives (not obtainable, rule not applicable) come back as
//! values and flavor text. Errors here mean the caller passed ids that make
//! no sense, which is a bug upstream, not a game event.

pub mod combine;

pub use combine::{combine, is_combination_possible, CombinationCheck, CombineOutcome};

use crate::env::ItemCatalog;
use crate::error::{CoreError, ErrorSeverity};
use crate::state::{ContainerId, GameState, ItemId, StateError};

/// Caller mistakes in interaction requests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InteractError {
    #[error(transparent)]
    State(#[from] StateError),

    /// Both sides of a combination were the same instance.
    #[error("item {id} cannot be combined with itself")]
    SelfCombination { id: ItemId },

    /// Pickup was requested for an item that is not in the world container.
    #[error("item {id} is not out in the world")]
    NotInWorld { id: ItemId },
}

impl CoreError for InteractError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::State(inner) => inner.severity(),
            Self::SelfCombination { .. } | Self::NotInWorld { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::State(inner) => inner.error_code(),
            Self::SelfCombination { .. } => "INTERACT_SELF_COMBINATION",
            Self::NotInWorld { .. } => "INTERACT_NOT_IN_WORLD",
        }
    }
}

/// Tries to move a world item into the bag.
///
/// Returns `false` without touching state when the item is not obtainable;
/// that is the everyday case for scenery and the caller shows the item's
/// add-denied line. An item whose profile declares split products is consumed
/// and one instance per product lands in the bag instead.
///
/// # Errors
///
/// The id must resolve and the item must currently be in the world container.
pub fn add_item(
    state: &mut GameState,
    catalog: &ItemCatalog,
    id: ItemId,
) -> Result<bool, InteractError> {
    let item = state.item(id).ok_or(StateError::ItemNotFound { id })?;
    if item.container != ContainerId::World {
        return Err(InteractError::NotInWorld { id });
    }
    if !item.obtainable {
        return Ok(false);
    }

    let kind = item.kind;
    let position = item.position;
    let products = catalog.profile(kind).split_into.clone();
    if products.is_empty() {
        state.move_to_container(id, ContainerId::Bag)?;
    } else {
        state.despawn(id)?;
        for product in products {
            state.spawn_item(product, catalog.profile(product), ContainerId::Bag, position);
        }
    }
    Ok(true)
}

/// Examines an item, marking it as looked at.
///
/// Bag items get their richer inspect line, world items their look-at line.
/// Several combination rules gate on the looked-at flag, so this is where
/// puzzle progress often starts.
///
/// # Errors
///
/// The id must resolve.
pub fn look_at(state: &mut GameState, id: ItemId) -> Result<String, InteractError> {
    let item = state.item_mut(id).ok_or(StateError::ItemNotFound { id })?;
    let text = if item.container == ContainerId::Bag {
        item.looked_at = true;
        item.inspect_message().to_owned()
    } else {
        item.look_at_message().to_owned()
    };
    Ok(text)
}

/// Returns the line for using an item: its use text when usable, its denial
/// text otherwise. Never a failure; unusable is an ordinary answer.
///
/// # Errors
///
/// The id must resolve.
pub fn use_item(state: &GameState, id: ItemId) -> Result<&str, InteractError> {
    let item = state.item(id).ok_or(StateError::ItemNotFound { id })?;
    Ok(item.use_message())
}

/// Runs a combination in both directions, first-to-second then
/// second-to-first, unconditionally and in that order.
///
/// Most pairs have a rule in at most one direction, so one leg is usually
/// [`CombineOutcome::NoRule`]. The first leg may consume a participant; the
/// second leg then reports [`CombineOutcome::Rejected`] instead of failing.
///
/// # Errors
///
/// Both ids must resolve at entry and must differ.
pub fn trigger_item_combination(
    state: &mut GameState,
    catalog: &ItemCatalog,
    first: ItemId,
    second: ItemId,
) -> Result<(CombineOutcome, CombineOutcome), InteractError> {
    if first == second {
        return Err(InteractError::SelfCombination { id: first });
    }
    if state.item(first).is_none() {
        return Err(StateError::ItemNotFound { id: first }.into());
    }
    if state.item(second).is_none() {
        return Err(StateError::ItemNotFound { id: second }.into());
    }

    let forward = combine(state, catalog, first, second)?;
    let backward = combine(state, catalog, second, first)?;
    Ok((forward, backward))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ItemProfile;
    use crate::state::{AttributeKey, ItemKind, ItemMessages, Position};

    fn catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        catalog.insert(
            ItemKind::Letter,
            ItemProfile {
                obtainable: true,
                ..ItemProfile::default()
            },
        );
        catalog.insert(
            ItemKind::Paperclip,
            ItemProfile {
                obtainable: true,
                ..ItemProfile::default()
            },
        );
        catalog.insert(
            ItemKind::ClippedLetter,
            ItemProfile {
                obtainable: true,
                split_into: vec![ItemKind::Letter, ItemKind::Paperclip],
                ..ItemProfile::default()
            },
        );
        catalog.insert(
            ItemKind::Telephone,
            ItemProfile {
                messages: ItemMessages {
                    look_at: "An old rotary phone.".to_owned(),
                    inspect: "The dial plate is worn smooth.".to_owned(),
                    ..ItemMessages::default()
                },
                ..ItemProfile::default()
            },
        );
        catalog
    }

    fn spawn(state: &mut GameState, catalog: &ItemCatalog, kind: ItemKind) -> ItemId {
        state.spawn_item(kind, catalog.profile(kind), ContainerId::World, Position::ORIGIN)
    }

    #[test]
    fn pickup_moves_the_item_into_the_bag_exactly_once() {
        let catalog = catalog();
        let mut state = GameState::new();
        let letter = spawn(&mut state, &catalog, ItemKind::Letter);

        assert!(add_item(&mut state, &catalog, letter).unwrap());
        assert!(state.player.carries(letter));
        assert!(!state.world.holds(letter));

        // Now in the bag, a second pickup is a caller bug.
        let err = add_item(&mut state, &catalog, letter).unwrap_err();
        assert!(matches!(err, InteractError::NotInWorld { .. }));
    }

    #[test]
    fn scenery_stays_put() {
        let catalog = catalog();
        let mut state = GameState::new();
        let phone = spawn(&mut state, &catalog, ItemKind::Telephone);

        assert!(!add_item(&mut state, &catalog, phone).unwrap());
        assert!(state.world.holds(phone));
        assert_eq!(state.player.bag_len(), 0);
    }

    #[test]
    fn clipped_letter_splits_on_pickup() {
        let catalog = catalog();
        let mut state = GameState::new();
        let clipped = spawn(&mut state, &catalog, ItemKind::ClippedLetter);

        assert!(add_item(&mut state, &catalog, clipped).unwrap());
        assert!(state.item(clipped).is_none(), "original is consumed");
        let kinds: Vec<ItemKind> = state
            .items_in(ContainerId::Bag)
            .map(|item| item.kind)
            .collect();
        assert_eq!(kinds, vec![ItemKind::Letter, ItemKind::Paperclip]);
    }

    #[test]
    fn look_at_picks_the_line_by_container() {
        let catalog = catalog();
        let mut state = GameState::new();
        let phone = spawn(&mut state, &catalog, ItemKind::Telephone);
        let letter = spawn(&mut state, &catalog, ItemKind::Letter);
        add_item(&mut state, &catalog, letter).unwrap();

        assert_eq!(look_at(&mut state, phone).unwrap(), "An old rotary phone.");
        assert!(state.item(phone).unwrap().looked_at);

        // The letter is in the bag, so the inspect line is used.
        let line = look_at(&mut state, letter).unwrap();
        assert_eq!(line, catalog.profile(ItemKind::Letter).messages.inspect);
        assert!(state.item(letter).unwrap().looked_at);
    }

    #[test]
    fn use_line_tracks_the_usable_flag() {
        let catalog = catalog();
        let mut state = GameState::new();
        let phone = spawn(&mut state, &catalog, ItemKind::Telephone);

        let denied = use_item(&state, phone).unwrap().to_owned();
        state.item_mut(phone).unwrap().usable = true;
        let allowed = use_item(&state, phone).unwrap().to_owned();
        assert_ne!(denied, allowed);
    }

    #[test]
    fn trigger_runs_both_directions_in_order() {
        let catalog = catalog();
        let mut state = GameState::new();
        let reader = spawn(&mut state, &catalog, ItemKind::CardReader);
        let card = spawn(&mut state, &catalog, ItemKind::IdCard);

        // Passing the pair in "wrong" order still charges the card: the
        // reverse leg finds the rule.
        let (forward, backward) =
            trigger_item_combination(&mut state, &catalog, card, reader).unwrap();
        assert_eq!(forward, CombineOutcome::NoRule);
        assert_eq!(backward, CombineOutcome::Applied);
        assert_eq!(
            state.item(card).unwrap().attributes.counter(AttributeKey::KeyCode),
            Some(1)
        );
    }

    #[test]
    fn trigger_survives_consumption_by_the_first_leg() {
        let catalog = catalog();
        let mut state = GameState::new();
        let note = spawn(&mut state, &catalog, ItemKind::Note);
        let folder = spawn(&mut state, &catalog, ItemKind::SymbolsFolder);

        let (forward, backward) =
            trigger_item_combination(&mut state, &catalog, note, folder).unwrap();
        assert_eq!(forward, CombineOutcome::Applied);
        assert_eq!(backward, CombineOutcome::Rejected);
    }

    #[test]
    fn trigger_rejects_self_pairs_up_front() {
        let catalog = catalog();
        let mut state = GameState::new();
        let note = spawn(&mut state, &catalog, ItemKind::Note);

        let err = trigger_item_combination(&mut state, &catalog, note, note).unwrap_err();
        assert!(matches!(err, InteractError::SelfCombination { .. }));
        assert_eq!(err.error_code(), "INTERACT_SELF_COMBINATION");
    }
}
