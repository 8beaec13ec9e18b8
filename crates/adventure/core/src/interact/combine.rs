//! Item combination: the directional rule table and its two-phase protocol.
//!
//! Combining is asymmetric. `active.combine(passive)` applies only the rule
//! registered for that ordered kind pair; the reverse direction is a separate
//! rule (usually absent). Player code that wants "use A with B" to work both
//! ways runs both directions, see
//! [`trigger_item_combination`](crate::interact::trigger_item_combination).
//!
//! The protocol has two phases:
//! - [`is_combination_possible`] is pure: it reports whether the rule for the
//!   pair currently applies, plus the flavor line to show either way.
//! - [`combine`] mutates. It re-derives the same preconditions before
//!   touching anything, so calling it without the check beforehand cannot
//!   corrupt state; it just reports [`CombineOutcome::Rejected`].
//!
//! The rules themselves form the office puzzle chain: charge an id-card at
//! the card reader, open the locked door with letter, paperclip and key, and
//! decode the scribbled note into a phone number.

use crate::env::ItemCatalog;
use crate::state::{
    AttributeKey, ContainerId, GameState, ItemId, ItemKind, ItemState, Position, StateError,
};

use super::InteractError;

const NO_MATCHING_RULE: &str = "I can't combine those.";

const CHARGE_CARD_OK: &str = "The reader hums and writes a new key code onto the card.";
const UNLOCK_DOOR_OK: &str = "The card's code matches. The lock whirrs open.";
const UNLOCK_DOOR_WRONG_CODE: &str = "The little light flashes red. Wrong key code.";
const SLIP_LETTER_OK: &str = "The letter slides under the door, right below the lock.";
const SLIP_LETTER_UNEXAMINED: &str = "I should take a closer look at that door first.";
const SLIP_LETTER_AGAIN: &str = "There is already paper lying under the door.";
const FISH_KEY_OK: &str = "Some wiggling, and the key drops onto the letter behind the door.";
const FISH_KEY_UNEXAMINED: &str = "I should take a closer look at that door first.";
const FISH_KEY_NO_CATCH: &str = "If I push the key out now it will just skid out of reach.";
const FISH_KEY_AGAIN: &str = "The keyhole is already clear.";
const TURN_KEY_OK: &str = "The key turns. That door is no longer a problem.";
const TURN_KEY_BLOCKED: &str = "Something is still stuck in the keyhole.";
const TURN_KEY_OPEN: &str = "It is already unlocked.";
const DECODE_NOTE_OK: &str = "The folder's symbol table turns the scribbles into a phone number.";
const DIAL_NUMBER_OK: &str = "I dial the number from the note.";

/// Verdict of the pure combination check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinationCheck {
    pub possible: bool,
    /// Flavor line to show the player, for acceptance and rejection alike.
    pub reason: String,
}

impl CombinationCheck {
    fn accepted(reason: &str) -> Self {
        Self {
            possible: true,
            reason: reason.to_owned(),
        }
    }

    fn rejected(reason: &str) -> Self {
        Self {
            possible: false,
            reason: reason.to_owned(),
        }
    }
}

/// What a [`combine`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CombineOutcome {
    /// The rule's preconditions held and its effects were applied.
    Applied,
    /// A rule exists for this direction but its preconditions do not hold,
    /// or a participant no longer exists. State is untouched.
    Rejected,
    /// No rule is registered for this ordered kind pair.
    NoRule,
}

impl CombineOutcome {
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// One directional entry of the rule table, keyed by (active, passive) kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CombinationRule {
    /// CardReader -> IdCard: each swipe bumps the card's key code.
    ChargeCard,
    /// IdCard -> Door: opens when the card's key code matches the door's
    /// access code.
    UnlockDoor,
    /// Letter -> Door: slid underneath to catch the key, once the door has
    /// been examined.
    SlipLetter,
    /// Paperclip -> Door: pokes the key out of the lock onto the letter,
    /// making it reachable.
    FishKey,
    /// Key -> Door: unlocks the door once the keyhole is clear.
    TurnKey,
    /// Note -> SymbolsFolder: deciphers the note into a telephone note.
    DecodeNote,
    /// Telephone -> TelephoneNote: dials the number, using the note up.
    DialNumber,
}

impl CombinationRule {
    fn between(active: ItemKind, passive: ItemKind) -> Option<Self> {
        match (active, passive) {
            (ItemKind::CardReader, ItemKind::IdCard) => Some(Self::ChargeCard),
            (ItemKind::IdCard, ItemKind::Door) => Some(Self::UnlockDoor),
            (ItemKind::Letter, ItemKind::Door) => Some(Self::SlipLetter),
            (ItemKind::Paperclip, ItemKind::Door) => Some(Self::FishKey),
            (ItemKind::Key, ItemKind::Door) => Some(Self::TurnKey),
            (ItemKind::Note, ItemKind::SymbolsFolder) => Some(Self::DecodeNote),
            (ItemKind::Telephone, ItemKind::TelephoneNote) => Some(Self::DialNumber),
            _ => None,
        }
    }

    /// Pure precondition check over the two participants.
    fn check(self, active: &ItemState, passive: &ItemState) -> CombinationCheck {
        match self {
            Self::ChargeCard => CombinationCheck::accepted(CHARGE_CARD_OK),

            Self::UnlockDoor => {
                let key_code = active.attributes.counter(AttributeKey::KeyCode);
                let access_code = passive.attributes.counter(AttributeKey::AccessCode);
                match (key_code, access_code) {
                    (Some(key), Some(access)) if key == access => {
                        CombinationCheck::accepted(UNLOCK_DOOR_OK)
                    }
                    _ => CombinationCheck::rejected(UNLOCK_DOOR_WRONG_CODE),
                }
            }

            Self::SlipLetter => {
                if !passive.looked_at {
                    CombinationCheck::rejected(SLIP_LETTER_UNEXAMINED)
                } else if passive.attributes.flag(AttributeKey::CombinedWithLetter) {
                    CombinationCheck::rejected(SLIP_LETTER_AGAIN)
                } else {
                    CombinationCheck::accepted(SLIP_LETTER_OK)
                }
            }

            Self::FishKey => {
                if !passive.looked_at {
                    CombinationCheck::rejected(FISH_KEY_UNEXAMINED)
                } else if !passive.attributes.flag(AttributeKey::CombinedWithLetter) {
                    CombinationCheck::rejected(FISH_KEY_NO_CATCH)
                } else if passive.attributes.flag(AttributeKey::CombinedWithPaperclip) {
                    CombinationCheck::rejected(FISH_KEY_AGAIN)
                } else {
                    CombinationCheck::accepted(FISH_KEY_OK)
                }
            }

            Self::TurnKey => {
                if passive.usable {
                    CombinationCheck::rejected(TURN_KEY_OPEN)
                } else if !passive.attributes.flag(AttributeKey::CombinedWithPaperclip) {
                    CombinationCheck::rejected(TURN_KEY_BLOCKED)
                } else {
                    CombinationCheck::accepted(TURN_KEY_OK)
                }
            }

            Self::DecodeNote => CombinationCheck::accepted(DECODE_NOTE_OK),

            Self::DialNumber => CombinationCheck::accepted(DIAL_NUMBER_OK),
        }
    }

    /// Applies the rule's effects. Preconditions were re-checked by the
    /// caller against the current state.
    fn apply(
        self,
        state: &mut GameState,
        catalog: &ItemCatalog,
        active: ItemId,
        passive: ItemId,
    ) -> Result<(), StateError> {
        match self {
            Self::ChargeCard => {
                let card = state
                    .item_mut(passive)
                    .ok_or(StateError::ItemNotFound { id: passive })?;
                card.attributes.increment(AttributeKey::KeyCode);
            }

            Self::UnlockDoor => {
                let door = state
                    .item_mut(passive)
                    .ok_or(StateError::ItemNotFound { id: passive })?;
                door.usable = true;
            }

            Self::SlipLetter => {
                state.despawn(active)?;
                let door = state
                    .item_mut(passive)
                    .ok_or(StateError::ItemNotFound { id: passive })?;
                door.attributes
                    .set_flag(AttributeKey::CombinedWithLetter, true);
            }

            Self::FishKey => {
                let holder = state
                    .item(passive)
                    .map(|door| door.container)
                    .ok_or(StateError::ItemNotFound { id: passive })?;
                let hidden_key = state
                    .items_in(holder)
                    .find(|item| item.kind == ItemKind::Key)
                    .map(|item| item.id);
                state.despawn(active)?;
                if let Some(key) = hidden_key {
                    if let Some(key_item) = state.item_mut(key) {
                        key_item.obtainable = true;
                    }
                }
                let door = state
                    .item_mut(passive)
                    .ok_or(StateError::ItemNotFound { id: passive })?;
                door.attributes
                    .set_flag(AttributeKey::CombinedWithPaperclip, true);
            }

            Self::TurnKey => {
                state.despawn(active)?;
                let door = state
                    .item_mut(passive)
                    .ok_or(StateError::ItemNotFound { id: passive })?;
                door.usable = true;
            }

            Self::DecodeNote => {
                let (container, position): (ContainerId, Position) = state
                    .item(active)
                    .map(|note| (note.container, note.position))
                    .ok_or(StateError::ItemNotFound { id: active })?;
                state.despawn(active)?;
                state.spawn_item(
                    ItemKind::TelephoneNote,
                    catalog.profile(ItemKind::TelephoneNote),
                    container,
                    position,
                );
            }

            Self::DialNumber => {
                state.despawn(passive)?;
            }
        }
        Ok(())
    }
}

/// Pure check: would combining `active` into `passive` work right now?
///
/// Returns the rule's acceptance or rejection line; pairs with no rule in
/// this direction are rejected with a generic line.
///
/// # Errors
///
/// Unresolvable ids and self-combination are caller bugs and surface as
/// typed errors rather than flavor text.
pub fn is_combination_possible(
    state: &GameState,
    active: ItemId,
    passive: ItemId,
) -> Result<CombinationCheck, InteractError> {
    if active == passive {
        return Err(InteractError::SelfCombination { id: active });
    }
    let first = state
        .item(active)
        .ok_or(StateError::ItemNotFound { id: active })?;
    let second = state
        .item(passive)
        .ok_or(StateError::ItemNotFound { id: passive })?;

    Ok(match CombinationRule::between(first.kind, second.kind) {
        Some(rule) => rule.check(first, second),
        None => CombinationCheck::rejected(NO_MATCHING_RULE),
    })
}

/// Mutating half of the protocol: applies the rule for (`active`, `passive`)
/// if its preconditions hold right now.
///
/// Tolerant by design. A participant that no longer exists (consumed by an
/// earlier combination this turn) yields [`CombineOutcome::Rejected`], and
/// failed preconditions never mutate anything, so running this without a
/// prior [`is_combination_possible`] is safe.
///
/// # Errors
///
/// Only internal container desync escalates to an error; every gameplay-level
/// negative is an `Ok` outcome.
pub fn combine(
    state: &mut GameState,
    catalog: &ItemCatalog,
    active: ItemId,
    passive: ItemId,
) -> Result<CombineOutcome, InteractError> {
    let (rule, check) = {
        let Some(first) = state.item(active) else {
            return Ok(CombineOutcome::Rejected);
        };
        let Some(second) = state.item(passive) else {
            return Ok(CombineOutcome::Rejected);
        };
        let Some(rule) = CombinationRule::between(first.kind, second.kind) else {
            return Ok(CombineOutcome::NoRule);
        };
        (rule, rule.check(first, second))
    };

    if !check.possible {
        return Ok(CombineOutcome::Rejected);
    }
    rule.apply(state, catalog, active, passive)?;
    Ok(CombineOutcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ItemProfile;

    fn catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        for kind in [
            ItemKind::Paperclip,
            ItemKind::IdCard,
            ItemKind::Letter,
            ItemKind::Note,
            ItemKind::TelephoneNote,
        ] {
            catalog.insert(
                kind,
                ItemProfile {
                    obtainable: true,
                    ..ItemProfile::default()
                },
            );
        }
        catalog
    }

    fn spawn(state: &mut GameState, catalog: &ItemCatalog, kind: ItemKind, container: ContainerId) -> ItemId {
        state.spawn_item(kind, catalog.profile(kind), container, Position::ORIGIN)
    }

    #[test]
    fn card_reader_charges_the_card_once_per_swipe() {
        let catalog = catalog();
        let mut state = GameState::new();
        let reader = spawn(&mut state, &catalog, ItemKind::CardReader, ContainerId::World);
        let card = spawn(&mut state, &catalog, ItemKind::IdCard, ContainerId::Bag);

        for expected in 1..=2 {
            let check = is_combination_possible(&state, reader, card).unwrap();
            assert!(check.possible);
            let outcome = combine(&mut state, &catalog, reader, card).unwrap();
            assert_eq!(outcome, CombineOutcome::Applied);
            assert_eq!(
                state.item(card).unwrap().attributes.counter(AttributeKey::KeyCode),
                Some(expected)
            );
        }
    }

    #[test]
    fn uncharged_card_does_not_open_the_door() {
        let catalog = catalog();
        let mut state = GameState::new();
        let card = spawn(&mut state, &catalog, ItemKind::IdCard, ContainerId::Bag);
        let door = spawn(&mut state, &catalog, ItemKind::Door, ContainerId::World);

        let check = is_combination_possible(&state, card, door).unwrap();
        assert!(!check.possible);
        assert_eq!(check.reason, UNLOCK_DOOR_WRONG_CODE);

        let outcome = combine(&mut state, &catalog, card, door).unwrap();
        assert_eq!(outcome, CombineOutcome::Rejected);
        assert!(!state.item(door).unwrap().usable);
    }

    #[test]
    fn charged_card_opens_the_door() {
        let catalog = catalog();
        let mut state = GameState::new();
        let reader = spawn(&mut state, &catalog, ItemKind::CardReader, ContainerId::World);
        let card = spawn(&mut state, &catalog, ItemKind::IdCard, ContainerId::Bag);
        let door = spawn(&mut state, &catalog, ItemKind::Door, ContainerId::World);

        combine(&mut state, &catalog, reader, card).unwrap();
        let outcome = combine(&mut state, &catalog, card, door).unwrap();
        assert_eq!(outcome, CombineOutcome::Applied);
        assert!(state.item(door).unwrap().usable);
        // The card is not consumed by the door.
        assert!(state.item(card).is_some());
    }

    #[test]
    fn letter_requires_an_examined_door() {
        let catalog = catalog();
        let mut state = GameState::new();
        let letter = spawn(&mut state, &catalog, ItemKind::Letter, ContainerId::Bag);
        let door = spawn(&mut state, &catalog, ItemKind::Door, ContainerId::World);

        let check = is_combination_possible(&state, letter, door).unwrap();
        assert!(!check.possible);

        state.item_mut(door).unwrap().looked_at = true;
        let outcome = combine(&mut state, &catalog, letter, door).unwrap();
        assert_eq!(outcome, CombineOutcome::Applied);
        assert!(state.item(letter).is_none(), "letter is consumed");
        assert!(state
            .item(door)
            .unwrap()
            .attributes
            .flag(AttributeKey::CombinedWithLetter));
    }

    #[test]
    fn paperclip_frees_the_hidden_key() {
        let catalog = catalog();
        let mut state = GameState::new();
        let clip = spawn(&mut state, &catalog, ItemKind::Paperclip, ContainerId::Bag);
        let door = spawn(&mut state, &catalog, ItemKind::Door, ContainerId::World);
        let key = spawn(&mut state, &catalog, ItemKind::Key, ContainerId::World);
        assert!(!state.item(key).unwrap().obtainable);

        // Without the letter in place the clip would lose the key.
        state.item_mut(door).unwrap().looked_at = true;
        let check = is_combination_possible(&state, clip, door).unwrap();
        assert!(!check.possible);
        assert_eq!(check.reason, FISH_KEY_NO_CATCH);

        state
            .item_mut(door)
            .unwrap()
            .attributes
            .set_flag(AttributeKey::CombinedWithLetter, true);
        let outcome = combine(&mut state, &catalog, clip, door).unwrap();
        assert_eq!(outcome, CombineOutcome::Applied);
        assert!(state.item(clip).is_none(), "paperclip is consumed");
        assert!(state.item(key).unwrap().obtainable);
        assert!(state
            .item(door)
            .unwrap()
            .attributes
            .flag(AttributeKey::CombinedWithPaperclip));
    }

    #[test]
    fn key_opens_the_door_only_after_the_keyhole_is_clear() {
        let catalog = catalog();
        let mut state = GameState::new();
        let key = spawn(&mut state, &catalog, ItemKind::Key, ContainerId::Bag);
        let door = spawn(&mut state, &catalog, ItemKind::Door, ContainerId::World);

        let check = is_combination_possible(&state, key, door).unwrap();
        assert!(!check.possible);
        assert_eq!(check.reason, TURN_KEY_BLOCKED);

        state
            .item_mut(door)
            .unwrap()
            .attributes
            .set_flag(AttributeKey::CombinedWithPaperclip, true);
        let outcome = combine(&mut state, &catalog, key, door).unwrap();
        assert_eq!(outcome, CombineOutcome::Applied);
        assert!(state.item(key).is_none(), "key is consumed");
        assert!(state.item(door).unwrap().usable);
    }

    #[test]
    fn note_becomes_a_telephone_note_in_the_same_container() {
        let catalog = catalog();
        let mut state = GameState::new();
        let note = spawn(&mut state, &catalog, ItemKind::Note, ContainerId::Bag);
        let folder = spawn(&mut state, &catalog, ItemKind::SymbolsFolder, ContainerId::World);

        let outcome = combine(&mut state, &catalog, note, folder).unwrap();
        assert_eq!(outcome, CombineOutcome::Applied);
        assert!(state.item(note).is_none());

        let spawned: Vec<_> = state
            .items_in(ContainerId::Bag)
            .filter(|item| item.kind == ItemKind::TelephoneNote)
            .collect();
        assert_eq!(spawned.len(), 1);
    }

    #[test]
    fn dialing_consumes_the_telephone_note() {
        let catalog = catalog();
        let mut state = GameState::new();
        let phone = spawn(&mut state, &catalog, ItemKind::Telephone, ContainerId::World);
        let note = spawn(&mut state, &catalog, ItemKind::TelephoneNote, ContainerId::Bag);

        let outcome = combine(&mut state, &catalog, phone, note).unwrap();
        assert_eq!(outcome, CombineOutcome::Applied);
        assert!(state.item(note).is_none());
        assert!(state.item(phone).is_some());
    }

    #[test]
    fn unrelated_kinds_have_no_rule() {
        let catalog = catalog();
        let mut state = GameState::new();
        let key = spawn(&mut state, &catalog, ItemKind::Key, ContainerId::Bag);
        let phone = spawn(&mut state, &catalog, ItemKind::Telephone, ContainerId::World);

        let check = is_combination_possible(&state, key, phone).unwrap();
        assert!(!check.possible);
        assert_eq!(check.reason, NO_MATCHING_RULE);
        assert_eq!(
            combine(&mut state, &catalog, key, phone).unwrap(),
            CombineOutcome::NoRule
        );
    }

    #[test]
    fn rules_do_not_fire_in_reverse() {
        let catalog = catalog();
        let mut state = GameState::new();
        let reader = spawn(&mut state, &catalog, ItemKind::CardReader, ContainerId::World);
        let card = spawn(&mut state, &catalog, ItemKind::IdCard, ContainerId::Bag);

        // IdCard -> CardReader has no rule; only the reverse charges.
        assert_eq!(
            combine(&mut state, &catalog, card, reader).unwrap(),
            CombineOutcome::NoRule
        );
        assert_eq!(
            state.item(card).unwrap().attributes.counter(AttributeKey::KeyCode),
            Some(0)
        );
    }

    #[test]
    fn unchecked_combine_rejects_instead_of_mutating() {
        let catalog = catalog();
        let mut state = GameState::new();
        let letter = spawn(&mut state, &catalog, ItemKind::Letter, ContainerId::Bag);
        let door = spawn(&mut state, &catalog, ItemKind::Door, ContainerId::World);

        // Door never examined; calling combine directly must not consume the
        // letter or set the flag.
        let outcome = combine(&mut state, &catalog, letter, door).unwrap();
        assert_eq!(outcome, CombineOutcome::Rejected);
        assert!(state.item(letter).is_some());
        assert!(!state
            .item(door)
            .unwrap()
            .attributes
            .flag(AttributeKey::CombinedWithLetter));
    }

    #[test]
    fn vanished_participant_is_rejected_not_an_error() {
        let catalog = catalog();
        let mut state = GameState::new();
        let note = spawn(&mut state, &catalog, ItemKind::Note, ContainerId::Bag);
        let folder = spawn(&mut state, &catalog, ItemKind::SymbolsFolder, ContainerId::World);

        combine(&mut state, &catalog, note, folder).unwrap();
        // The note is gone now; the reverse leg must degrade gracefully.
        assert_eq!(
            combine(&mut state, &catalog, folder, note).unwrap(),
            CombineOutcome::Rejected
        );
    }

    #[test]
    fn self_combination_is_a_caller_bug() {
        let catalog = catalog();
        let mut state = GameState::new();
        let card = spawn(&mut state, &catalog, ItemKind::IdCard, ContainerId::Bag);

        let err = is_combination_possible(&state, card, card).unwrap_err();
        assert!(matches!(err, InteractError::SelfCombination { .. }));
    }

    #[test]
    fn unknown_id_in_the_check_is_a_typed_error() {
        let catalog = catalog();
        let mut state = GameState::new();
        let card = spawn(&mut state, &catalog, ItemKind::IdCard, ContainerId::Bag);

        let err = is_combination_possible(&state, card, ItemId(999)).unwrap_err();
        assert!(matches!(err, InteractError::State(StateError::ItemNotFound { .. })));
    }
}
