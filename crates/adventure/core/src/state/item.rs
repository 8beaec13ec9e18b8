//! Item instance state.
//!
//! An [`ItemState`] is one concrete object in the running game: the door of
//! the current room, the paperclip in the bag. Which texts it speaks and
//! which flags it starts with come from an [`ItemProfile`](crate::env::ItemProfile)
//! at spawn time; everything that changes during play (flags, attributes,
//! owning container) lives here.

use std::fmt;

use crate::env::ItemProfile;
use crate::state::Position;

/// Unique identifier for one item instance.
///
/// Ids are allocated by [`GameState`](crate::state::GameState), never reused,
/// and stop resolving once the instance is consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to the container currently holding an item.
///
/// Items never point at container storage directly; every ownership transfer
/// goes through [`GameState::move_to_container`](crate::state::GameState::move_to_container)
/// so an instance is in exactly one container list at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerId {
    /// The current map's world container.
    World,
    /// The player's bag.
    Bag,
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::World => write!(f, "world"),
            Self::Bag => write!(f, "bag"),
        }
    }
}

/// Stable identity key of an item type.
///
/// The snake_case string form is the key used by map object layers and the
/// flavor-text catalog (`"card_reader"`, `"clipped_letter"`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    /// Wire clip; pushes the key out of the office door's lock.
    Paperclip,
    /// Opens the office door once the lock has been cleared.
    Key,
    /// Employee badge; its key code is charged by the card reader.
    IdCard,
    /// The locked office door at the center of the puzzle chain.
    Door,
    /// Wall-mounted reader that charges id cards.
    CardReader,
    /// Folder of dialing symbols; decodes the note.
    SymbolsFolder,
    /// Scribbled note; unreadable until decoded.
    Note,
    /// Decoded note carrying a telephone number.
    TelephoneNote,
    /// Desk telephone; consumes the telephone note when dialed.
    Telephone,
    /// A letter on its own, thin enough to slide under a door.
    Letter,
    /// A letter with a paperclip still attached; splits apart when taken.
    ClippedLetter,
}

/// Keys into an item's [`AttributeMap`].
///
/// Kept as an enum so combination rules dispatch on typed keys instead of
/// strings from data files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttributeKey {
    /// Charge counter on an id card.
    KeyCode,
    /// Code a door demands from an id card.
    AccessCode,
    /// Door flag: a letter has been slid underneath.
    CombinedWithLetter,
    /// Door flag: the lock has been cleared with a paperclip.
    CombinedWithPaperclip,
}

/// Value stored under an [`AttributeKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    Counter(u32),
    Flag(bool),
}

/// Item-specific mutable state beyond the three common flags.
///
/// Seeded per kind at spawn time; combination rules read and write entries
/// through the typed accessors.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeMap {
    entries: std::collections::BTreeMap<AttributeKey, AttributeValue>,
}

impl AttributeMap {
    /// Initial attributes for a freshly spawned item of `kind`.
    ///
    /// Doors demand access code 1 (one reader charge) and track their two
    /// combination flags; id cards start with an uncharged key code. All
    /// other kinds carry no attributes.
    pub fn seed(kind: ItemKind) -> Self {
        let mut map = Self::default();
        match kind {
            ItemKind::IdCard => {
                map.set_counter(AttributeKey::KeyCode, 0);
            }
            ItemKind::Door => {
                map.set_counter(AttributeKey::AccessCode, 1);
                map.set_flag(AttributeKey::CombinedWithLetter, false);
                map.set_flag(AttributeKey::CombinedWithPaperclip, false);
            }
            _ => {}
        }
        map
    }

    /// Returns the counter stored under `key`, if any.
    pub fn counter(&self, key: AttributeKey) -> Option<u32> {
        match self.entries.get(&key) {
            Some(AttributeValue::Counter(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the flag stored under `key`; absent entries read as false.
    pub fn flag(&self, key: AttributeKey) -> bool {
        matches!(self.entries.get(&key), Some(AttributeValue::Flag(true)))
    }

    pub fn set_counter(&mut self, key: AttributeKey, value: u32) {
        self.entries.insert(key, AttributeValue::Counter(value));
    }

    pub fn set_flag(&mut self, key: AttributeKey, value: bool) {
        self.entries.insert(key, AttributeValue::Flag(value));
    }

    /// Increments the counter under `key` by one and returns the new value.
    ///
    /// A missing or non-counter entry counts as zero before the increment.
    pub fn increment(&mut self, key: AttributeKey) -> u32 {
        let next = self.counter(key).unwrap_or(0).saturating_add(1);
        self.set_counter(key, next);
        next
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-instance message texts, copied from the profile at spawn time.
///
/// Stored on the instance (not looked up by kind) so a combination rule can
/// rewrite one item's description without affecting its siblings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemMessages {
    /// Short description for items out in the world.
    pub look_at: String,
    /// Richer description for items in the bag.
    pub inspect: String,
    /// Spoken when using a usable item.
    pub use_text: String,
    /// Spoken when using an item that is not usable.
    pub use_denied: String,
    /// Spoken when picking the item up.
    pub add_text: String,
    /// Spoken when the item cannot be picked up.
    pub add_denied: String,
}

impl ItemMessages {
    pub const DEFAULT_LOOK_AT: &'static str = "Nothing unusual about it.";
    pub const DEFAULT_INSPECT: &'static str = "Nothing I haven't already noticed.";
    pub const DEFAULT_USE: &'static str = "Okay, it's doing whatever it does.";
    pub const DEFAULT_USE_DENIED: &'static str = "I can't use that.";
    pub const DEFAULT_ADD: &'static str = "Might come in handy.";
    pub const DEFAULT_ADD_DENIED: &'static str = "That stays where it is.";
}

impl Default for ItemMessages {
    fn default() -> Self {
        Self {
            look_at: Self::DEFAULT_LOOK_AT.to_owned(),
            inspect: Self::DEFAULT_INSPECT.to_owned(),
            use_text: Self::DEFAULT_USE.to_owned(),
            use_denied: Self::DEFAULT_USE_DENIED.to_owned(),
            add_text: Self::DEFAULT_ADD.to_owned(),
            add_denied: Self::DEFAULT_ADD_DENIED.to_owned(),
        }
    }
}

/// One live item instance.
///
/// # Invariants
///
/// - `id` is unique among live instances and never reused.
/// - `container` names the one container list whose entries include `id`;
///   both are updated together by `GameState` operations only.
/// - `position` is the world placement; it keeps its last world value while
///   the item sits in the bag and is not meaningful there.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub id: ItemId,
    pub kind: ItemKind,
    /// May the item move from the world into the bag?
    pub obtainable: bool,
    /// Does a "use" action produce the use-text instead of a rejection?
    pub usable: bool,
    /// Has the player ever examined this item? Several combination rules
    /// gate on it.
    pub looked_at: bool,
    pub attributes: AttributeMap,
    pub messages: ItemMessages,
    pub container: ContainerId,
    pub position: Position,
}

impl ItemState {
    /// Builds an instance configured by `profile`.
    ///
    /// Flags and texts come from the profile; attributes are seeded per kind.
    pub fn from_profile(
        id: ItemId,
        kind: ItemKind,
        profile: &ItemProfile,
        container: ContainerId,
        position: Position,
    ) -> Self {
        Self {
            id,
            kind,
            obtainable: profile.obtainable,
            usable: profile.usable,
            looked_at: false,
            attributes: AttributeMap::seed(kind),
            messages: profile.messages.clone(),
            container,
            position,
        }
    }

    /// Returns the look-at text.
    ///
    /// Side effect: marks the item `looked_at`. The text itself is stable,
    /// but rules gated on first inspection observe the flag afterwards.
    pub fn look_at_message(&mut self) -> &str {
        self.looked_at = true;
        &self.messages.look_at
    }

    /// Returns the richer in-bag description. No side effects.
    pub fn inspect_message(&self) -> &str {
        &self.messages.inspect
    }

    /// Returns the use-text when usable, the rejection text otherwise.
    ///
    /// Never fails: "you can't use that" is a normal play outcome.
    pub fn use_message(&self) -> &str {
        if self.usable {
            &self.messages.use_text
        } else {
            &self.messages.use_denied
        }
    }

    /// Returns the pick-up flavor text, or the not-obtainable text.
    pub fn add_message(&self) -> &str {
        if self.obtainable {
            &self.messages.add_text
        } else {
            &self.messages.add_denied
        }
    }
}
