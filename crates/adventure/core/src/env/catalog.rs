//! Item profiles and the flavor-text catalog.
//!
//! Profiles are the read-only configuration an item instance is built from:
//! its starting flags, its message texts, and whether it splits apart when
//! picked up. They are authored in an external key-value data source; the
//! loader resolves each raw key to a [`ProfileKey`] once and applies it here,
//! so no string dispatch survives past load time.

use crate::error::{CoreError, ErrorSeverity};
use crate::state::{ItemKind, ItemMessages};

/// Configuration keys an item profile understands.
///
/// The snake_case string form is the key spelling in catalog data. Anything
/// that does not parse into this enum is an unrecognized key, handled by the
/// loader's strictness mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProfileKey {
    /// World description text.
    LookAt,
    /// In-bag description text.
    Inspect,
    /// Text spoken on a successful use.
    Use,
    /// Text spoken when the item is not usable.
    UseNotUsable,
    /// Pick-up flavor text.
    Add,
    /// Text spoken when the item cannot be picked up.
    AddNotObtainable,
    /// Starting `usable` flag.
    Usable,
    /// Starting `obtainable` flag.
    Obtainable,
    /// Kinds this item decomposes into when picked up.
    SplitInto,
}

/// A value applied under a [`ProfileKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileValue {
    Text(String),
    Flag(bool),
    Kinds(Vec<ItemKind>),
}

impl ProfileValue {
    const fn describe(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
            Self::Kinds(_) => "kind list",
        }
    }
}

/// Errors applying a configuration entry to a profile.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// The value's type does not match what the key expects.
    #[error("profile key '{key}' expects a {expected}, got a {got}")]
    TypeMismatch {
        key: ProfileKey,
        expected: &'static str,
        got: &'static str,
    },
}

impl CoreError for ProfileError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TypeMismatch { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "PROFILE_TYPE_MISMATCH",
        }
    }
}

/// Load-time configuration for one item kind.
///
/// Every field has a working default (placeholder texts, nothing obtainable
/// or usable, no split), so partially-specified and even entirely missing
/// catalog entries still produce functional items.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemProfile {
    pub obtainable: bool,
    pub usable: bool,
    pub messages: ItemMessages,
    /// Non-empty for items that decompose when picked up; the original
    /// instance is consumed and one item per listed kind lands in the bag.
    pub split_into: Vec<ItemKind>,
}

impl ItemProfile {
    /// Applies one configuration entry.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::TypeMismatch`] when the value shape does not
    /// fit the key (e.g. a flag under `look_at`).
    pub fn set(&mut self, key: ProfileKey, value: ProfileValue) -> Result<(), ProfileError> {
        let mismatch = |expected: &'static str, got: &ProfileValue| ProfileError::TypeMismatch {
            key,
            expected,
            got: got.describe(),
        };

        match key {
            ProfileKey::LookAt => match value {
                ProfileValue::Text(text) => self.messages.look_at = text,
                other => return Err(mismatch("text", &other)),
            },
            ProfileKey::Inspect => match value {
                ProfileValue::Text(text) => self.messages.inspect = text,
                other => return Err(mismatch("text", &other)),
            },
            ProfileKey::Use => match value {
                ProfileValue::Text(text) => self.messages.use_text = text,
                other => return Err(mismatch("text", &other)),
            },
            ProfileKey::UseNotUsable => match value {
                ProfileValue::Text(text) => self.messages.use_denied = text,
                other => return Err(mismatch("text", &other)),
            },
            ProfileKey::Add => match value {
                ProfileValue::Text(text) => self.messages.add_text = text,
                other => return Err(mismatch("text", &other)),
            },
            ProfileKey::AddNotObtainable => match value {
                ProfileValue::Text(text) => self.messages.add_denied = text,
                other => return Err(mismatch("text", &other)),
            },
            ProfileKey::Usable => match value {
                ProfileValue::Flag(flag) => self.usable = flag,
                other => return Err(mismatch("flag", &other)),
            },
            ProfileKey::Obtainable => match value {
                ProfileValue::Flag(flag) => self.obtainable = flag,
                other => return Err(mismatch("flag", &other)),
            },
            ProfileKey::SplitInto => match value {
                ProfileValue::Kinds(kinds) => self.split_into = kinds,
                other => return Err(mismatch("kind list", &other)),
            },
        }
        Ok(())
    }
}

/// All item profiles for a game, keyed by kind.
///
/// Lookups never fail: a kind without an authored profile gets the default
/// profile, matching the data contract that missing keys mean placeholder
/// behavior rather than an error.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemCatalog {
    profiles: std::collections::BTreeMap<ItemKind, ItemProfile>,
    fallback: ItemProfile,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the profile for `kind`.
    pub fn insert(&mut self, kind: ItemKind, profile: ItemProfile) {
        self.profiles.insert(kind, profile);
    }

    /// Returns the profile for `kind`, falling back to the default profile.
    pub fn profile(&self, kind: ItemKind) -> &ItemProfile {
        self.profiles.get(&kind).unwrap_or(&self.fallback)
    }

    /// True if `kind` has an authored (non-fallback) profile.
    pub fn has_profile(&self, kind: ItemKind) -> bool {
        self.profiles.contains_key(&kind)
    }

    /// Number of authored profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
