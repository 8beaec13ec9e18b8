//! Common error infrastructure for adventure-core.
//!
//! Domain-specific errors (e.g. [`GraphError`](crate::nav::GraphError),
//! [`RouteError`](crate::nav::RouteError)) are defined in the modules that
//! produce them; this module provides the shared classification layer.
//!
//! Expected gameplay negatives, such as an item that cannot be picked up or
//! a combination the rules reject, are **not** errors. They are ordinary
//! return values carrying flavor text, because they happen constantly while
//! the player experiments. The error types in this crate exist for caller
//! bugs (stale ids, items in the wrong container) and data problems
//! (dangling neighbor names, duplicate spawn markers).

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable - the situation can change during normal play.
    ///
    /// Example: no route exists between two waypoints right now.
    Recoverable,

    /// Validation - invalid input, retrying without changes cannot succeed.
    ///
    /// Examples: unknown item id, picking up an item that is not in the world.
    Validation,

    /// Internal - unexpected state inconsistency; indicates a bug.
    ///
    /// Example: an item whose container handle disagrees with the container
    /// lists.
    Internal,

    /// Fatal - content cannot be used at all.
    ///
    /// Example: a map whose waypoints reference neighbors that do not exist.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all adventure-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; downstream logs and tests match on it
pub trait CoreError: std::fmt::Display + std::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str;
}
