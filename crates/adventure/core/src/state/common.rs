use std::fmt;

/// Screen-space position expressed in integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean straight-line distance to `other`, truncated to an integer.
    ///
    /// Truncation (not rounding) is the canonical semantic: the pathfinder's
    /// heuristic and all route tie-breaks depend on `floor(sqrt(dx² + dy²))`.
    ///
    /// # Returns
    ///
    /// `distance((5, 5), (7, 2))` is `3` (√13 ≈ 3.605 truncated).
    pub fn distance(self, other: Position) -> u32 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        ((dx * dx + dy * dy) as f64).sqrt() as u32
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
