//! Source position and range types.

use serde::{Deserialize, Serialize};

/// A location within a source text.
///
/// `line` is one-based, `column` is zero-based and counted in characters,
/// and `offset` is the byte offset into the UTF-8 source.
///
/// # Example
///
/// ```
/// use tessera_core::Position;
///
/// let pos = Position::start();
/// assert_eq!((pos.line, pos.column, pos.offset), (1, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// One-based line number.
    pub line: u32,
    /// Zero-based column, in characters.
    pub column: u32,
    /// Byte offset from the start of the source.
    pub offset: usize,
}

impl Position {
    /// Creates a position from its parts.
    #[must_use]
    pub const fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Returns the position of the first character of a source.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(1, 0, 0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// A half-open source range.
///
/// The byte width `end.offset - start.offset` always equals the length of
/// the text the range covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Range {
    /// Creates a range between two positions.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns the byte width of the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns `true` when the range covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when `offset` falls inside the range.
    #[must_use]
    pub const fn contains_offset(&self, offset: usize) -> bool {
        self.start.offset <= offset && offset < self.end.offset
    }

    /// Returns the smallest range covering both `self` and `other`.
    #[must_use]
    pub const fn cover(&self, other: &Self) -> Self {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Self { start, end }
    }
}
