//! Token positions.
//!
//! The lexer is external, so a [`Span`] is whatever position it attached to
//! a token. The parser widens spans as it reduces and uses them to place
//! diagnostics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a token or a reduced phrase sits in the script.
///
/// `start..end` is a byte range; `line` and `column` (both 1-based) locate
/// `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
    /// Line of `start`.
    pub line: u32,
    /// Column of `start`.
    pub column: u32,
}

impl Span {
    /// Creates a span from a byte range and the position of its first byte.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// The empty span before the first byte of a script.
    #[must_use]
    pub const fn at_start() -> Self {
        Self::new(0, 0, 1, 1)
    }

    /// Returns the empty span just past this one.
    ///
    /// The column advances by the span's byte length, so the result is only
    /// exact for spans that sit on a single line, which every token does.
    #[must_use]
    pub fn empty_after(self) -> Self {
        let width = u32::try_from(self.len()).unwrap_or(u32::MAX);
        Self::new(self.end, self.end, self.line, self.column.saturating_add(width))
    }

    /// Joins two spans; the result starts where `self` does.
    #[must_use]
    pub fn to(self, other: Self) -> Self {
        Self::new(self.start, other.end.max(self.end), self.line, self.column)
    }

    /// Byte length.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True for a zero-width span.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
