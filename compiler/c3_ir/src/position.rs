//! Zero-based source positions and ranges.
//!
//! Columns are byte offsets within the line. Conversion to editor
//! coordinates (UTF-16) lives in `c3_syntax::LineIndex`.

use std::fmt;

/// A zero-based `(line, column)` location in a document.
///
/// Ordering is line-major, so `Position` values compare the way they
/// appear in the source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An inclusive span between two positions.
///
/// The same type is used for the identifier span of a declaration (just
/// the name token) and for its full extent (the whole declaration).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }

    /// Build a range from raw coordinates: `(start_line, start_col, end_line, end_col)`.
    #[inline]
    pub const fn from_coords(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Range {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// A zero-width range at `pos`.
    #[inline]
    pub const fn point(pos: Position) -> Self {
        Range {
            start: pos,
            end: pos,
        }
    }

    /// True if `pos` lies between `start` and `end`, both ends included.
    ///
    /// On the first and last line the column is checked against the
    /// respective bound; any column on a line strictly inside the range
    /// is contained.
    #[inline]
    pub fn contains(self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// True if `other` lies entirely within this range.
    #[inline]
    pub fn contains_range(self, other: Range) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Range) -> Range {
        Range {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests;
