// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token carries a `Position` indicating where it starts in the
//! source text. Positions are line/column based (both 1-indexed) because
//! the tokenizer consumes an incrementally delivered chunk stream and
//! never holds the whole source, so byte offsets into a single buffer are
//! not available downstream.

use std::fmt;

/// A line/column position in the source text.
///
/// Lines and columns are both 1-based. A newline increments the line and
/// resets the column to 1.
///
/// # Examples
///
/// ```
/// use plume_core::source_analysis::Position;
///
/// let pos = Position::new(3, 7);
/// assert_eq!(pos.line, 3);
/// assert_eq!(pos.column, 7);
/// assert_eq!(pos.to_string(), "3:7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Position {
    /// The position of the first character of the source text.
    pub const START: Self = Self { line: 1, column: 1 };

    /// Creates a new position from 1-based line and column numbers.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_start() {
        assert_eq!(Position::START, Position::new(1, 1));
        assert_eq!(Position::default(), Position::START);
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(12, 4).to_string(), "12:4");
    }

    #[test]
    fn position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 5));
    }
}
