//! Pattern cursor and source positions
//!
//! The parser walks a pattern one code point at a time. [`Cursor`] keeps the
//! index of the code point under inspection and offers one character of
//! lookahead and one of lookbehind. Every out-of-range access yields `None`,
//! so end-of-input handling lives entirely with the caller.

use std::fmt;

/// A position in a pattern
///
/// Offsets count code points, not bytes, so they line up with what a user
/// sees when the pattern contains non-ASCII text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Code point offset from the start of the pattern
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl SourcePosition {
    /// Create a new source position
    #[inline]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create a position at the start of a pattern
    #[inline]
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Calculate the position of a code point offset
    pub fn from_offset(chars: &[char], offset: usize) -> Self {
        let offset = offset.min(chars.len());

        let mut line = 1;
        let mut column = 1;

        for &ch in &chars[..offset] {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

/// Position-tracking reader over a pattern
///
/// The cursor starts *before* the first code point; the first call to
/// [`Cursor::advance`] moves it onto index 0.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    /// Index of the current code point; -1 before the first advance.
    index: isize,
}

impl Cursor {
    /// Create a cursor positioned before the first code point of `pattern`
    pub fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            index: -1,
        }
    }

    fn at(&self, index: isize) -> Option<char> {
        if index < 0 {
            return None;
        }
        self.chars.get(index as usize).copied()
    }

    /// Code point under the cursor, or `None` when out of bounds
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.at(self.index)
    }

    /// Move one code point forward and return the new current one
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        if self.index < self.chars.len() as isize {
            self.index += 1;
        }
        self.current()
    }

    /// Code point after the current one
    #[inline]
    pub fn peek_next(&self) -> Option<char> {
        self.at(self.index + 1)
    }

    /// Code point before the current one; `None` at index 0
    #[inline]
    pub fn peek_previous(&self) -> Option<char> {
        if self.index <= 0 {
            return None;
        }
        self.at(self.index - 1)
    }

    /// Source position of the current code point, clamped to the pattern
    pub fn position(&self) -> SourcePosition {
        let offset = self.index.max(0) as usize;
        SourcePosition::from_offset(&self.chars, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_before_input() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek_next(), Some('a'));
        assert_eq!(cursor.peek_previous(), None);
    }

    #[test]
    fn test_cursor_advance_and_peek() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.peek_previous(), None);
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.peek_previous(), Some('a'));
        assert_eq!(cursor.peek_next(), Some('c'));
        assert_eq!(cursor.advance(), Some('c'));
        assert_eq!(cursor.peek_next(), None);
        assert_eq!(cursor.advance(), None);
        // Stays put once past the end
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.position().offset, 3);
    }

    #[test]
    fn test_cursor_code_points() {
        let mut cursor = Cursor::new("wąż");
        assert_eq!(cursor.advance(), Some('w'));
        assert_eq!(cursor.advance(), Some('ą'));
        assert_eq!(cursor.advance(), Some('ż'));
    }

    #[test]
    fn test_position_from_offset() {
        let chars: Vec<char> = "ab\ncd".chars().collect();
        let pos = SourcePosition::from_offset(&chars, 4);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 2);
        assert_eq!(pos.to_string(), "line 2, column 2");
    }
}
