//! Offset <-> (line, column) conversion.
//!
//! Offsets are byte offsets into a `&str`. Columns are counted in UTF-16 code
//! units, which is how editors address text, so a position produced here can be
//! handed to an editor unchanged.

use std::fmt;

/// Zero-based line/column position. `column` counts UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Pre-computed line starts for repeated lookups on the same buffer.
///
/// Building the index is O(n); each lookup is a binary search over line starts
/// plus a UTF-16 count of the current line prefix.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { text, line_starts }
    }

    /// Convert a byte offset into a position.
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a
    /// multi-byte character floor to the start of that character.
    pub fn position(&self, offset: usize) -> Position {
        let offset = floor_char_boundary(self.text, offset.min(self.text.len()));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.text[line_start..offset].encode_utf16().count();
        Position { line, column }
    }

    /// Convert a position back into a byte offset.
    ///
    /// Returns `None` when the line does not exist, the column runs past the end
    /// of the line, or the column splits a surrogate pair.
    pub fn offset(&self, position: Position) -> Option<usize> {
        let line_start = *self.line_starts.get(position.line)?;
        let line_end = self
            .line_starts
            .get(position.line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());

        let mut units = 0;
        for (i, c) in self.text[line_start..line_end].char_indices() {
            if units == position.column {
                return Some(line_start + i);
            }
            units += c.len_utf16();
            if units > position.column {
                return None;
            }
        }
        (units == position.column).then_some(line_end)
    }

    /// Text of the given line without its trailing newline.
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        Some(self.text[start..end].trim_end_matches('\r'))
    }
}

/// One-shot conversion for callers that only need a single position.
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    LineIndex::new(text).position(offset)
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
