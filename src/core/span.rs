//! Located text candidates.

use std::{fmt, ops::Range};

use crate::core::position::Position;

/// Identifier assigned to a span when it is detected.
///
/// Unique within one scan of one document. Downstream steps (key planning,
/// rewriting) correlate back to spans through this id instead of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpanId(pub u32);

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextKind {
    /// Free text between markup tags.
    PlainMarkupText,
    /// Value of an allow-listed markup attribute.
    MarkupAttributeValue,
    /// Quoted string literal in script code.
    ScriptStringLiteral,
}

impl TextKind {
    pub fn is_markup(&self) -> bool {
        matches!(
            self,
            TextKind::PlainMarkupText | TextKind::MarkupAttributeValue
        )
    }
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextKind::PlainMarkupText => write!(f, "text"),
            TextKind::MarkupAttributeValue => write!(f, "attribute"),
            TextKind::ScriptStringLiteral => write!(f, "string"),
        }
    }
}

/// A hardcoded text candidate located in its owning document.
///
/// `start`/`end`/`range` address exactly `text` in the parent document.
/// `replace_range` is the part of the document a rewrite replaces: the same as
/// `range` for markup text, the whole `name="value"` attribute for attribute
/// values, and the literal including its quotes for script strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub id: SpanId,
    pub kind: TextKind,
    pub text: String,
    pub start: Position,
    pub end: Position,
    /// Byte range of `text` in the parent document.
    pub range: Range<usize>,
    /// Byte range replaced when this span is rewritten.
    pub replace_range: Range<usize>,
    /// Attribute name for `MarkupAttributeValue` spans.
    pub attribute_name: Option<String>,
}

impl TextSpan {
    /// Whether this span intersects the inclusive position range `[from, to]`.
    pub fn intersects(&self, from: Position, to: Position) -> bool {
        !(self.end < from || to < self.start)
    }
}
