//! Script tokenizer and the scanner for script regions.
//!
//! The tokenizer walks JavaScript/TypeScript source and returns every string
//! literal it finds, skipping comments and regex literals so their contents
//! are never mistaken for strings.

use std::ops::Range;

use super::{Candidate, RegionScanner, ScanOptions, filters};
use crate::core::span::TextKind;

/// Keywords after which a `/` starts a regex literal rather than a division.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "case",
    "do",
    "else",
    "in",
    "of",
    "void",
    "yield",
    "await",
    "delete",
    "instanceof",
    "new",
];

/// Punctuation after which a `/` starts a regex literal.
const REGEX_PRECEDING_PUNCT: &[u8] = b"(,=:[!&|?{};+-*%<>~^";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    /// Byte range including the delimiters.
    pub range: Range<usize>,
    pub quote: char,
    /// Template literal containing `${...}`.
    pub interpolated: bool,
}

impl StringLiteral {
    /// Byte range between the delimiters.
    pub fn inner(&self) -> Range<usize> {
        self.range.start + 1..self.range.end - 1
    }
}

/// Collect every terminated string literal in `content`.
///
/// Unterminated literals (a bare newline or end of input before the closing
/// quote) are dropped and scanning resumes after them.
pub fn string_literals(content: &str) -> Vec<StringLiteral> {
    let bytes = content.as_bytes();
    let mut literals = Vec::new();
    let mut pos = 0;
    // Last significant byte and its position, for the regex heuristic.
    let mut prev: Option<(u8, usize)> = None;

    while pos < bytes.len() {
        let c = bytes[pos];
        match c {
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                pos = content[pos..]
                    .find('\n')
                    .map(|i| pos + i)
                    .unwrap_or(bytes.len());
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                pos = content[pos + 2..]
                    .find("*/")
                    .map(|i| pos + 2 + i + 2)
                    .unwrap_or(bytes.len());
            }
            b'/' if regex_allowed(content, prev) => match skip_regex(bytes, pos) {
                Some(end) => {
                    prev = Some((b'/', end - 1));
                    pos = end;
                }
                None => {
                    prev = Some((c, pos));
                    pos += 1;
                }
            },
            b'\'' | b'"' => {
                match scan_quoted(bytes, pos, c) {
                    Some(end) => {
                        literals.push(StringLiteral {
                            range: pos..end,
                            quote: c as char,
                            interpolated: false,
                        });
                        prev = Some((c, end - 1));
                        pos = end;
                    }
                    None => {
                        // Resume at the line break that ended the literal.
                        pos = content[pos..]
                            .find('\n')
                            .map(|i| pos + i)
                            .unwrap_or(bytes.len());
                    }
                }
            }
            b'`' => match scan_template(bytes, pos) {
                Some((end, interpolated)) => {
                    literals.push(StringLiteral {
                        range: pos..end,
                        quote: '`',
                        interpolated,
                    });
                    prev = Some((c, end - 1));
                    pos = end;
                }
                None => pos = bytes.len(),
            },
            c if c.is_ascii_whitespace() => pos += 1,
            _ => {
                prev = Some((c, pos));
                pos += 1;
            }
        }
    }

    literals
}

fn is_ident_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

fn regex_allowed(content: &str, prev: Option<(u8, usize)>) -> bool {
    let Some((c, at)) = prev else {
        return true;
    };
    if REGEX_PRECEDING_PUNCT.contains(&c) {
        return true;
    }
    if !is_ident_byte(c) {
        return false;
    }
    let bytes = content.as_bytes();
    let mut start = at;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    REGEX_PRECEDING_KEYWORDS.contains(&&content[start..=at])
}

/// End (exclusive) of a regex literal starting at `start`, flags included.
fn skip_regex(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start + 1;
    let mut in_class = false;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'\n' => return None,
            b'[' => {
                in_class = true;
                pos += 1;
            }
            b']' => {
                in_class = false;
                pos += 1;
            }
            b'/' if !in_class => {
                pos += 1;
                while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                    pos += 1;
                }
                return Some(pos);
            }
            _ => pos += 1,
        }
    }
    None
}

/// End (exclusive) of a `'` or `"` literal starting at `start`.
fn scan_quoted(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'\n' => return None,
            c if c == quote => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

/// End (exclusive) of a template literal starting at `start`, and whether it
/// contains a substitution.
fn scan_template(bytes: &[u8], start: usize) -> Option<(usize, bool)> {
    let mut pos = start + 1;
    let mut depth = 0usize;
    let mut interpolated = false;
    while pos < bytes.len() {
        let c = bytes[pos];
        if depth == 0 {
            match c {
                b'\\' => pos += 2,
                b'`' => return Some((pos + 1, interpolated)),
                b'$' if bytes.get(pos + 1) == Some(&b'{') => {
                    interpolated = true;
                    depth = 1;
                    pos += 2;
                }
                _ => pos += 1,
            }
            continue;
        }
        match c {
            b'{' => {
                depth += 1;
                pos += 1;
            }
            b'}' => {
                depth -= 1;
                pos += 1;
            }
            b'\'' | b'"' => pos = scan_quoted(bytes, pos, c)?,
            b'`' => pos = scan_template(bytes, pos)?.0,
            _ => pos += 1,
        }
    }
    None
}

/// Whether the literal at `start` is the first argument of a `t(` call.
///
/// `t` must not be the tail of a longer identifier (`split(`), but may follow
/// `$` or `.` (`$t(`, `this.$t(`, `i18n.t(`).
pub(crate) fn preceded_by_translation_call(content: &str, start: usize) -> bool {
    let before = content[..start].trim_end();
    let Some(before) = before.strip_suffix('(') else {
        return false;
    };
    let before = before.trim_end();
    let Some(before) = before.strip_suffix('t') else {
        return false;
    };
    match before.as_bytes().last() {
        None => true,
        Some(b'$') | Some(b'.') => true,
        Some(&c) => !(c.is_ascii_alphanumeric() || c == b'_'),
    }
}

/// Whether the literal ending at `end` is followed by `)` and then `,` or a
/// backtick, the shape of a call argument already embedded in a larger
/// expression.
fn followed_by_call_close(content: &str, end: usize) -> bool {
    let after = content[end..].trim_start();
    let Some(after) = after.strip_prefix(')') else {
        return false;
    };
    let after = after.trim_start();
    after.starts_with(',') || after.starts_with('`')
}

/// Whether the literal at `start` is a module specifier
/// (`from '...'`, `import '...'`, `require('...')`, `import('...')`).
fn is_module_specifier(content: &str, start: usize) -> bool {
    let before = content[..start].trim_end();
    if let Some(call) = before.strip_suffix('(') {
        let call = call.trim_end();
        return ends_with_word(call, "require") || ends_with_word(call, "import");
    }
    ends_with_word(before, "from") || ends_with_word(before, "import")
}

fn ends_with_word(text: &str, word: &str) -> bool {
    text.strip_suffix(word)
        .is_some_and(|rest| !rest.as_bytes().last().copied().is_some_and(is_ident_byte))
}

/// Scanner for script regions and plain script files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptScanner;

impl RegionScanner for ScriptScanner {
    fn name(&self) -> &'static str {
        "script"
    }

    fn scan(&self, content: &str, _options: &ScanOptions) -> Vec<Candidate> {
        string_literals(content)
            .into_iter()
            .filter(|literal| !literal.interpolated)
            .filter(|literal| !preceded_by_translation_call(content, literal.range.start))
            .filter(|literal| !followed_by_call_close(content, literal.range.end))
            .filter(|literal| !is_module_specifier(content, literal.range.start))
            .filter_map(|literal| {
                let inner = literal.inner();
                let text = &content[inner.clone()];
                let trimmed = text.trim();
                if !filters::passes_shared_rules(trimmed)
                    || filters::is_identifier(trimmed)
                    || filters::is_path_or_url(trimmed)
                {
                    return None;
                }
                Some(Candidate {
                    kind: TextKind::ScriptStringLiteral,
                    text: text.to_string(),
                    range: inner,
                    replace_range: literal.range,
                    attribute_name: None,
                })
            })
            .collect()
    }
}
