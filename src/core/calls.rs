//! Translation call detection.
//!
//! Recognized call forms: `t(..)`, `$t(..)`, `this.$t(..)`, `i18n.t(..)`,
//! `i18n.global.t(..)` and `useTranslation().t(..)`, with a quoted key as the
//! first argument. `$t` may hang off any receiver (`vm.$t(..)`); a plain `t`
//! on any other receiver (`obj.t(..)`) is not a translation call.

use std::{collections::HashSet, ops::Range, sync::LazyLock};

use regex::Regex;

static CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(useTranslation\(\)\.t|i18n\.global\.t|i18n\.t|this\.\$t|\$t|\bt)\s*\(\s*(['"`])"#,
    )
    .unwrap()
});

static CALL_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w$])\$?t\s*\(").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCall {
    pub key: String,
    pub quote: char,
    /// Whole call expression, from the callee to the closing parenthesis.
    pub range: Range<usize>,
    /// Key text between the quotes.
    pub key_range: Range<usize>,
}

impl TranslationCall {
    pub fn start(&self) -> usize {
        self.range.start
    }
}

/// Find every translation call in `text`, in source order.
pub fn find_translation_calls(text: &str) -> Vec<TranslationCall> {
    let bytes = text.as_bytes();
    let mut calls = Vec::new();

    for caps in CALL_REGEX.captures_iter(text) {
        let (Some(whole), Some(callee), Some(quote)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let mut start = whole.start();
        if start > 0 {
            let before = bytes[start - 1];
            if before == b'.' && callee.as_str() == "$t" {
                start = receiver_start(bytes, start - 1);
            } else if is_ident_byte(before) || before == b'.' {
                continue;
            }
        }

        let quote_char = quote.as_str().as_bytes()[0];
        let key_start = whole.end();
        let Some(key_end) = closing_quote(bytes, key_start, quote_char) else {
            continue;
        };
        let key = &text[key_start..key_end];
        if key.is_empty() || (quote_char == b'`' && key.contains("${")) {
            continue;
        }

        let after_key = key_end + 1;
        let rest = &text[after_key..];
        let next = after_key + (rest.len() - rest.trim_start().len());
        let end = match bytes.get(next) {
            Some(b')') => next + 1,
            Some(b',') => matching_paren(bytes, next + 1).map(|p| p + 1).unwrap_or(after_key),
            _ => continue,
        };

        calls.push(TranslationCall {
            key: key.to_string(),
            quote: quote_char as char,
            range: start..end,
            key_range: key_start..key_end,
        });
    }

    calls
}

/// Distinct keys of every translation call, first-seen order.
pub fn translation_keys(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    find_translation_calls(text)
        .into_iter()
        .map(|call| call.key)
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Whether `text` contains something that looks like a `t(`/`$t(` call.
pub fn contains_translation_call(text: &str) -> bool {
    CALL_TOKEN_REGEX.is_match(text)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$')
}

/// Start of the member chain (`vm`, `this.proxy`) ending at the `.` at `dot`.
fn receiver_start(bytes: &[u8], dot: usize) -> usize {
    let mut pos = dot;
    while pos > 0 && (is_ident_byte(bytes[pos - 1]) || bytes[pos - 1] == b'.') {
        pos -= 1;
    }
    if pos == dot { dot + 1 } else { pos }
}

fn closing_quote(bytes: &[u8], from: usize, quote: u8) -> Option<usize> {
    let mut pos = from;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'\n' if quote != b'`' => return None,
            c if c == quote => return Some(pos),
            _ => pos += 1,
        }
    }
    None
}

/// Position of the `)` closing the argument list that continues at `from`.
fn matching_paren(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = from;
    while pos < bytes.len() {
        match bytes[pos] {
            q @ (b'\'' | b'"' | b'`') => {
                pos = closing_quote(bytes, pos + 1, q)? + 1;
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' if depth == 0 => return Some(pos),
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        pos += 1;
    }
    None
}
