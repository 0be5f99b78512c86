//! Key planning and replacement of hardcoded text with translation calls.

use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;
use tracing::warn;

use crate::core::{
    rewrite::{Edit, RewriteError, rewrite},
    span::{SpanId, TextKind, TextSpan},
};

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A planned replacement of one span by a translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub span_id: SpanId,
    pub key: String,
    /// Value to store under `key`.
    pub text: String,
    pub replacement: String,
}

/// Escape a key for use inside a single-quoted literal.
fn quote_key(key: &str) -> String {
    format!("'{}'", key.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Source text replacing `span.replace_range`.
pub fn replacement_for(span: &TextSpan, key: &str) -> String {
    let key = quote_key(key);
    match span.kind {
        TextKind::MarkupAttributeValue => {
            let name = span.attribute_name.as_deref().unwrap_or("title");
            format!(":{}=\"$t({})\"", name, key)
        }
        TextKind::PlainMarkupText => format!("{{{{ $t({}) }}}}", key),
        TextKind::ScriptStringLiteral => format!("t({})", key),
    }
}

/// Derive a key from literal text.
///
/// Tags are stripped, `.` removed (it separates key segments), whitespace
/// collapsed, and the optional prefix prepended as a namespace.
pub fn derive_key(text: &str, prefix: Option<&str>) -> String {
    let stripped = TAG_REGEX.replace_all(text, "");
    let without_dots = stripped.replace('.', "");
    let collapsed = WHITESPACE_REGEX.replace_all(&without_dots, " ");
    let key = collapsed.trim();
    match prefix.map(str::trim).filter(|p| !p.is_empty() && !key.is_empty()) {
        Some(prefix) => format!("{}.{}", prefix.trim_end_matches('.'), key),
        None => key.to_string(),
    }
}

/// Plan one extraction per span, skipping spans whose text yields no key.
pub fn plan_extraction(spans: &[TextSpan], prefix: Option<&str>) -> Vec<Extraction> {
    spans
        .iter()
        .filter_map(|span| {
            let key = derive_key(&span.text, prefix);
            if key.is_empty() {
                return None;
            }
            Some(Extraction {
                span_id: span.id,
                replacement: replacement_for(span, &key),
                text: span.text.trim().to_string(),
                key,
            })
        })
        .collect()
}

/// Distinct `(key, text)` pairs of a plan, first occurrence wins.
pub fn planned_messages(plan: &[Extraction]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    plan.iter()
        .filter(|e| seen.insert(e.key.as_str()))
        .map(|e| (e.key.clone(), e.text.clone()))
        .collect()
}

/// Rewrite `text`, replacing every planned span.
///
/// Plan entries are matched to spans by id; entries naming an unknown span
/// are skipped.
pub fn apply_extraction(
    text: &str,
    spans: &[TextSpan],
    plan: &[Extraction],
) -> Result<String, RewriteError> {
    let by_id: HashMap<SpanId, &TextSpan> = spans.iter().map(|s| (s.id, s)).collect();
    let edits: Vec<Edit> = plan
        .iter()
        .filter_map(|extraction| match by_id.get(&extraction.span_id) {
            Some(span) => Some(Edit::new(
                span.replace_range.clone(),
                extraction.replacement.clone(),
            )),
            None => {
                warn!(span = %extraction.span_id, "no span for planned extraction");
                None
            }
        })
        .collect();
    rewrite(text, &edits)
}
