//! Fallback scanner for documents of unrecognized kind.

use std::sync::LazyLock;

use regex::Regex;

use super::{Candidate, RegionScanner, ScanOptions, filters, markup::trimmed_range};
use crate::core::{calls::contains_translation_call, span::TextKind};

static DOUBLE_QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\\\n]*(?:\\.[^"\\\n]*)*)""#).unwrap());

static SINGLE_QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^'\\\n]*(?:\\.[^'\\\n]*)*)'").unwrap());

/// Reports double-quoted strings first, then single-quoted ones that do not
/// overlap an accepted double-quoted string.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericScanner;

impl RegionScanner for GenericScanner {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn scan(&self, content: &str, _options: &ScanOptions) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = Vec::new();
        for regex in [&*DOUBLE_QUOTED_REGEX, &*SINGLE_QUOTED_REGEX] {
            let accepted = candidates.len();
            for caps in regex.captures_iter(content) {
                let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let overlaps = candidates[..accepted].iter().any(|c| {
                    whole.start() < c.replace_range.end && c.replace_range.start < whole.end()
                });
                if overlaps {
                    continue;
                }
                let text = inner.as_str();
                if !filters::passes_shared_rules(text) || contains_translation_call(text) {
                    continue;
                }
                let range = trimmed_range(content, inner.range());
                candidates.push(Candidate {
                    kind: TextKind::ScriptStringLiteral,
                    text: content[range.clone()].to_string(),
                    range,
                    replace_range: whole.range(),
                    attribute_name: None,
                });
            }
        }
        candidates
    }
}
