//! Markup tokenizer and the scanner for template/HTML regions.
//!
//! The tokenizer splits markup into text runs, tags (with parsed attributes),
//! comments and raw-text element bodies (`<script>`/`<style>` inside HTML).
//! It is lexical only: no tree is built and unbalanced tags are fine.

use std::ops::Range;

use super::{Candidate, RegionScanner, ScanOptions, filters};
use crate::core::span::TextKind;

/// Elements whose content is not markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    /// Byte range inside the quotes (or of the bare value).
    pub range: Range<usize>,
    pub quote: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Byte range of the whole attribute, from name start to value end.
    pub range: Range<usize>,
    pub value: Option<AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    Text {
        range: Range<usize>,
        /// Preceded by the end of a tag (or the region start when bounded).
        after_tag: bool,
        /// Followed by the start of a tag (or the region end when bounded).
        before_tag: bool,
    },
    Tag {
        range: Range<usize>,
        name: String,
        closing: bool,
        attributes: Vec<Attribute>,
    },
    Comment {
        range: Range<usize>,
    },
    RawText {
        range: Range<usize>,
    },
}

/// Tokenize markup.
///
/// With `bounded`, the region start and end count as tag boundaries (the
/// region is the inside of an element such as `<template>`). An unterminated
/// tag ends tokenization; everything before it is still returned.
pub fn tokenize(content: &str, bounded: bool) -> Vec<MarkupToken> {
    let bytes = content.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;
    let mut after_tag = bounded;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }

        if content[pos..].starts_with("<!--") {
            push_text(&mut tokens, text_start..pos, after_tag, true);
            let end = content[pos + 4..]
                .find("-->")
                .map(|i| pos + 4 + i + 3)
                .unwrap_or(bytes.len());
            tokens.push(MarkupToken::Comment { range: pos..end });
            pos = end;
            text_start = pos;
            after_tag = true;
            continue;
        }

        let Some(tag) = parse_tag(content, pos) else {
            // A bare `<` (e.g. `a < b`) stays part of the text run.
            if starts_tag(bytes, pos) {
                // Unterminated tag: stop here.
                push_text(&mut tokens, text_start..pos, after_tag, false);
                return tokens;
            }
            pos += 1;
            continue;
        };

        push_text(&mut tokens, text_start..pos, after_tag, true);
        let tag_end = tag.range.end;
        let raw_element = (!tag.closing && !tag.self_closing)
            .then(|| tag.name.to_ascii_lowercase())
            .filter(|name| RAW_TEXT_ELEMENTS.contains(&name.as_str()));
        tokens.push(MarkupToken::Tag {
            range: tag.range,
            name: tag.name,
            closing: tag.closing,
            attributes: tag.attributes,
        });
        pos = tag_end;
        text_start = pos;
        after_tag = true;

        if let Some(name) = raw_element {
            let close = format!("</{}", name);
            let raw_end = content[pos..]
                .to_ascii_lowercase()
                .find(&close)
                .map(|i| pos + i)
                .unwrap_or(bytes.len());
            if raw_end > pos {
                tokens.push(MarkupToken::RawText { range: pos..raw_end });
            }
            pos = raw_end;
            text_start = pos;
        }
    }

    push_text(&mut tokens, text_start..bytes.len(), after_tag, bounded);
    tokens
}

fn push_text(tokens: &mut Vec<MarkupToken>, range: Range<usize>, after_tag: bool, before_tag: bool) {
    if range.is_empty() {
        return;
    }
    tokens.push(MarkupToken::Text {
        range,
        after_tag,
        before_tag,
    });
}

/// `<` followed by something that can only be the start of a tag.
fn starts_tag(bytes: &[u8], pos: usize) -> bool {
    match bytes.get(pos + 1) {
        Some(b'/') | Some(b'!') => true,
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    }
}

struct ParsedTag {
    range: Range<usize>,
    name: String,
    closing: bool,
    self_closing: bool,
    attributes: Vec<Attribute>,
}

fn is_name_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'_' | b':' | b'.')
}

fn parse_tag(content: &str, start: usize) -> Option<ParsedTag> {
    let bytes = content.as_bytes();
    let mut pos = start + 1;

    // `<!DOCTYPE ...>` and similar declarations carry no attributes.
    if bytes.get(pos) == Some(&b'!') {
        let end = content[pos..].find('>')? + pos + 1;
        return Some(ParsedTag {
            range: start..end,
            name: String::from("!"),
            closing: false,
            self_closing: true,
            attributes: Vec::new(),
        });
    }

    let closing = bytes.get(pos) == Some(&b'/');
    if closing {
        pos += 1;
    }
    if !bytes.get(pos)?.is_ascii_alphabetic() {
        return None;
    }
    let name_start = pos;
    while pos < bytes.len() && is_name_byte(bytes[pos]) {
        pos += 1;
    }
    let name = content[name_start..pos].to_string();

    let mut attributes = Vec::new();
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        match bytes.get(pos)? {
            b'>' => {
                return Some(ParsedTag {
                    range: start..pos + 1,
                    name,
                    closing,
                    self_closing: false,
                    attributes,
                });
            }
            b'/' if bytes.get(pos + 1) == Some(&b'>') => {
                return Some(ParsedTag {
                    range: start..pos + 2,
                    name,
                    closing,
                    self_closing: true,
                    attributes,
                });
            }
            _ => {}
        }

        let attr_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>' | b'"' | b'\'')
            && !(bytes[pos] == b'/' && bytes.get(pos + 1) == Some(&b'>'))
        {
            pos += 1;
        }
        if pos == attr_start {
            // Stray quote or `=`; skip it.
            pos += 1;
            continue;
        }
        let attr_name = content[attr_start..pos].to_string();

        let mut lookahead = pos;
        while lookahead < bytes.len() && bytes[lookahead].is_ascii_whitespace() {
            lookahead += 1;
        }
        if bytes.get(lookahead) != Some(&b'=') {
            attributes.push(Attribute {
                name: attr_name,
                range: attr_start..pos,
                value: None,
            });
            continue;
        }
        pos = lookahead + 1;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let value = match bytes.get(pos)? {
            quote @ (b'"' | b'\'') => {
                let value_start = pos + 1;
                let value_end = value_start + content[value_start..].find(*quote as char)?;
                pos = value_end + 1;
                AttributeValue {
                    range: value_start..value_end,
                    quote: Some(*quote as char),
                }
            }
            _ => {
                let value_start = pos;
                while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>' {
                    pos += 1;
                }
                AttributeValue {
                    range: value_start..pos,
                    quote: None,
                }
            }
        };
        attributes.push(Attribute {
            name: attr_name,
            range: attr_start..pos,
            value: Some(value),
        });
    }
}

/// Scanner for template and HTML regions.
///
/// Reports free text between tags (skipping runs that contain `{{`
/// interpolation) and then the quoted values of allow-listed attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupScanner {
    /// Region edges count as tag boundaries (template blocks).
    pub bounded: bool,
}

impl MarkupScanner {
    pub fn bounded() -> Self {
        Self { bounded: true }
    }
}

impl RegionScanner for MarkupScanner {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn scan(&self, content: &str, options: &ScanOptions) -> Vec<Candidate> {
        let tokens = tokenize(content, self.bounded);
        let mut candidates = Vec::new();

        for token in &tokens {
            if let MarkupToken::Text {
                range,
                after_tag: true,
                before_tag: true,
            } = token
            {
                let raw = &content[range.clone()];
                if raw.contains("{{") || !filters::passes_shared_rules(raw) {
                    continue;
                }
                let trimmed = trimmed_range(content, range.clone());
                candidates.push(Candidate {
                    kind: TextKind::PlainMarkupText,
                    text: content[trimmed.clone()].to_string(),
                    range: trimmed.clone(),
                    replace_range: trimmed,
                    attribute_name: None,
                });
            }
        }

        for wanted in &options.attribute_names {
            for token in &tokens {
                let MarkupToken::Tag {
                    attributes,
                    closing: false,
                    ..
                } = token
                else {
                    continue;
                };
                for attr in attributes {
                    if !attr.name.eq_ignore_ascii_case(wanted) {
                        continue;
                    }
                    let Some(value) = attr.value.as_ref().filter(|v| v.quote.is_some()) else {
                        continue;
                    };
                    let raw = &content[value.range.clone()];
                    if filters::starts_with_binding(raw) || !filters::passes_shared_rules(raw) {
                        continue;
                    }
                    let trimmed = trimmed_range(content, value.range.clone());
                    candidates.push(Candidate {
                        kind: TextKind::MarkupAttributeValue,
                        text: content[trimmed.clone()].to_string(),
                        range: trimmed,
                        replace_range: attr.range.clone(),
                        attribute_name: Some(wanted.clone()),
                    });
                }
            }
        }

        candidates
    }
}

/// Narrow a range to exclude leading and trailing whitespace.
pub(crate) fn trimmed_range(content: &str, range: Range<usize>) -> Range<usize> {
    let slice = &content[range.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if leading == slice.len() {
        return range.start..range.start;
    }
    range.start + leading..range.end - trailing
}
