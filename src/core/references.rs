//! Finding and rewriting references to a key in source documents.

use regex::Regex;
use tracing::{debug, warn};

use crate::core::{
    calls::{TranslationCall, find_translation_calls, translation_keys},
    document::{DocumentKind, SourceDocument},
    region::{RegionKind, i18n_block_keys, segment},
    rewrite::{Edit, rewrite},
};

/// Keys referenced by a document: translation calls, plus keys defined in
/// `<i18n>` blocks of component files.
pub fn keys_used_in(document: &SourceDocument) -> Vec<String> {
    let mut keys = translation_keys(&document.text);
    if document.kind == DocumentKind::Composite {
        for key in i18n_block_keys(&document.text) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

/// Documents referencing `key`.
pub fn find_key_references<'a>(documents: &'a [SourceDocument], key: &str) -> Vec<&'a SourceDocument> {
    documents
        .iter()
        .filter(|doc| keys_used_in(doc).iter().any(|k| k == key))
        .collect()
}

/// Replace every quoted occurrence of `old` with `new`, keeping each quote.
/// Returns `None` when nothing matched.
pub fn rename_key_in_text(text: &str, old: &str, new: &str) -> Option<String> {
    let escaped = regex::escape(old);
    let pattern = format!("'{0}'|\"{0}\"|`{0}`", escaped);
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => {
            warn!("cannot build rename pattern for '{}': {}", old, e);
            return None;
        }
    };
    if !regex.is_match(text) {
        return None;
    }
    let renamed = regex.replace_all(text, |caps: &regex::Captures| {
        let quote = &caps[0][..1];
        format!("{quote}{new}{quote}")
    });
    Some(renamed.into_owned())
}

/// Rename `old` to `new` in every document that references it.
///
/// Returns the rewritten documents; their count is the updated file count.
pub fn rename_references(documents: &[SourceDocument], old: &str, new: &str) -> Vec<SourceDocument> {
    find_key_references(documents, old)
        .into_iter()
        .filter_map(|doc| {
            let text = rename_key_in_text(&doc.text, old, new)?;
            Some(SourceDocument::with_kind(doc.path.clone(), text, doc.kind))
        })
        .collect()
}

fn double_quoted(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{}\"", escaped)
}

fn single_quoted(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n");
    format!("'{}'", escaped)
}

/// Whether `offset` is inside an open `{{ ... }}` of `content`.
fn inside_interpolation(content: &str, offset: usize) -> bool {
    let before = &content[..offset];
    match (before.rfind("{{"), before.rfind("}}")) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Quote of the attribute value enclosing `offset`, if `offset` is inside a tag.
fn enclosing_attribute_quote(content: &str, offset: usize) -> Option<char> {
    let before = &content[..offset];
    let tag_start = before.rfind('<')?;
    if before.rfind('>').is_some_and(|close| close > tag_start) {
        return None;
    }
    let mut open: Option<char> = None;
    for c in before[tag_start..].chars() {
        match (open, c) {
            (None, '"' | '\'') => open = Some(c),
            (Some(q), c) if c == q => open = None,
            _ => {}
        }
    }
    open
}

/// Literal replacing a template-region call at `local` in `template`.
fn template_literal(template: &str, local: usize, literal: &str) -> String {
    if inside_interpolation(template, local) {
        return double_quoted(literal);
    }
    match enclosing_attribute_quote(template, local) {
        Some('"') => single_quoted(literal),
        Some(_) => double_quoted(literal),
        None => format!("{{{{ {} }}}}", double_quoted(literal)),
    }
}

/// Whether the call is the only content of a `{ ... }` expression container.
fn sole_expression(text: &str, call: &TranslationCall) -> bool {
    text[..call.range.start].trim_end().ends_with('{')
        && text[call.range.end..].trim_start().starts_with('}')
}

/// Source text replacing `call` in `document`.
fn literal_for_call(document: &SourceDocument, call: &TranslationCall, literal: &str) -> String {
    match document.kind {
        DocumentKind::ComponentScript if !sole_expression(&document.text, call) => {
            format!("{{{}}}", double_quoted(literal))
        }
        DocumentKind::Composite => {
            let regions = segment(&document.text, document.kind);
            let template = regions
                .iter()
                .find(|r| r.kind == RegionKind::Template && r.contains(call.range.start));
            match template {
                Some(region) => template_literal(
                    &region.content,
                    call.range.start - region.offset_in_parent,
                    literal,
                ),
                None => double_quoted(literal),
            }
        }
        _ => double_quoted(literal),
    }
}

/// Replace every call-style reference to `key` in `document` with `literal`.
/// Returns `None` when the document has no such call.
pub fn inline_key_in_document(document: &SourceDocument, key: &str, literal: &str) -> Option<String> {
    let edits: Vec<Edit> = find_translation_calls(&document.text)
        .iter()
        .filter(|call| call.key == key)
        .map(|call| Edit::new(call.range.clone(), literal_for_call(document, call, literal)))
        .collect();
    if edits.is_empty() {
        return None;
    }
    match rewrite(&document.text, &edits) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("skipping {}: {}", document.path, e);
            None
        }
    }
}

/// Inline `literal` in place of `key` across documents.
///
/// Returns the rewritten documents; their count is the updated file count.
pub fn replace_references_with_literal(
    documents: &[SourceDocument],
    key: &str,
    literal: &str,
) -> Vec<SourceDocument> {
    let updated: Vec<SourceDocument> = find_key_references(documents, key)
        .into_iter()
        .filter_map(|doc| {
            let text = inline_key_in_document(doc, key, literal)?;
            Some(SourceDocument::with_kind(doc.path.clone(), text, doc.kind))
        })
        .collect();
    debug!(key, files = updated.len(), "inlined key");
    updated
}
