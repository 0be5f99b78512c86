//! Region segmentation of mixed-syntax documents.
//!
//! A component file is split into its `<template>`, `<script>` and `<style>`
//! blocks; every other document kind is a single `Whole` region. Regions copy
//! their content and remember where it starts in the parent buffer, so offsets
//! found inside a region translate back with `offset_in_parent + local_offset`.

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::document::DocumentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Template,
    Script,
    Style,
    Whole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    /// Content between the block delimiters (the whole buffer for `Whole`).
    pub content: String,
    /// Byte offset of the first content character in the parent buffer.
    pub offset_in_parent: usize,
}

impl Region {
    pub fn new(kind: RegionKind, content: impl Into<String>, offset_in_parent: usize) -> Self {
        Self {
            kind,
            content: content.into(),
            offset_in_parent,
        }
    }

    /// Byte range covered by this region in the parent buffer.
    pub fn parent_range(&self) -> std::ops::Range<usize> {
        self.offset_in_parent..self.offset_in_parent + self.content.len()
    }

    pub fn contains(&self, parent_offset: usize) -> bool {
        self.parent_range().contains(&parent_offset)
    }
}

/// A located block: content byte range plus the range of the whole element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    content_start: usize,
    content_end: usize,
    end: usize,
}

/// Split a document into typed regions.
///
/// Never fails: missing or unterminated blocks simply produce no region.
pub fn segment(document: &str, kind: DocumentKind) -> Vec<Region> {
    if kind != DocumentKind::Composite {
        return vec![Region::new(RegionKind::Whole, document, 0)];
    }

    let mut regions = Vec::new();

    match find_block(document, "template", 0, true) {
        Some(block) => regions.push(block_region(document, RegionKind::Template, block)),
        None => debug!("no <template> block found"),
    }

    match find_block(document, "script", 0, false) {
        Some(block) => regions.push(block_region(document, RegionKind::Script, block)),
        None => debug!("no <script> block found"),
    }

    let mut from = 0;
    while let Some(block) = find_block(document, "style", from, false) {
        trace!(offset = block.content_start, "found <style> block");
        regions.push(block_region(document, RegionKind::Style, block));
        from = block.end;
    }

    regions
}

/// Keys defined in `<i18n>` custom blocks of a component document.
///
/// Block content is JSON of the shape `{ "<locale>": { nested keys } }`.
/// Blocks that fail to parse are skipped.
pub fn i18n_block_keys(document: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut from = 0;
    while let Some(block) = find_block(document, "i18n", from, false) {
        from = block.end;
        let content = document[block.content_start..block.content_end].trim();
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(locales)) => {
                for messages in locales.values() {
                    collect_leaf_keys(messages, String::new(), &mut keys);
                }
            }
            Ok(_) => debug!("<i18n> block is not an object, skipped"),
            Err(e) => debug!("failed to parse <i18n> block: {}", e),
        }
    }
    let mut seen = std::collections::HashSet::new();
    keys.retain(|k| seen.insert(k.clone()));
    keys
}

fn collect_leaf_keys(value: &Value, prefix: String, keys: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_leaf_keys(child, full, keys);
            }
        }
        Value::String(_) if !prefix.is_empty() => keys.push(prefix),
        _ => {}
    }
}

fn block_region(document: &str, kind: RegionKind, block: Block) -> Region {
    Region::new(
        kind,
        &document[block.content_start..block.content_end],
        block.content_start,
    )
}

/// Locate the first `<tag ...>...</tag>` pair at or after `from`.
///
/// Tag names match case-insensitively. With `bare_open` the opening tag must be
/// exactly `<tag>`; otherwise attributes are allowed (`<script setup lang="ts">`).
fn find_block(document: &str, tag: &str, from: usize, bare_open: bool) -> Option<Block> {
    let lower = document.to_ascii_lowercase();
    let open_pattern = format!("<{}", tag);
    let close_pattern = format!("</{}>", tag);

    let mut search = from;
    loop {
        let open_start = search + lower.get(search..)?.find(&open_pattern)?;
        let after_name = open_start + open_pattern.len();
        let next = lower.as_bytes().get(after_name).copied();

        let content_start = match next {
            Some(b'>') => after_name + 1,
            Some(c) if !bare_open && (c.is_ascii_whitespace() || c == b'/') => {
                after_name + lower[after_name..].find('>')? + 1
            }
            // `<templates`, `<script-foo`, or an attribute where none is allowed
            _ => {
                search = after_name;
                continue;
            }
        };

        let close_rel = lower[content_start..].find(&close_pattern)?;
        let content_end = content_start + close_rel;
        return Some(Block {
            content_start,
            content_end,
            end: content_end + close_pattern.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::core::region::*;

    const SFC: &str = r#"<template>
  <div title="Hi">Hello</div>
</template>

<script setup lang="ts">
const msg = "Welcome";
</script>

<style scoped>
.a { color: red; }
</style>
<style>
.b { content: "x"; }
</style>
"#;

    #[test]
    fn test_non_composite_is_whole() {
        let regions = segment("const a = 'x';", DocumentKind::Script);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, RegionKind::Whole);
        assert_eq!(regions[0].offset_in_parent, 0);
        assert_eq!(regions[0].content, "const a = 'x';");
    }

    #[test]
    fn test_segment_component() {
        let regions = segment(SFC, DocumentKind::Composite);
        let kinds: Vec<RegionKind> = regions.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RegionKind::Template,
                RegionKind::Script,
                RegionKind::Style,
                RegionKind::Style
            ]
        );
    }

    #[test]
    fn test_region_offsets_point_into_parent() {
        let regions = segment(SFC, DocumentKind::Composite);
        for region in &regions {
            let start = region.offset_in_parent;
            assert_eq!(&SFC[start..start + region.content.len()], region.content);
        }
        let script = regions.iter().find(|r| r.kind == RegionKind::Script).unwrap();
        assert!(script.content.contains("const msg"));
        assert!(!script.content.contains("<script"));
    }

    #[test]
    fn test_template_match_is_case_insensitive() {
        let doc = "<TEMPLATE><p>Hi there</p></Template>";
        let regions = segment(doc, DocumentKind::Composite);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, RegionKind::Template);
        assert_eq!(regions[0].content, "<p>Hi there</p>");
        assert_eq!(regions[0].offset_in_parent, 10);
    }

    #[test]
    fn test_only_first_template_and_script() {
        let doc = "<template>A</template><template>B</template><script>1</script><script>2</script>";
        let regions = segment(doc, DocumentKind::Composite);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].content, "A");
        assert_eq!(regions[1].content, "1");
    }

    #[test]
    fn test_template_with_attributes_is_not_matched() {
        let doc = r#"<template lang="pug">div Hi</template>"#;
        let regions = segment(doc, DocumentKind::Composite);
        assert!(regions.is_empty());
    }

    #[test]
    fn test_unterminated_blocks_are_skipped() {
        let doc = "<template><div>Open\n<script>const a = 1;";
        let regions = segment(doc, DocumentKind::Composite);
        assert!(regions.is_empty());
    }

    #[test]
    fn test_missing_blocks_yield_no_regions() {
        let regions = segment("<style>.a{}</style>", DocumentKind::Composite);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, RegionKind::Style);
    }

    #[test]
    fn test_region_contains() {
        let region = Region::new(RegionKind::Template, "abc", 10);
        assert!(region.contains(10));
        assert!(region.contains(12));
        assert!(!region.contains(13));
        assert!(!region.contains(9));
    }

    #[test]
    fn test_i18n_block_keys() {
        let doc = r#"<template><p>{{ $t('hello') }}</p></template>
<i18n lang="json">
{ "en": { "hello": "Hello", "nav": { "home": "Home" } }, "zh": { "hello": "你好" } }
</i18n>
<i18n>{ not json }</i18n>"#;
        let keys = i18n_block_keys(doc);
        assert_eq!(keys, vec!["hello", "nav.home"]);
    }
}
