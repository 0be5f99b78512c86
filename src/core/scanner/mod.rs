//! Hardcoded text detection.
//!
//! A document is segmented into regions, each region is scanned by the
//! scanner for its kind, and the region-local candidates are located in the
//! parent document and numbered.

pub mod filters;
pub mod generic;
pub mod markup;
pub mod script;
pub mod style;

use std::{collections::HashSet, ops::Range, path::Path};

use enum_dispatch::enum_dispatch;
use tracing::debug;

pub use generic::GenericScanner;
pub use markup::MarkupScanner;
pub use script::ScriptScanner;
pub use style::StyleScanner;

use crate::core::{
    document::{DocumentKind, SourceDocument, file_extension},
    position::{LineIndex, Position},
    region::{Region, RegionKind, segment},
    span::{SpanId, TextKind, TextSpan},
};

pub const DEFAULT_ATTRIBUTE_NAMES: &[&str] = &["title", "alt", "placeholder", "content", "description"];

pub const DEFAULT_FILE_KINDS: &[&str] = &[
    "vue", "js", "ts", "jsx", "tsx", "html", "htm", "css", "scss", "less",
];

/// Parameters of a scan, resolved by the caller from project configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Markup attributes whose literal values are reported.
    pub attribute_names: Vec<String>,
    /// File extensions eligible for scanning.
    pub file_kinds: Vec<String>,
    /// Report each distinct text at most once per region.
    pub dedupe: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            attribute_names: DEFAULT_ATTRIBUTE_NAMES.iter().map(|s| s.to_string()).collect(),
            file_kinds: DEFAULT_FILE_KINDS.iter().map(|s| s.to_string()).collect(),
            dedupe: true,
        }
    }
}

impl ScanOptions {
    /// Report every occurrence, including repeated texts.
    pub fn every_occurrence(mut self) -> Self {
        self.dedupe = false;
        self
    }

    /// Whether a file's extension is listed in `file_kinds`.
    pub fn accepts(&self, path: impl AsRef<Path>) -> bool {
        file_extension(path)
            .is_some_and(|ext| self.file_kinds.iter().any(|k| k.eq_ignore_ascii_case(&ext)))
    }
}

/// A text candidate in region-local byte coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: TextKind,
    pub text: String,
    pub range: Range<usize>,
    pub replace_range: Range<usize>,
    pub attribute_name: Option<String>,
}

impl Candidate {
    fn shifted(mut self, offset: usize) -> Self {
        self.range = self.range.start + offset..self.range.end + offset;
        self.replace_range = self.replace_range.start + offset..self.replace_range.end + offset;
        self
    }
}

#[enum_dispatch]
pub trait RegionScanner {
    fn name(&self) -> &'static str;

    /// Scan region content. Candidates are in scanner order and not deduplicated.
    fn scan(&self, content: &str, options: &ScanOptions) -> Vec<Candidate>;
}

#[enum_dispatch(RegionScanner)]
#[derive(Debug, Clone, Copy)]
pub enum Scanner {
    MarkupScanner,
    ScriptScanner,
    StyleScanner,
    GenericScanner,
}

impl Scanner {
    /// Pick the scanner for a region of a document of the given kind.
    pub fn for_region(region: RegionKind, document: DocumentKind) -> Self {
        match region {
            RegionKind::Template => MarkupScanner::bounded().into(),
            RegionKind::Script => ScriptScanner.into(),
            RegionKind::Style => StyleScanner.into(),
            RegionKind::Whole => match document {
                DocumentKind::Markup => MarkupScanner::default().into(),
                DocumentKind::Script | DocumentKind::ComponentScript => ScriptScanner.into(),
                DocumentKind::Stylesheet => StyleScanner.into(),
                DocumentKind::Composite | DocumentKind::Unknown => GenericScanner.into(),
            },
        }
    }
}

/// Keep the first candidate of each distinct text.
fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.text.clone()))
        .collect()
}

/// Scan one region, returning candidates in region-local coordinates.
pub fn scan_region(region: &Region, document: DocumentKind, options: &ScanOptions) -> Vec<Candidate> {
    let scanner = Scanner::for_region(region.kind, document);
    let candidates = scanner.scan(&region.content, options);
    let candidates = if options.dedupe {
        dedupe(candidates)
    } else {
        candidates
    };
    debug!(
        scanner = scanner.name(),
        offset = region.offset_in_parent,
        count = candidates.len(),
        "scanned region"
    );
    candidates
}

/// Scan a whole document.
///
/// Spans are ordered by position and numbered from `#0` in that order.
pub fn scan_document(document: &SourceDocument, options: &ScanOptions) -> Vec<TextSpan> {
    scan_text(&document.text, document.kind, options)
}

/// Scan raw text of a known kind.
pub fn scan_text(text: &str, kind: DocumentKind, options: &ScanOptions) -> Vec<TextSpan> {
    let mut located: Vec<Candidate> = segment(text, kind)
        .iter()
        .flat_map(|region| {
            scan_region(region, kind, options)
                .into_iter()
                .map(|c| c.shifted(region.offset_in_parent))
        })
        .collect();
    located.sort_by_key(|c| c.range.start);

    let index = LineIndex::new(text);
    located
        .into_iter()
        .enumerate()
        .map(|(i, c)| TextSpan {
            id: SpanId(i as u32),
            kind: c.kind,
            start: index.position(c.range.start),
            end: index.position(c.range.end),
            text: c.text,
            range: c.range,
            replace_range: c.replace_range,
            attribute_name: c.attribute_name,
        })
        .collect()
}

/// Scan a document and keep the spans intersecting `[from, to]`.
pub fn scan_range(
    document: &SourceDocument,
    from: Position,
    to: Position,
    options: &ScanOptions,
) -> Vec<TextSpan> {
    scan_document(document, options)
        .into_iter()
        .filter(|span| span.intersects(from, to))
        .collect()
}
