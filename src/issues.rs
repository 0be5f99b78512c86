//! Issue types produced by `lokit check`.
//!
//! Each issue carries everything the reporter needs to print it: location,
//! source context and rule.

use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::core::{LineIndex, TextKind};

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    HardcodedText,
    MissingKey,
    UnusedKey,
    ParseError,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::HardcodedText => write!(f, "hardcoded"),
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::UnusedKey => write!(f, "unused-key"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Locations
// ============================================================

/// Location in a source file. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// A source location plus the text of its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    /// Context for byte `offset` of the text indexed by `index`.
    pub fn at(file_path: &str, index: &LineIndex, offset: usize) -> Self {
        let position = index.position(offset);
        let source_line = index.line_text(position.line).unwrap_or_default();
        Self::new(
            SourceLocation::new(file_path, position.line + 1, position.column + 1),
            source_line,
        )
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

/// A key inside a locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub location: SourceLocation,
    pub key: String,
    pub value: String,
}

impl MessageContext {
    pub fn new(location: SourceLocation, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            location,
            key: key.into(),
            value: value.into(),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// User-visible text that should go through a translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardcodedTextIssue {
    pub context: SourceContext,
    pub text: String,
    pub kind: TextKind,
    /// Attribute holding the text, for attribute values.
    pub attribute_name: Option<String>,
}

impl HardcodedTextIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::HardcodedText
    }
}

/// Translation key used in code but defined in no locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    pub context: SourceContext,
    pub key: String,
}

impl MissingKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingKey
    }
}

/// Key defined in a locale file but never used in code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    pub context: MessageContext,
    /// Locales defining the key.
    pub locales: Vec<String>,
}

impl UnusedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedKey
    }
}

/// Locale file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    HardcodedText(HardcodedTextIssue),
    MissingKey(MissingKeyIssue),
    UnusedKey(UnusedKeyIssue),
    ParseError(ParseErrorIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

pub enum ReportLocation<'a> {
    /// Source code location, printed with its line.
    Source(&'a SourceContext),
    /// Key in a locale file.
    Message(&'a MessageContext),
    /// File-level only.
    File { path: &'a str },
}

impl ReportLocation<'_> {
    pub fn file_path(&self) -> &str {
        match self {
            ReportLocation::Source(ctx) => ctx.file_path(),
            ReportLocation::Message(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::Message(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    pub fn col(&self) -> usize {
        match self {
            ReportLocation::Source(ctx) => ctx.col(),
            ReportLocation::Message(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message (text, key or error).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    fn hint(&self) -> Option<String> {
        None
    }

    /// Text of the `= note:` line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for HardcodedTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        self.attribute_name
            .as_ref()
            .map(|name| format!("{} `{}`", self.kind, name))
    }

    fn hint(&self) -> Option<String> {
        Some(format!(
            "run `lokit extract {}` to move it into a locale",
            self.context.file_path()
        ))
    }
}

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for UnusedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "(\"{}\") defined in: {}",
            self.context.value,
            self.locales.join(", ")
        ))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.location(), other.location());
        a.file_path()
            .cmp(b.file_path())
            .then_with(|| a.line().cmp(&b.line()))
            .then_with(|| a.col().cmp(&b.col()))
            .then_with(|| self.report_rule().cmp(&other.report_rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use crate::issues::*;

    fn hardcoded(path: &str, line: usize, col: usize, text: &str) -> Issue {
        Issue::HardcodedText(HardcodedTextIssue {
            context: SourceContext::new(SourceLocation::new(path, line, col), ""),
            text: text.to_string(),
            kind: TextKind::PlainMarkupText,
            attribute_name: None,
        })
    }

    #[test]
    fn test_severity_and_rule() {
        assert_eq!(HardcodedTextIssue::severity(), Severity::Error);
        assert_eq!(MissingKeyIssue::severity(), Severity::Error);
        assert_eq!(UnusedKeyIssue::severity(), Severity::Warning);
        assert_eq!(ParseErrorIssue::severity(), Severity::Error);
        assert_eq!(Rule::MissingKey.to_string(), "missing-key");
        assert_eq!(Rule::HardcodedText.to_string(), "hardcoded");
    }

    #[test]
    fn test_source_context_at() {
        let text = "<p>\n  <b>Hello</b>\n</p>";
        let index = LineIndex::new(text);
        let offset = text.find("Hello").unwrap();
        let ctx = SourceContext::at("a.vue", &index, offset);
        assert_eq!(ctx.line(), 2);
        assert_eq!(ctx.col(), 6);
        assert_eq!(ctx.source_line, "  <b>Hello</b>");
    }

    #[test]
    fn test_unused_key_details() {
        let issue = UnusedKeyIssue {
            context: MessageContext::new(SourceLocation::new("locales/en.json", 3, 1), "a.b", "Hi"),
            locales: vec!["en".to_string(), "zh".to_string()],
        };
        assert_eq!(issue.message(), "a.b");
        assert_eq!(issue.details().unwrap(), "(\"Hi\") defined in: en, zh");
    }

    #[test]
    fn test_attribute_details() {
        let issue = HardcodedTextIssue {
            context: SourceContext::new(SourceLocation::new("a.html", 1, 1), ""),
            text: "Search".to_string(),
            kind: TextKind::MarkupAttributeValue,
            attribute_name: Some("placeholder".to_string()),
        };
        assert_eq!(issue.details().unwrap(), "attribute `placeholder`");
    }

    #[test]
    fn test_issue_ordering() {
        let mut issues = vec![
            hardcoded("b.vue", 1, 1, "x"),
            hardcoded("a.vue", 3, 1, "y"),
            hardcoded("a.vue", 1, 9, "z"),
            Issue::ParseError(ParseErrorIssue {
                file_path: "a.vue".to_string(),
                error: "bad".to_string(),
            }),
        ];
        issues.sort();
        let order: Vec<String> = issues.iter().map(|i| i.message()).collect();
        assert_eq!(order, vec!["bad", "z", "y", "x"]);
    }
}
