//! Source documents and their classification.

use std::{fmt, path::Path};

/// Language classification of a source document, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Single-file component embedding template, script and style blocks (`.vue`).
    Composite,
    /// Plain script (`.js`, `.ts`, `.mjs`, `.cjs`).
    Script,
    /// Script with embedded component expressions (`.jsx`, `.tsx`).
    ComponentScript,
    /// Markup (`.html`, `.htm`).
    Markup,
    /// Stylesheet (`.css`, `.scss`, `.less`).
    Stylesheet,
    /// Anything else; scanned with the generic quoted-string scanner.
    Unknown,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "vue" => DocumentKind::Composite,
            "js" | "ts" | "mjs" | "cjs" => DocumentKind::Script,
            "jsx" | "tsx" => DocumentKind::ComponentScript,
            "html" | "htm" => DocumentKind::Markup,
            "css" | "scss" | "less" => DocumentKind::Stylesheet,
            _ => DocumentKind::Unknown,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentKind::Unknown)
    }

    /// Whether translation calls are expected in this kind of document.
    pub fn has_translation_calls(&self) -> bool {
        matches!(
            self,
            DocumentKind::Composite | DocumentKind::Script | DocumentKind::ComponentScript
        )
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Composite => write!(f, "component"),
            DocumentKind::Script => write!(f, "script"),
            DocumentKind::ComponentScript => write!(f, "component script"),
            DocumentKind::Markup => write!(f, "markup"),
            DocumentKind::Stylesheet => write!(f, "stylesheet"),
            DocumentKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Lower-cased extension of a path, if any.
pub fn file_extension(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// A source document held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Display path (relative to the project root when loaded from a corpus).
    pub path: String,
    pub text: String,
    pub kind: DocumentKind,
}

impl SourceDocument {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let path = path.into();
        let kind = DocumentKind::from_path(&path);
        Self {
            path,
            text: text.into(),
            kind,
        }
    }

    pub fn with_kind(path: impl Into<String>, text: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            kind,
        }
    }
}
