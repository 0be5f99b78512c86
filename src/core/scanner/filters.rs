//! Rejection rules for hardcoded text candidates.

use std::sync::LazyLock;

use regex::Regex;

/// Literals that are never human-readable text.
pub const RESERVED_LITERALS: &[&str] = &["true", "false", "null", "undefined"];

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static PATH_OR_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[/.]|\.([a-z]{2,4})$|^https?://|^www\.|^ftp://").unwrap()
});

/// Rules shared by every scanner.
///
/// Rejects text that is one character or shorter after trimming, blank,
/// purely numeric, or a reserved literal.
pub fn passes_shared_rules(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() <= 1 {
        return false;
    }
    if trimmed.chars().all(char::is_whitespace) {
        return false;
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    !RESERVED_LITERALS.contains(&trimmed)
}

/// `^[A-Za-z_][A-Za-z0-9_]*$`, e.g. `primary`, `user_id`.
pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER_REGEX.is_match(text)
}

/// Leading `/` or `.`, a short dotted extension, or a URL scheme prefix.
pub fn is_path_or_url(text: &str) -> bool {
    PATH_OR_URL_REGEX.is_match(text)
}

/// Values that already start with an interpolation or a translation call.
pub fn starts_with_binding(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("{{") || trimmed.starts_with("$t(") || trimmed.starts_with("t(")
}
