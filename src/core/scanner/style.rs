use super::{Candidate, RegionScanner, ScanOptions};

/// Stylesheet regions are never scanned for text; `content: "..."` values
/// and font names produce far more noise than findings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleScanner;

impl RegionScanner for StyleScanner {
    fn name(&self) -> &'static str {
        "style"
    }

    fn scan(&self, _content: &str, _options: &ScanOptions) -> Vec<Candidate> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::scanner::style::*;

    #[test]
    fn test_style_scanner_finds_nothing() {
        let css = ".a::after { content: \"Read more\"; font-family: 'Open Sans'; }";
        assert!(StyleScanner.scan(css, &ScanOptions::default()).is_empty());
    }
}
