//! Project source enumeration and loading.

use std::{
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use rayon::prelude::*;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::core::{
    document::{DocumentKind, SourceDocument},
    outcome::BatchOutcome,
};

/// Dependency and build output directories never scanned.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist"];

/// Patterns without wildcards are literal paths relative to the root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

/// Path relative to `root`, with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Files that may contain translation calls.
pub fn is_usage_source(path: &Path) -> bool {
    DocumentKind::from_path(path).has_translation_calls()
}

pub struct CollectResult {
    /// Files in walk order (sorted by name per directory).
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Walk `root`, keeping files accepted by `accept` and not ignored.
pub fn collect_source_files(
    root: &Path,
    ignore_patterns: &[String],
    accept: impl Fn(&Path) -> bool,
    verbose: bool,
) -> CollectResult {
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(root.join(p));
        }
    }

    let mut files = Vec::new();
    let mut skipped_count = 0;
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if literal_ignore_paths.iter().any(|ignore| path.starts_with(ignore)) {
            continue;
        }
        let relative = relative_path(root, path);
        if glob_patterns.iter().any(|p| p.matches(&relative)) {
            continue;
        }
        if accept(path) {
            files.push(path.to_path_buf());
        }
    }

    debug!(root = %root.display(), files = files.len(), skipped = skipped_count, "collected sources");
    CollectResult {
        files,
        skipped_count,
    }
}

pub struct LoadResult {
    pub documents: Vec<SourceDocument>,
    pub skipped_count: usize,
}

/// Read files in parallel, keeping their order. Document paths are relative
/// to `root`. Unreadable files are skipped.
pub fn load_sources(root: &Path, files: &[PathBuf], verbose: bool) -> LoadResult {
    let read: Vec<Option<SourceDocument>> = files
        .par_iter()
        .map(|path| match fs::read_to_string(path) {
            Ok(text) => Some(SourceDocument::new(relative_path(root, path), text)),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} {}: {}",
                        "warning:".bold().yellow(),
                        path.display(),
                        e
                    );
                }
                None
            }
        })
        .collect();

    let skipped_count = read.iter().filter(|d| d.is_none()).count();
    LoadResult {
        documents: read.into_iter().flatten().collect(),
        skipped_count,
    }
}

/// Write documents back under `root`, continuing past failures.
pub fn write_documents(root: &Path, documents: &[SourceDocument]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for document in documents {
        match fs::write(root.join(&document.path), &document.text) {
            Ok(()) => outcome.record_success(),
            Err(e) => outcome.record_failure(document.path.clone(), e),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::core::corpus::*;

    fn names(result: &CollectResult, root: &Path) -> Vec<String> {
        result.files.iter().map(|f| relative_path(root, f)).collect()
    }

    #[test]
    fn test_collect_skips_excluded_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for sub in ["node_modules/pkg", "dist", "src/components", ".git"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        File::create(root.join("node_modules/pkg/index.js")).unwrap();
        File::create(root.join("dist/app.js")).unwrap();
        File::create(root.join("src/main.ts")).unwrap();
        File::create(root.join("src/components/App.vue")).unwrap();
        File::create(root.join("src/style.css")).unwrap();

        let result = collect_source_files(root, &[], is_usage_source, false);
        assert_eq!(
            names(&result, root),
            vec!["src/components/App.vue", "src/main.ts"]
        );
    }

    #[test]
    fn test_collect_ignores() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/legacy")).unwrap();
        fs::create_dir_all(root.join("src/gen")).unwrap();
        File::create(root.join("src/a.js")).unwrap();
        File::create(root.join("src/a.spec.js")).unwrap();
        File::create(root.join("src/legacy/b.js")).unwrap();
        File::create(root.join("src/gen/c.js")).unwrap();

        let ignores = vec![
            "**/*.spec.js".to_string(),
            "src/legacy".to_string(),
            "[".to_string() + "*",
        ];
        let result = collect_source_files(root, &ignores, is_usage_source, false);
        assert_eq!(names(&result, root), vec!["src/a.js", "src/gen/c.js"]);
    }

    #[test]
    fn test_load_and_write() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/a.js"), "t('a')").unwrap();
        fs::write(root.join("src/b.vue"), "<template></template>").unwrap();

        let files = vec![root.join("src/a.js"), root.join("missing.js"), root.join("src/b.vue")];
        let loaded = load_sources(root, &files, false);
        assert_eq!(loaded.skipped_count, 1);
        assert_eq!(loaded.documents.len(), 2);
        assert_eq!(loaded.documents[0].path, "src/a.js");
        assert_eq!(loaded.documents[1].kind, DocumentKind::Composite);

        let mut doc = loaded.documents[0].clone();
        doc.text = "t('b')".to_string();
        let outcome = write_documents(root, &[doc]);
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(fs::read_to_string(root.join("src/a.js")).unwrap(), "t('b')");
    }
}
