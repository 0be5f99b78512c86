//! Project state shared by the commands: configuration with CLI overrides,
//! the locale store and the source corpus.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use super::args::CommonArgs;
use crate::{
    config::{Config, load_config},
    core::{
        SourceDocument,
        corpus::{collect_source_files, is_usage_source, load_sources},
        scanner::ScanOptions,
        store::{StoreLoadResult, load_store},
    },
};

pub struct ProjectContext {
    pub config: Config,
    pub source_root: PathBuf,
    pub locales_dir: PathBuf,
    pub verbose: bool,
}

impl ProjectContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        let loaded = load_config(&cwd)?;
        debug!(from_file = loaded.from_file, "loaded config");
        let config = loaded.config;

        let source_root = common
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.source_root));
        let locales_dir = common
            .locales_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.locales_dir));

        Ok(Self {
            config,
            source_root,
            locales_dir,
            verbose: common.verbose,
        })
    }

    pub fn scan_options(&self) -> ScanOptions {
        self.config.scan_options()
    }

    /// Load every locale; malformed files come back as warnings.
    pub fn load_store(&self) -> Result<StoreLoadResult> {
        let pattern = self.config.locale_pattern()?;
        let result = load_store(&self.locales_dir, &pattern)?;
        if self.verbose {
            for warning in &result.warnings {
                eprintln!(
                    "{} {}: {}",
                    "warning:".bold().yellow(),
                    warning.file_path,
                    warning.error
                );
            }
        }
        Ok(result)
    }

    /// Walk the source root and read accepted files. Unreadable files are
    /// skipped (and reported with `--verbose`).
    fn load(&self, accept: impl Fn(&Path) -> bool) -> Vec<SourceDocument> {
        let collected = collect_source_files(
            &self.source_root,
            &self.config.ignores,
            accept,
            self.verbose,
        );
        let loaded = load_sources(&self.source_root, &collected.files, self.verbose);
        debug!(
            documents = loaded.documents.len(),
            skipped = collected.skipped_count + loaded.skipped_count,
            "loaded corpus"
        );
        loaded.documents
    }

    /// Files that may contain translation calls.
    pub fn usage_sources(&self) -> Vec<SourceDocument> {
        self.load(is_usage_source)
    }

    /// Files eligible for hardcoded text scanning.
    pub fn hardcoded_sources(&self, options: &ScanOptions) -> Vec<SourceDocument> {
        self.load(|path| options.accepts(path))
    }
}
