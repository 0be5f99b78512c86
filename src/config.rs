use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::scanner::{DEFAULT_ATTRIBUTE_NAMES, DEFAULT_FILE_KINDS, ScanOptions};

pub const CONFIG_FILE_NAME: &str = ".lokitrc.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    #[serde(default = "default_locale_file_name_pattern")]
    pub locale_file_name_pattern: String,
    #[serde(default = "default_hardcoded_file_kinds")]
    pub hardcoded_file_kinds: Vec<String>,
    #[serde(default = "default_hardcoded_attribute_names")]
    pub hardcoded_attribute_names: Vec<String>,
    #[serde(default)]
    pub inline_translation_enabled: bool,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub key_prefix: String,
}

fn default_locales_dir() -> String {
    "./locales".to_string()
}

fn default_locale_file_name_pattern() -> String {
    r"^([\w-]+)\.json$".to_string()
}

fn default_hardcoded_file_kinds() -> Vec<String> {
    DEFAULT_FILE_KINDS.iter().map(|s| s.to_string()).collect()
}

fn default_hardcoded_attribute_names() -> Vec<String> {
    DEFAULT_ATTRIBUTE_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_source_root() -> String {
    "./".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_dir: default_locales_dir(),
            locale_file_name_pattern: default_locale_file_name_pattern(),
            hardcoded_file_kinds: default_hardcoded_file_kinds(),
            hardcoded_attribute_names: default_hardcoded_attribute_names(),
            inline_translation_enabled: false,
            source_root: default_source_root(),
            ignores: Vec::new(),
            key_prefix: String::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the locale file pattern is not a valid regex or any
    /// glob in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        self.locale_pattern()?;

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }

    pub fn locale_pattern(&self) -> Result<Regex> {
        Regex::new(&self.locale_file_name_pattern).with_context(|| {
            format!(
                "Invalid regex in 'localeFileNamePattern': \"{}\"",
                self.locale_file_name_pattern
            )
        })
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            attribute_names: self.hardcoded_attribute_names.clone(),
            file_kinds: self.hardcoded_file_kinds.clone(),
            dedupe: true,
        }
    }

    /// Configured key prefix, `None` when blank.
    pub fn key_prefix(&self) -> Option<&str> {
        Some(self.key_prefix.trim()).filter(|p| !p.is_empty())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
