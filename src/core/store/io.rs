use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::{LocaleEntry, LocaleStore, StoreError};
use crate::core::outcome::BatchOutcome;

/// A locale file that could not be loaded; its locale is kept, empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct StoreLoadResult {
    pub store: LocaleStore,
    pub warnings: Vec<LocaleWarning>,
}

/// List `(locale, path)` for files in `dir` whose name matches `pattern`,
/// sorted by file name.
///
/// The locale name is the first capture group, or the file stem when the
/// pattern has none.
pub fn discover_locales(dir: &Path, pattern: &Regex) -> Result<Vec<(String, PathBuf)>, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::NotFound {
            dir: dir.to_path_buf(),
        });
    }

    let read_dir = fs::read_dir(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut found = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        let Some(caps) = pattern.captures(&file_name) else {
            continue;
        };
        let locale = match caps.get(1) {
            Some(m) => m.as_str().to_string(),
            None => path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(&file_name)
                .to_string(),
        };
        found.push((file_name, locale, path));
    }

    if found.is_empty() {
        return Err(StoreError::NotFound {
            dir: dir.to_path_buf(),
        });
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    debug!(dir = %dir.display(), count = found.len(), "discovered locale files");
    Ok(found
        .into_iter()
        .map(|(_, locale, path)| (locale, path))
        .collect())
}

/// Read one locale file as a JSON object.
pub fn read_locale_file(path: &Path) -> Result<(Map<String, Value>, String), StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok((map, content)),
        _ => Err(StoreError::Malformed {
            path: path.to_path_buf(),
            message: "root of a locale file must be an object".to_string(),
        }),
    }
}

/// Load every locale in `dir`.
///
/// A file that fails to read or parse becomes a warning and its locale is
/// loaded empty, so the remaining locales stay usable.
pub fn load_store(dir: &Path, pattern: &Regex) -> Result<StoreLoadResult, StoreError> {
    let discovered = discover_locales(dir, pattern)?;

    let loaded: Vec<(LocaleEntry, Option<LocaleWarning>)> = discovered
        .into_par_iter()
        .map(|(locale, path)| match read_locale_file(&path) {
            Ok((messages, source)) => {
                let mut entry = LocaleEntry::new(locale, path, messages);
                entry.source = source;
                (entry, None)
            }
            Err(e) => {
                let warning = LocaleWarning {
                    file_path: path.to_string_lossy().to_string(),
                    error: e.to_string(),
                };
                (LocaleEntry::new(locale, path, Map::new()), Some(warning))
            }
        })
        .collect();

    let mut result = StoreLoadResult {
        store: LocaleStore::new(dir, Vec::with_capacity(loaded.len())),
        warnings: Vec::new(),
    };
    for (entry, warning) in loaded {
        result.store.locales.push(entry);
        result.warnings.extend(warning);
    }
    Ok(result)
}

/// Write one locale, pretty-printed with a trailing newline.
///
/// The file is written to a sibling temporary file first and renamed over
/// the target.
pub fn save_locale(entry: &LocaleEntry) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: entry.path.clone(),
        source,
    };

    if let Some(parent) = entry.path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let content = serde_json::to_string_pretty(&Value::Object(entry.messages.clone())).map_err(
        |source| StoreError::Serialize {
            locale: entry.locale.clone(),
            source,
        },
    )?;

    let tmp = entry.path.with_extension("json.tmp");
    fs::write(&tmp, format!("{}\n", content)).map_err(io_err)?;
    fs::rename(&tmp, &entry.path).map_err(io_err)?;
    debug!(locale = %entry.locale, path = %entry.path.display(), "saved locale");
    Ok(())
}

/// Save the named locales, continuing past failures.
pub fn save_locales(store: &LocaleStore, locales: &[String]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for entry in store.locales.iter().filter(|e| locales.contains(&e.locale)) {
        match save_locale(entry) {
            Ok(()) => outcome.record_success(),
            Err(e) => outcome.record_failure(entry.path.to_string_lossy(), e),
        }
    }
    outcome
}

/// Save every locale, continuing past failures.
pub fn save_all(store: &LocaleStore) -> BatchOutcome {
    let names: Vec<String> = store.locales.iter().map(|e| e.locale.clone()).collect();
    save_locales(store, &names)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use regex::Regex;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use crate::core::store::*;

    fn default_pattern() -> Regex {
        Regex::new(r"^([\w-]+)\.json$").unwrap()
    }

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_discover_sorted_by_file_name() {
        let dir = TempDir::new().unwrap();
        write(&dir, "zh-CN.json", "{}");
        write(&dir, "en.json", "{}");
        write(&dir, "notes.txt", "");
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let locales = discover_locales(dir.path(), &default_pattern()).unwrap();
        let names: Vec<&str> = locales.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(names, vec!["en", "zh-CN"]);
    }

    #[test]
    fn test_discover_pattern_without_group_uses_stem() {
        let dir = TempDir::new().unwrap();
        write(&dir, "fr.locale.json", "{}");
        let pattern = Regex::new(r"\.locale\.json$").unwrap();
        let locales = discover_locales(dir.path(), &pattern).unwrap();
        assert_eq!(locales[0].0, "fr.locale");
    }

    #[test]
    fn test_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            load_store(&missing, &default_pattern()),
            Err(StoreError::NotFound { .. })
        ));
        write(&dir, "readme.md", "");
        assert!(matches!(
            load_store(dir.path(), &default_pattern()),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_a_warning() {
        let dir = TempDir::new().unwrap();
        write(&dir, "en.json", r#"{"a": "x"}"#);
        write(&dir, "zh.json", r#"{"a": "#);
        write(&dir, "ja.json", r#"["not", "an", "object"]"#);

        let result = load_store(dir.path(), &default_pattern()).unwrap();
        assert_eq!(result.store.locale_names(), vec!["en", "ja", "zh"]);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.store.locale("zh").unwrap().messages.is_empty());
        assert_eq!(result.store.get_value("en", "a"), Some("x"));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        write(&dir, "en.json", "{}");
        let mut store = load_store(dir.path(), &default_pattern()).unwrap().store;
        store.set_value("en", "z.last", "Last").unwrap();
        store.set_value("en", "a", "First").unwrap();
        store.set_value("en", "z.inner.deep", "你好").unwrap();

        let outcome = save_all(&store);
        assert_eq!(outcome.succeeded, 1);
        assert!(outcome.is_clean());

        let reloaded = load_store(dir.path(), &default_pattern()).unwrap().store;
        assert_eq!(reloaded.locales[0].messages, store.locales[0].messages);
        assert!(!dir.path().join("en.json.tmp").exists());

        let content = fs::read_to_string(dir.path().join("en.json")).unwrap();
        insta::assert_snapshot!(content, @r#"
        {
          "z": {
            "last": "Last",
            "inner": {
              "deep": "你好"
            }
          },
          "a": "First"
        }
        "#);
    }

    #[test]
    fn test_save_locales_only_named() {
        let dir = TempDir::new().unwrap();
        write(&dir, "en.json", "{}");
        write(&dir, "zh.json", "{\"keep\":\"as is\"}");
        let mut store = load_store(dir.path(), &default_pattern()).unwrap().store;
        store.set_value("en", "a", "x").unwrap();

        let outcome = save_locales(&store, &["en".to_string()]);
        assert_eq!(outcome.succeeded, 1);
        let zh = fs::read_to_string(dir.path().join("zh.json")).unwrap();
        assert_eq!(zh, "{\"keep\":\"as is\"}");
        let en: Value = serde_json::from_str(&fs::read_to_string(dir.path().join("en.json")).unwrap()).unwrap();
        assert_eq!(en, json!({"a": "x"}));
    }
}
