//! In-memory locale store.
//!
//! Each locale is a nested JSON object whose string leaves are translations.
//! A dotted key `a.b.c` is defined in a locale iff walking its segments
//! reaches a string. Objects keep insertion order (`preserve_order`) so saved
//! files diff cleanly.

mod error;
mod io;

use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};

use serde_json::{Map, Value};

pub use error::StoreError;
pub use io::{
    LocaleWarning, StoreLoadResult, discover_locales, load_store, read_locale_file, save_all,
    save_locale, save_locales,
};

/// Action taken on a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleEntry {
    pub locale: String,
    pub path: PathBuf,
    pub messages: Map<String, Value>,
    /// File content as loaded, for locating keys in reports.
    pub source: String,
}

impl LocaleEntry {
    pub fn new(locale: impl Into<String>, path: impl Into<PathBuf>, messages: Map<String, Value>) -> Self {
        Self {
            locale: locale.into(),
            path: path.into(),
            messages,
            source: String::new(),
        }
    }

    pub fn get_value(&self, key: &str) -> Option<&str> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.messages.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        current.as_str()
    }

    pub fn is_defined(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Every key with a string leaf, in document order.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaf_keys(&self.messages, String::new(), &mut keys);
        keys
    }

    /// Insert a value, creating intermediate objects and replacing any
    /// non-object value in the way.
    pub fn set_value(&mut self, key: &str, value: &str) -> KeyAction {
        let parts: Vec<&str> = key.split('.').collect();
        insert_nested(&mut self.messages, &parts, Value::String(value.to_string()))
    }

    /// Remove a key, pruning parent objects left empty. Returns whether
    /// anything was removed.
    pub fn delete_key(&mut self, key: &str) -> bool {
        let parts: Vec<&str> = key.split('.').collect();
        delete_nested(&mut self.messages, &parts)
    }

    /// 1-based line of `key` in the loaded file, 1 when not found.
    pub fn key_line(&self, key: &str) -> usize {
        find_key_line(&self.source, key)
    }
}

fn collect_leaf_keys(map: &Map<String, Value>, prefix: String, keys: &mut Vec<String>) {
    for (key, value) in map {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(child) => collect_leaf_keys(child, full, keys),
            Value::String(_) => keys.push(full),
            _ => {}
        }
    }
}

fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) -> KeyAction {
    match path {
        [] => KeyAction::Added,
        [last] => match root.insert(last.to_string(), value) {
            Some(_) => KeyAction::Updated,
            None => KeyAction::Added,
        },
        [first, rest @ ..] => {
            let next = root
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !next.is_object() {
                *next = Value::Object(Map::new());
            }
            match next {
                Value::Object(inner) => insert_nested(inner, rest, value),
                _ => KeyAction::Added,
            }
        }
    }
}

fn delete_nested(map: &mut Map<String, Value>, path: &[&str]) -> bool {
    match path {
        [] => false,
        [last] => map.shift_remove(*last).is_some(),
        [first, rest @ ..] => {
            let Some(Value::Object(child)) = map.get_mut(*first) else {
                return false;
            };
            let removed = delete_nested(child, rest);
            if removed && child.is_empty() {
                map.shift_remove(*first);
            }
            removed
        }
    }
}

/// Find the line where a dotted key appears in JSON text.
///
/// Each segment is searched after the previous one and only matches when
/// followed by `:`, so `Common.submit` skips a `"submit"` value or an
/// earlier `Auth.submit`.
fn find_key_line(content: &str, key: &str) -> usize {
    let mut search_start = 0;
    for part in key.split('.') {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];
        let mut pos = 0;
        let mut found = false;
        while let Some(rel) = remaining[pos..].find(&pattern) {
            let after = pos + rel + pattern.len();
            if remaining[after..].trim_start().starts_with(':') {
                search_start += after;
                found = true;
                break;
            }
            pos += rel + 1;
        }
        if !found {
            break;
        }
    }
    if search_start == 0 {
        return 1;
    }
    content[..search_start].matches('\n').count() + 1
}

/// Completion of one locale against the union of all keys.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationStatus {
    pub locale: String,
    pub total: usize,
    pub translated: usize,
    pub untranslated: usize,
    /// Rounded percentage; 100 when there are no keys.
    pub progress: u32,
    pub untranslated_keys: Vec<String>,
}

/// All locales of a project, ordered by file name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleStore {
    pub dir: PathBuf,
    pub locales: Vec<LocaleEntry>,
}

impl LocaleStore {
    pub fn new(dir: impl Into<PathBuf>, locales: Vec<LocaleEntry>) -> Self {
        Self {
            dir: dir.into(),
            locales,
        }
    }

    pub fn locale_names(&self) -> Vec<&str> {
        self.locales.iter().map(|l| l.locale.as_str()).collect()
    }

    /// The first locale; extracted text is written here.
    pub fn default_locale(&self) -> Option<&str> {
        self.locales.first().map(|l| l.locale.as_str())
    }

    pub fn locale(&self, name: &str) -> Option<&LocaleEntry> {
        self.locales.iter().find(|l| l.locale == name)
    }

    fn locale_mut(&mut self, name: &str) -> Result<&mut LocaleEntry, StoreError> {
        self.locales
            .iter_mut()
            .find(|l| l.locale == name)
            .ok_or_else(|| StoreError::UnknownLocale {
                locale: name.to_string(),
            })
    }

    pub fn get_value(&self, locale: &str, key: &str) -> Option<&str> {
        self.locale(locale)?.get_value(key)
    }

    /// Whether any locale defines `key`.
    pub fn is_defined(&self, key: &str) -> bool {
        self.locales.iter().any(|l| l.is_defined(key))
    }

    /// `(locale, value)` for every locale, with an empty value where the key
    /// is not defined.
    pub fn key_translations(&self, key: &str) -> Vec<(String, String)> {
        self.locales
            .iter()
            .map(|l| {
                (
                    l.locale.clone(),
                    l.get_value(key).unwrap_or_default().to_string(),
                )
            })
            .collect()
    }

    pub fn set_value(&mut self, locale: &str, key: &str, value: &str) -> Result<KeyAction, StoreError> {
        Ok(self.locale_mut(locale)?.set_value(key, value))
    }

    /// Delete `key` from every locale. Returns the locales that changed.
    pub fn delete_key(&mut self, key: &str) -> Vec<String> {
        self.locales
            .iter_mut()
            .filter_map(|l| l.delete_key(key).then(|| l.locale.clone()))
            .collect()
    }

    /// Move the value of `old` to `new` in every locale defining `old`.
    /// Returns the locales that changed.
    pub fn rename_key(&mut self, old: &str, new: &str) -> Vec<String> {
        let mut changed = Vec::new();
        for entry in &mut self.locales {
            let Some(value) = entry.get_value(old).map(str::to_string) else {
                continue;
            };
            entry.delete_key(old);
            entry.set_value(new, &value);
            changed.push(entry.locale.clone());
        }
        changed
    }

    /// Union of leaf keys across locales, first-seen order.
    pub fn all_defined_keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.locales
            .iter()
            .flat_map(|l| l.leaf_keys())
            .filter(|k| seen.insert(k.clone()))
            .collect()
    }

    /// Key to the locales defining it, keys in first-seen order.
    pub fn locale_map(&self) -> Vec<(String, Vec<String>)> {
        let mut order: Vec<String> = Vec::new();
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for entry in &self.locales {
            for key in entry.leaf_keys() {
                let locales = map.entry(key.clone()).or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                });
                locales.push(entry.locale.clone());
            }
        }
        order
            .into_iter()
            .map(|key| {
                let locales = map.remove(&key).unwrap_or_default();
                (key, locales)
            })
            .collect()
    }

    pub fn translation_status(&self) -> Vec<TranslationStatus> {
        let keys = self.all_defined_keys();
        self.locales
            .iter()
            .map(|entry| {
                let untranslated_keys: Vec<String> = keys
                    .iter()
                    .filter(|k| entry.get_value(k).is_none_or(|v| v.trim().is_empty()))
                    .cloned()
                    .collect();
                let total = keys.len();
                let untranslated = untranslated_keys.len();
                let translated = total - untranslated;
                let progress = if total == 0 {
                    100
                } else {
                    ((translated as f64 / total as f64) * 100.0).round() as u32
                };
                TranslationStatus {
                    locale: entry.locale.clone(),
                    total,
                    translated,
                    untranslated,
                    progress,
                    untranslated_keys,
                }
            })
            .collect()
    }
}
