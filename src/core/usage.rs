//! Key usage analysis against the locale store.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::core::{
    calls::{find_translation_calls, translation_keys},
    document::SourceDocument,
    position::{LineIndex, Position},
    scanner::{ScanOptions, scan_document},
    span::TextSpan,
    store::LocaleStore,
};

/// Usage report for a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUsage {
    /// Keys of every translation call, first-seen order.
    pub used_keys: Vec<String>,
    /// `used_keys` not defined in any locale.
    pub missing_keys: Vec<String>,
    /// Defined keys this document does not use.
    pub unused_keys: Vec<String>,
    pub hardcoded: Vec<TextSpan>,
}

/// Analyze one document: key usage plus hardcoded text.
pub fn analyze_document(
    document: &SourceDocument,
    store: &LocaleStore,
    options: &ScanOptions,
) -> DocumentUsage {
    let used_keys = translation_keys(&document.text);
    let defined = store.all_defined_keys();
    let defined_set: HashSet<&str> = defined.iter().map(String::as_str).collect();
    let used_set: HashSet<&str> = used_keys.iter().map(String::as_str).collect();

    let missing_keys = used_keys
        .iter()
        .filter(|k| !defined_set.contains(k.as_str()))
        .cloned()
        .collect();
    let unused_keys = defined
        .iter()
        .filter(|k| !used_set.contains(k.as_str()))
        .cloned()
        .collect();

    DocumentUsage {
        missing_keys,
        unused_keys,
        hardcoded: scan_document(document, options),
        used_keys,
    }
}

/// Where a key is used. Line and column are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UsageLocation {
    pub file_path: String,
    pub line: usize,
    pub column: usize,
}

impl UsageLocation {
    fn new(file_path: &str, position: Position) -> Self {
        Self {
            file_path: file_path.to_string(),
            line: position.line,
            column: position.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    pub key: String,
    /// Locales defining the key.
    pub locales: Vec<String>,
    pub used_by: Vec<UsageLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusUsage {
    /// Defined keys with at least one usage, first-used order.
    pub used: Vec<KeyUsage>,
    /// Defined keys with no usage, store order.
    pub unused: Vec<String>,
}

/// Analyze key usage across documents.
///
/// Only keys defined in some locale are recorded; calls to undefined keys
/// are reported by [`undefined_key_usages`] instead.
pub fn analyze_corpus(documents: &[SourceDocument], store: &LocaleStore) -> CorpusUsage {
    let locale_map = store.locale_map();
    let locales_of: HashMap<&str, &Vec<String>> =
        locale_map.iter().map(|(k, l)| (k.as_str(), l)).collect();

    let mut used: Vec<KeyUsage> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    let mut seen: HashSet<(String, UsageLocation)> = HashSet::new();

    for document in documents {
        let calls = find_translation_calls(&document.text);
        if calls.is_empty() {
            continue;
        }
        let index = LineIndex::new(&document.text);
        for call in calls {
            let Some(locales) = locales_of.get(call.key.as_str()) else {
                continue;
            };
            let location = UsageLocation::new(&document.path, index.position(call.start()));
            if !seen.insert((call.key.clone(), location.clone())) {
                continue;
            }
            let i = *slot.entry(call.key.clone()).or_insert_with(|| {
                used.push(KeyUsage {
                    key: call.key.clone(),
                    locales: locales.to_vec(),
                    used_by: Vec::new(),
                });
                used.len() - 1
            });
            used[i].used_by.push(location);
        }
    }

    let unused: Vec<String> = locale_map
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| !slot.contains_key(key))
        .collect();

    debug!(
        files = documents.len(),
        used = used.len(),
        unused = unused.len(),
        "analyzed corpus"
    );
    CorpusUsage { used, unused }
}

/// Every call whose key no locale defines, in document order.
pub fn undefined_key_usages(
    documents: &[SourceDocument],
    store: &LocaleStore,
) -> Vec<(String, UsageLocation)> {
    let defined: HashSet<String> = store.all_defined_keys().into_iter().collect();
    let mut result = Vec::new();
    for document in documents {
        let calls = find_translation_calls(&document.text);
        if calls.iter().all(|c| defined.contains(&c.key)) {
            continue;
        }
        let index = LineIndex::new(&document.text);
        for call in calls.into_iter().filter(|c| !defined.contains(&c.key)) {
            let location = UsageLocation::new(&document.path, index.position(call.start()));
            result.push((call.key, location));
        }
    }
    result
}
