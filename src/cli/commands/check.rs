use std::collections::HashMap;

use anyhow::Result;
use clap::ValueEnum;

use super::super::{args::CheckCommand, context::ProjectContext};
use super::{
    helper::{finish, parse_error_issues},
    {CommandResult, CommandSummary},
};
use crate::{
    core::{
        LineIndex, LocaleStore, SourceDocument, scan_document,
        scanner::ScanOptions,
        store::StoreLoadResult,
        usage::{analyze_corpus, undefined_key_usages},
    },
    issues::{
        HardcodedTextIssue, Issue, MessageContext, MissingKeyIssue, SourceContext,
        SourceLocation, UnusedKeyIssue,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    Hardcoded,
    Missing,
    Unused,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![CheckRule::Hardcoded, CheckRule::Missing, CheckRule::Unused]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;

    let checks = if cmd.checks.is_empty() {
        CheckRule::all()
    } else {
        cmd.checks.clone()
    };
    let needs_keys = checks
        .iter()
        .any(|c| matches!(c, CheckRule::Missing | CheckRule::Unused));

    let mut all_issues: Vec<Issue> = Vec::new();
    let mut source_files_checked = 0;
    let mut locale_files_checked = 0;

    if checks.contains(&CheckRule::Hardcoded) {
        let options = ctx.scan_options();
        let corpus = ctx.hardcoded_sources(&options);
        source_files_checked = corpus.len();
        all_issues.extend(
            check_hardcoded_text_issues(&corpus, &options)
                .into_iter()
                .map(Issue::HardcodedText),
        );
    }

    if needs_keys {
        let StoreLoadResult { store, warnings } = ctx.load_store()?;
        locale_files_checked = store.locales.len();
        all_issues.extend(parse_error_issues(warnings));

        let corpus = ctx.usage_sources();
        source_files_checked = source_files_checked.max(corpus.len());
        if checks.contains(&CheckRule::Missing) {
            all_issues.extend(
                check_missing_keys_issues(&corpus, &store)
                    .into_iter()
                    .map(Issue::MissingKey),
            );
        }
        if checks.contains(&CheckRule::Unused) {
            all_issues.extend(
                check_unused_keys_issues(&corpus, &store)
                    .into_iter()
                    .map(Issue::UnusedKey),
            );
        }
    }

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        source_files_checked,
        locale_files_checked,
        true,
    ))
}

pub fn check_hardcoded_text_issues(
    documents: &[SourceDocument],
    options: &ScanOptions,
) -> Vec<HardcodedTextIssue> {
    let mut issues = Vec::new();
    for document in documents {
        let spans = scan_document(document, options);
        if spans.is_empty() {
            continue;
        }
        let index = LineIndex::new(&document.text);
        issues.extend(spans.into_iter().map(|span| HardcodedTextIssue {
            context: SourceContext::at(&document.path, &index, span.range.start),
            text: span.text.trim().to_string(),
            kind: span.kind,
            attribute_name: span.attribute_name,
        }));
    }
    issues
}

pub fn check_missing_keys_issues(
    documents: &[SourceDocument],
    store: &LocaleStore,
) -> Vec<MissingKeyIssue> {
    let by_path: HashMap<&str, &SourceDocument> =
        documents.iter().map(|d| (d.path.as_str(), d)).collect();
    undefined_key_usages(documents, store)
        .into_iter()
        .map(|(key, usage)| {
            let source_line = by_path
                .get(usage.file_path.as_str())
                .and_then(|doc| doc.text.lines().nth(usage.line))
                .unwrap_or_default()
                .trim_end_matches('\r')
                .to_string();
            MissingKeyIssue {
                context: SourceContext::new(
                    SourceLocation::new(usage.file_path, usage.line + 1, usage.column + 1),
                    source_line,
                ),
                key,
            }
        })
        .collect()
}

pub fn check_unused_keys_issues(
    documents: &[SourceDocument],
    store: &LocaleStore,
) -> Vec<UnusedKeyIssue> {
    let usage = analyze_corpus(documents, store);
    let locale_map: HashMap<String, Vec<String>> = store.locale_map().into_iter().collect();

    usage
        .unused
        .into_iter()
        .filter_map(|key| {
            let locales = locale_map.get(&key)?.clone();
            let entry = store.locale(locales.first()?)?;
            let value = entry.get_value(&key).unwrap_or_default().to_string();
            let location = SourceLocation::new(
                entry.path.to_string_lossy(),
                entry.key_line(&key),
                1,
            );
            Some(UnusedKeyIssue {
                context: MessageContext::new(location, key, value),
                locales,
            })
        })
        .collect()
}
