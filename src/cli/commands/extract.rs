use std::fs;

use anyhow::{Context, Result, bail};

use super::super::{args::ExtractCommand, context::ProjectContext};
use super::{
    CommandResult, CommandSummary, ExtractEntry, ExtractSummary,
    helper::{ensure_writable, finish_write, merge_outcomes},
};
use crate::core::{
    BatchOutcome, LocaleStore, SourceDocument, TextSpan,
    extract::{Extraction, apply_extraction, plan_extraction, planned_messages},
    scan_document,
    store::save_locales,
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let display_path = cmd.file.to_string_lossy().replace('\\', "/");
    let text = fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read {}", display_path))?;
    let document = SourceDocument::new(display_path.clone(), text);

    let loaded = ctx.load_store()?;
    let Some(locale) = loaded.store.default_locale().map(str::to_string) else {
        bail!("No locale to write extracted text to");
    };
    if cmd.apply {
        ensure_writable(&loaded, &locale)?;
    }
    let mut store = loaded.store;

    let options = ctx.scan_options().every_occurrence();
    let spans = scan_document(&document, &options);
    let prefix = cmd.prefix.as_deref().or(ctx.config.key_prefix());
    let plan = plan_extraction(&spans, prefix);

    let (added_keys, existing_keys) = partition_messages(&store, &locale, &plan);
    let entries = located_entries(&spans, &plan);

    let mut outcome = BatchOutcome::default();
    if cmd.apply && !plan.is_empty() {
        outcome = write_extraction(&document, &spans, &plan, &mut store, &locale, &added_keys)?;
    }

    let failures = outcome.failed();
    Ok(finish_write(
        CommandSummary::Extract(ExtractSummary {
            file: display_path,
            locale,
            entries,
            added_keys: added_keys.into_iter().map(|(k, _)| k).collect(),
            existing_keys,
            is_apply: cmd.apply,
            outcome,
        }),
        failures,
    ))
}

/// Split planned messages into new `(key, text)` pairs and keys the locale
/// already defines.
fn partition_messages(
    store: &LocaleStore,
    locale: &str,
    plan: &[Extraction],
) -> (Vec<(String, String)>, Vec<String>) {
    let mut added = Vec::new();
    let mut existing = Vec::new();
    for (key, text) in planned_messages(plan) {
        if store.get_value(locale, &key).is_some() {
            existing.push(key);
        } else {
            added.push((key, text));
        }
    }
    (added, existing)
}

fn located_entries(spans: &[TextSpan], plan: &[Extraction]) -> Vec<ExtractEntry> {
    plan.iter()
        .filter_map(|extraction| {
            let span = spans.iter().find(|s| s.id == extraction.span_id)?;
            Some(ExtractEntry {
                line: span.start.line + 1,
                col: span.start.column + 1,
                text: extraction.text.clone(),
                key: extraction.key.clone(),
                replacement: extraction.replacement.clone(),
            })
        })
        .collect()
}

fn write_extraction(
    document: &SourceDocument,
    spans: &[TextSpan],
    plan: &[Extraction],
    store: &mut LocaleStore,
    locale: &str,
    added: &[(String, String)],
) -> Result<BatchOutcome> {
    let rewritten = apply_extraction(&document.text, spans, plan)
        .with_context(|| format!("Failed to rewrite {}", document.path))?;

    for (key, text) in added {
        store.set_value(locale, key, text)?;
    }

    let mut file_outcome = BatchOutcome::default();
    match fs::write(&document.path, rewritten) {
        Ok(()) => file_outcome.record_success(),
        Err(e) => file_outcome.record_failure(document.path.clone(), e),
    }
    let locale_outcome = if added.is_empty() {
        BatchOutcome::default()
    } else {
        save_locales(store, &[locale.to_string()])
    };
    Ok(merge_outcomes([file_outcome, locale_outcome]))
}
