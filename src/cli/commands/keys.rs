//! Key editing commands: `set`, `rename`, `inline` and `delete`.

use anyhow::{Result, bail};

use super::super::{
    args::{DeleteCommand, InlineCommand, RenameCommand, SetCommand},
    context::ProjectContext,
};
use super::{
    CommandResult, CommandSummary, DeleteSummary, InlineSummary, RenameSummary, SetSummary,
    helper::{ensure_writable, finish_write, merge_outcomes},
};
use crate::core::{
    BatchOutcome, SourceDocument,
    corpus::write_documents,
    references::{find_key_references, rename_references, replace_references_with_literal},
    store::save_locales,
};

fn paths(documents: &[SourceDocument]) -> Vec<String> {
    documents.iter().map(|d| d.path.clone()).collect()
}

pub fn set(cmd: SetCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let loaded = ctx.load_store()?;
    ensure_writable(&loaded, &cmd.locale)?;

    let mut store = loaded.store;
    let action = store.set_value(&cmd.locale, &cmd.key, &cmd.value)?;
    let outcome = save_locales(&store, std::slice::from_ref(&cmd.locale));

    let failures = outcome.failed();
    Ok(finish_write(
        CommandSummary::Set(SetSummary {
            key: cmd.key,
            locale: cmd.locale,
            action,
            outcome,
        }),
        failures,
    ))
}

pub fn rename(cmd: RenameCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let mut store = ctx.load_store()?.store;

    if !store.is_defined(&cmd.old_key) {
        bail!("Key '{}' not found in any locale", cmd.old_key);
    }
    if store.is_defined(&cmd.new_key) {
        bail!("Key '{}' already exists", cmd.new_key);
    }

    let locales = store.rename_key(&cmd.old_key, &cmd.new_key);
    let corpus = ctx.usage_sources();
    let updated = rename_references(&corpus, &cmd.old_key, &cmd.new_key);

    let outcome = if cmd.apply {
        merge_outcomes([
            save_locales(&store, &locales),
            write_documents(&ctx.source_root, &updated),
        ])
    } else {
        BatchOutcome::default()
    };

    let failures = outcome.failed();
    Ok(finish_write(
        CommandSummary::Rename(RenameSummary {
            old_key: cmd.old_key,
            new_key: cmd.new_key,
            locales,
            files: paths(&updated),
            is_apply: cmd.apply,
            outcome,
        }),
        failures,
    ))
}

pub fn inline(cmd: InlineCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let mut store = ctx.load_store()?.store;

    let locale = match cmd.locale {
        Some(locale) => locale,
        None => match store.default_locale() {
            Some(locale) => locale.to_string(),
            None => bail!("No locale to read the value of '{}' from", cmd.key),
        },
    };
    if store.locale(&locale).is_none() {
        bail!("Unknown locale '{}'", locale);
    }
    let Some(value) = store.get_value(&locale, &cmd.key).map(str::to_string) else {
        bail!("Key '{}' has no value in locale '{}'", cmd.key, locale);
    };

    let corpus = ctx.usage_sources();
    let updated = replace_references_with_literal(&corpus, &cmd.key, &value);
    let locales = store.delete_key(&cmd.key);

    let outcome = if cmd.apply {
        merge_outcomes([
            write_documents(&ctx.source_root, &updated),
            save_locales(&store, &locales),
        ])
    } else {
        BatchOutcome::default()
    };

    let failures = outcome.failed();
    Ok(finish_write(
        CommandSummary::Inline(InlineSummary {
            key: cmd.key,
            value,
            locales,
            files: paths(&updated),
            is_apply: cmd.apply,
            outcome,
        }),
        failures,
    ))
}

pub fn delete(cmd: DeleteCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let mut store = ctx.load_store()?.store;

    let locales = store.delete_key(&cmd.key);
    if locales.is_empty() {
        bail!("Key '{}' not found in any locale", cmd.key);
    }

    let corpus = ctx.usage_sources();
    let referenced_by = find_key_references(&corpus, &cmd.key)
        .into_iter()
        .map(|d| d.path.clone())
        .collect();

    let outcome = if cmd.apply {
        save_locales(&store, &locales)
    } else {
        BatchOutcome::default()
    };

    let failures = outcome.failed();
    Ok(finish_write(
        CommandSummary::Delete(DeleteSummary {
            key: cmd.key,
            locales,
            referenced_by,
            is_apply: cmd.apply,
            outcome,
        }),
        failures,
    ))
}
