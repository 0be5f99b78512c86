use anyhow::Result;

use super::super::{
    args::{StatusCommand, UsageCommand},
    context::ProjectContext,
};
use super::{
    CommandResult, CommandSummary, StatusSummary, UsageSummary,
    helper::{finish, parse_error_issues},
};
use crate::core::usage::analyze_corpus;

pub fn usage(cmd: UsageCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let loaded = ctx.load_store()?;
    let corpus = ctx.usage_sources();
    let usage = analyze_corpus(&corpus, &loaded.store);

    Ok(finish(
        CommandSummary::Usage(UsageSummary { usage }),
        parse_error_issues(loaded.warnings),
        corpus.len(),
        loaded.store.locales.len(),
        false,
    ))
}

pub fn status(cmd: StatusCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let loaded = ctx.load_store()?;
    let statuses = loaded.store.translation_status();

    Ok(finish(
        CommandSummary::Status(StatusSummary { statuses }),
        parse_error_issues(loaded.warnings),
        0,
        loaded.store.locales.len(),
        false,
    ))
}
