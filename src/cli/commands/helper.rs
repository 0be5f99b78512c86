use anyhow::{Result, bail};

use super::{CommandResult, CommandSummary};
use crate::{
    core::{
        BatchOutcome,
        store::{LocaleWarning, StoreLoadResult},
    },
    issues::{Issue, ParseErrorIssue, Report, Severity},
};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    source_files_checked: usize,
    locale_files_checked: usize,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let error_count = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();

    CommandResult {
        summary,
        error_count,
        exit_on_errors,
        issues,
        parse_error_count,
        source_files_checked,
        locale_files_checked,
    }
}

/// Result of a command that writes files; each failed write is an error.
pub fn finish_write(summary: CommandSummary, outcome_failures: usize) -> CommandResult {
    CommandResult {
        summary,
        error_count: outcome_failures,
        exit_on_errors: true,
        issues: Vec::new(),
        parse_error_count: 0,
        source_files_checked: 0,
        locale_files_checked: 0,
    }
}

pub fn parse_error_issues(warnings: Vec<LocaleWarning>) -> Vec<Issue> {
    warnings
        .into_iter()
        .map(|w| {
            Issue::ParseError(ParseErrorIssue {
                file_path: w.file_path,
                error: w.error,
            })
        })
        .collect()
}

/// Refuse to write a locale whose file failed to load; it is held empty and
/// saving it would drop its content.
pub fn ensure_writable(loaded: &StoreLoadResult, locale: &str) -> Result<()> {
    let Some(entry) = loaded.store.locale(locale) else {
        bail!("Unknown locale '{}'", locale);
    };
    let path = entry.path.to_string_lossy();
    if loaded.warnings.iter().any(|w| w.file_path == path) {
        bail!("Cannot write to {}: the file could not be parsed", path);
    }
    Ok(())
}

/// Combine per-target write outcomes.
pub fn merge_outcomes(outcomes: impl IntoIterator<Item = BatchOutcome>) -> BatchOutcome {
    outcomes
        .into_iter()
        .fold(BatchOutcome::default(), |mut acc, outcome| {
            acc.merge(outcome);
            acc
        })
}
