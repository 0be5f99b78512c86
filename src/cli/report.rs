//! Report formatting and printing.
//!
//! Issues are printed in cargo style; every other command prints a short
//! summary of what it did or would do.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, DeleteSummary, ExtractSummary, InitSummary, InlineSummary,
    RenameSummary, SetSummary, StatusSummary, UsageSummary,
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::{BatchOutcome, KeyAction},
    issues::{Issue, Report, ReportLocation, Severity},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Untranslated keys listed per locale by `status` without `-v`.
const MAX_UNTRANSLATED_DISPLAY: usize = 5;

/// Print issues in cargo-style format.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(source_files: usize, locale_files: usize, writer: &mut W) {
    let checked = if locale_files == 0 {
        format!("Checked {} source {}", source_files, plural(source_files, "file"))
    } else {
        format!(
            "Checked {} source {}, {} locale {}",
            source_files,
            plural(source_files, "file"),
            locale_files,
            plural(locale_files, "file")
        )
    };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("{} - no issues found", checked).green()
    );
}

/// Print a warning about locale files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} locale file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (line, col) = (loc.line(), loc.col());

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match &loc {
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        _ => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                loc.file_path(),
                line,
                col
            );
        }
    }

    if let ReportLocation::Source(ctx) = &loc {
        let source_line = &ctx.source_line;
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // col is 1-based
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        plural(total_errors, "error").red(),
        total_warnings,
        plural(total_warnings, "warning").yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            _ => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command summaries
// ============================================================

pub fn print(result: &CommandResult, verbose: bool) {
    let stdout = &mut io::stdout().lock();
    match &result.summary {
        CommandSummary::Check => {
            report_to(&result.issues, stdout);
            if result.issues.is_empty() {
                print_success_to(
                    result.source_files_checked,
                    result.locale_files_checked,
                    stdout,
                );
            }
            return;
        }
        CommandSummary::Extract(summary) => print_extract(summary, stdout),
        CommandSummary::Usage(summary) => print_usage(summary, stdout),
        CommandSummary::Status(summary) => print_status(summary, verbose, stdout),
        CommandSummary::Set(summary) => print_set(summary, stdout),
        CommandSummary::Rename(summary) => print_rename(summary, stdout),
        CommandSummary::Inline(summary) => print_inline(summary, stdout),
        CommandSummary::Delete(summary) => print_delete(summary, stdout),
        CommandSummary::Init(summary) => print_init(summary, stdout),
    }

    print_parse_warning(result.parse_error_count, verbose);
}

/// Report per-file write failures on stderr.
fn print_failures(outcome: &BatchOutcome) {
    let stderr = &mut io::stderr().lock();
    for failure in &outcome.failures {
        let _ = writeln!(
            stderr,
            "{} failed to write {}: {}",
            "error:".bold().red(),
            failure.item,
            failure.error
        );
    }
}

fn print_extract<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    if summary.entries.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("No hardcoded text found in {}", summary.file).green()
        );
        return;
    }

    for entry in &summary.entries {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{} \"{}\" {} {}",
            "-->".blue(),
            summary.file,
            entry.line,
            entry.col,
            entry.text,
            "=>".dimmed(),
            entry.replacement
        );
    }

    let count = summary.entries.len();
    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} text(s) from {}; added {} key(s) to {}.",
            "Extracted".green().bold(),
            count,
            summary.file,
            summary.added_keys.len(),
            summary.locale
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} text(s) from {} ({} new key(s) for {}).",
            "Would extract".yellow().bold(),
            count,
            summary.file,
            summary.added_keys.len(),
            summary.locale
        );
    }
    if !summary.existing_keys.is_empty() {
        let _ = writeln!(
            writer,
            "  - reused: {} existing key(s): {}",
            summary.existing_keys.len(),
            summary.existing_keys.join(", ")
        );
    }
    if !summary.is_apply {
        let _ = writeln!(
            writer,
            "Run with {} to rewrite the file.",
            "--apply".cyan()
        );
    }
    print_failures(&summary.outcome);
}

fn print_usage<W: Write>(summary: &UsageSummary, writer: &mut W) {
    let usage = &summary.usage;
    for key in &usage.used {
        let _ = writeln!(
            writer,
            "{} {}",
            key.key.bold(),
            format!("({})", key.locales.join(", ")).dimmed()
        );
        for location in &key.used_by {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "used by".dimmed(),
                location.file_path,
                location.line + 1,
                location.column + 1
            );
        }
    }

    if !usage.unused.is_empty() {
        if !usage.used.is_empty() {
            let _ = writeln!(writer);
        }
        let _ = writeln!(
            writer,
            "{} {}:",
            "Unused".yellow().bold(),
            plural(usage.unused.len(), "key")
        );
        for key in &usage.unused {
            let _ = writeln!(writer, "  {}", key);
        }
    }

    let _ = writeln!(
        writer,
        "\n{} used, {} unused",
        usage.used.len(),
        usage.unused.len()
    );
}

fn print_status<W: Write>(summary: &StatusSummary, verbose: bool, writer: &mut W) {
    let width = summary
        .statuses
        .iter()
        .map(|s| s.locale.len())
        .max()
        .unwrap_or(0);

    for status in &summary.statuses {
        let progress = format!("{:>3}%", status.progress);
        let progress = if status.untranslated == 0 {
            progress.green()
        } else {
            progress.yellow()
        };
        let _ = writeln!(
            writer,
            "{:<width$}  {}  {}/{}",
            status.locale,
            progress,
            status.translated,
            status.total,
            width = width
        );

        if status.untranslated_keys.is_empty() {
            continue;
        }
        let shown = if verbose {
            status.untranslated_keys.len()
        } else {
            status.untranslated_keys.len().min(MAX_UNTRANSLATED_DISPLAY)
        };
        let remaining = status.untranslated_keys.len() - shown;
        let suffix = if remaining > 0 {
            format!(" (and {} more)", remaining)
        } else {
            String::new()
        };
        let _ = writeln!(
            writer,
            "{:<width$}  {} {}{}",
            "",
            "missing:".dimmed(),
            status.untranslated_keys[..shown].join(", "),
            suffix,
            width = width
        );
    }
}

fn print_set<W: Write>(summary: &SetSummary, writer: &mut W) {
    if summary.outcome.is_clean() {
        let verb = match summary.action {
            KeyAction::Added => "Added",
            KeyAction::Updated => "Updated",
        };
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} '{}' in {}", verb, summary.key, summary.locale).green()
        );
    }
    print_failures(&summary.outcome);
}

fn print_file_list<W: Write>(files: &[String], writer: &mut W) {
    for file in files {
        let _ = writeln!(writer, "    {}", file);
    }
}

fn print_rename<W: Write>(summary: &RenameSummary, writer: &mut W) {
    let verb = if summary.is_apply {
        "Renamed".green().bold()
    } else {
        "Would rename".yellow().bold()
    };
    let _ = writeln!(
        writer,
        "{} '{}' to '{}' in {} locale(s) and {} file(s).",
        verb,
        summary.old_key,
        summary.new_key,
        summary.locales.len(),
        summary.files.len()
    );
    let _ = writeln!(writer, "  - locales: {}", summary.locales.join(", "));
    if !summary.files.is_empty() {
        let _ = writeln!(writer, "  - files:");
        print_file_list(&summary.files, writer);
    }
    if !summary.is_apply {
        let _ = writeln!(writer, "Run with {} to rename this key.", "--apply".cyan());
    }
    print_failures(&summary.outcome);
}

fn print_inline<W: Write>(summary: &InlineSummary, writer: &mut W) {
    let verb = if summary.is_apply {
        "Inlined".green().bold()
    } else {
        "Would inline".yellow().bold()
    };
    let _ = writeln!(
        writer,
        "{} '{}' as \"{}\" in {} file(s) and delete it from {} locale(s).",
        verb,
        summary.key,
        summary.value,
        summary.files.len(),
        summary.locales.len()
    );
    if !summary.files.is_empty() {
        let _ = writeln!(writer, "  - files:");
        print_file_list(&summary.files, writer);
    }
    if !summary.is_apply {
        let _ = writeln!(writer, "Run with {} to inline this key.", "--apply".cyan());
    }
    print_failures(&summary.outcome);
}

fn print_delete<W: Write>(summary: &DeleteSummary, writer: &mut W) {
    let verb = if summary.is_apply {
        "Deleted".green().bold()
    } else {
        "Would delete".yellow().bold()
    };
    let _ = writeln!(
        writer,
        "{} '{}' from {} locale(s): {}",
        verb,
        summary.key,
        summary.locales.len(),
        summary.locales.join(", ")
    );
    if !summary.referenced_by.is_empty() {
        let _ = writeln!(
            writer,
            "{} '{}' is still used in {} file(s):",
            "warning:".bold().yellow(),
            summary.key,
            summary.referenced_by.len()
        );
        print_file_list(&summary.referenced_by, writer);
    }
    if !summary.is_apply {
        let _ = writeln!(writer, "Run with {} to delete this key.", "--apply".cyan());
    }
    print_failures(&summary.outcome);
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}
