use crate::{
    core::{BatchOutcome, KeyAction, TranslationStatus, usage::CorpusUsage},
    issues::Issue,
};

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Extract(ExtractSummary),
    Usage(UsageSummary),
    Status(StatusSummary),
    Set(SetSummary),
    Rename(RenameSummary),
    Inline(InlineSummary),
    Delete(DeleteSummary),
    Init(InitSummary),
}

/// One planned replacement, located for display. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractEntry {
    pub line: usize,
    pub col: usize,
    pub text: String,
    pub key: String,
    pub replacement: String,
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub file: String,
    pub locale: String,
    pub entries: Vec<ExtractEntry>,
    /// Keys written to the locale.
    pub added_keys: Vec<String>,
    /// Keys the locale already defined; their values are kept.
    pub existing_keys: Vec<String>,
    pub is_apply: bool,
    pub outcome: BatchOutcome,
}

#[derive(Debug)]
pub struct UsageSummary {
    pub usage: CorpusUsage,
}

#[derive(Debug)]
pub struct StatusSummary {
    pub statuses: Vec<TranslationStatus>,
}

#[derive(Debug)]
pub struct SetSummary {
    pub key: String,
    pub locale: String,
    pub action: KeyAction,
    pub outcome: BatchOutcome,
}

#[derive(Debug)]
pub struct RenameSummary {
    pub old_key: String,
    pub new_key: String,
    pub locales: Vec<String>,
    pub files: Vec<String>,
    pub is_apply: bool,
    pub outcome: BatchOutcome,
}

#[derive(Debug)]
pub struct InlineSummary {
    pub key: String,
    pub value: String,
    pub locales: Vec<String>,
    pub files: Vec<String>,
    pub is_apply: bool,
    pub outcome: BatchOutcome,
}

#[derive(Debug)]
pub struct DeleteSummary {
    pub key: String,
    pub locales: Vec<String>,
    /// Files still calling the key.
    pub referenced_by: Vec<String>,
    pub is_apply: bool,
    pub outcome: BatchOutcome,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a lokit command
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Issues found by `check`. Empty for other commands.
    pub issues: Vec<Issue>,
    /// Number of locale files that failed to load.
    pub parse_error_count: usize,
    pub source_files_checked: usize,
    pub locale_files_checked: usize,
}
