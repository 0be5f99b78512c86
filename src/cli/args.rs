//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report hardcoded text, missing keys and unused keys
//! - `extract`: Move hardcoded text of one file into the default locale
//! - `usage`: Show where each defined key is used
//! - `status`: Show translation progress per locale
//! - `set`, `rename`, `inline`, `delete`: Edit keys across locales and sources
//! - `init`: Initialize the lokit configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing::Level;

use super::commands::check::CheckRule;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Check(cmd)) => Some(&cmd.common),
            Some(Command::Extract(cmd)) => Some(&cmd.common),
            Some(Command::Usage(cmd)) => Some(&cmd.common),
            Some(Command::Status(cmd)) => Some(&cmd.common),
            Some(Command::Set(cmd)) => Some(&cmd.common),
            Some(Command::Rename(cmd)) => Some(&cmd.common),
            Some(Command::Inline(cmd)) => Some(&cmd.common),
            Some(Command::Delete(cmd)) => Some(&cmd.common),
            Some(Command::Init) | None => None,
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|c| c.verbose)
    }

    /// Diagnostic log level: explicit level, else `DEBUG` when verbose.
    pub fn log_level(&self) -> Level {
        match self.common() {
            Some(CommonArgs {
                log_level: Some(level),
                ..
            }) => *level,
            Some(CommonArgs { verbose: true, .. }) => Level::DEBUG,
            _ => Level::WARN,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locale files directory (overrides config file)
    #[arg(long)]
    pub locales_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Diagnostic log level (error, warn, info, debug, trace)
    #[arg(long, env = "LOKIT_LOG", value_name = "LEVEL")]
    pub log_level: Option<Level>,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Checks to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Source file to extract text from
    pub file: PathBuf,

    /// Namespace prepended to generated keys (overrides config file)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Actually rewrite the file and locale (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct UsageCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SetCommand {
    /// Dotted key, e.g. `home.title`
    pub key: String,
    pub locale: String,
    #[arg(allow_hyphen_values = true)]
    pub value: String,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RenameCommand {
    pub old_key: String,
    pub new_key: String,

    /// Actually write changes (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InlineCommand {
    pub key: String,

    /// Locale whose value replaces the calls (default: first locale)
    #[arg(long)]
    pub locale: Option<String>,

    /// Actually write changes (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct DeleteCommand {
    pub key: String,

    /// Actually delete the key (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check for hardcoded text, missing keys and unused keys
    Check(CheckCommand),
    /// Replace hardcoded text in a file with translation calls
    Extract(ExtractCommand),
    /// Show where each translation key is used
    Usage(UsageCommand),
    /// Show translation progress per locale
    Status(StatusCommand),
    /// Set the value of a key in one locale
    Set(SetCommand),
    /// Rename a key in every locale and source file
    Rename(RenameCommand),
    /// Replace calls to a key with its value and delete the key
    Inline(InlineCommand),
    /// Delete a key from every locale
    Delete(DeleteCommand),
    /// Initialize a new .lokitrc.json configuration file
    Init,
}
