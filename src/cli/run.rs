/// Dispatches to the command handler for the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with error counts and exit behavior
/// - `Err` if the command cannot run (bad config, missing locales, unknown key)
use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult,
        check::check,
        extract::extract,
        init::init,
        keys::{delete, inline, rename, set},
        usage::{status, usage},
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Usage(cmd)) => usage(cmd),
        Some(Command::Status(cmd)) => status(cmd),
        Some(Command::Set(cmd)) => set(cmd),
        Some(Command::Rename(cmd)) => rename(cmd),
        Some(Command::Inline(cmd)) => inline(cmd),
        Some(Command::Delete(cmd)) => delete(cmd),
        Some(Command::Init) => init(),
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
