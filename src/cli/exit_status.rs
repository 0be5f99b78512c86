use std::process::ExitCode;

/// Process exit status of `lokit`.
///
/// - `Success` (0): the command ran and found nothing to fail on
/// - `Failure` (1): `check` found errors, or some file writes failed
/// - `Error` (2): the command could not run (bad config, missing locales, unknown key)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
