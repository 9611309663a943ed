use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Every locale was processed
/// - `Failure` (1): The command ran but one or more locales failed
/// - `Error` (2): The command aborted (config, store, reference or I/O error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every locale was processed.
    Success,
    /// The command ran but one or more locales failed.
    Failure,
    /// The command aborted before processing locales.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
