//! Exit codes for the CLI tool.

use dirzip::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Operation finished but not every entry was processed
pub const INCOMPLETE: i32 = 1;
/// Operation failed
pub const FAILURE: i32 = 2;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    Incomplete,
    Failure,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::Incomplete => INCOMPLETE,
            Self::Failure => FAILURE,
        }
    }

    /// Success if `ok`, otherwise incomplete
    pub fn from_complete(ok: bool) -> Self {
        if ok { Self::Success } else { Self::Incomplete }
    }
}

/// Reports an error on stderr and converts it to an exit code
pub fn report(error: &Error) -> ExitCode {
    eprintln!("Error: {}", error);
    match error {
        Error::EntryNotFound { .. } => ExitCode::Incomplete,
        _ => ExitCode::Failure,
    }
}
