//! Exit status codes for the CLI
//!
//! fetchplan follows curl's convention for argument problems:
//! - 0: Success, the plan was resolved
//! - 1: Tool failure (unreadable config, bad TOML, I/O errors)
//! - 2: A directive could not be resolved ("failed to initialize")

use std::process::{ExitCode, Termination};

use crate::errors::PlanError;

/// Exit status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Plan resolved
    Success = 0,
    /// Tool or environment failure
    Error = 1,
    /// A flag, directive or URL pattern was rejected
    BadDirective = 2,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Pick the exit status for a failed resolution
    pub fn from_error(error: &PlanError) -> Self {
        if error.is_directive_error() {
            ExitStatus::BadDirective
        } else {
            ExitStatus::Error
        }
    }

    /// Create an exit status from a raw exit code
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            2 => ExitStatus::BadDirective,
            _ => ExitStatus::Error,
        }
    }
}
