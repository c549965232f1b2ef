// src/exit.rs
//! Process exit codes for `tuplelint`, stable for scripts and CI.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LintExit {
    /// No violations at the failing severity.
    Success = 0,
    /// At least one violation at the failing severity.
    ViolationsFound = 1,
    /// Configuration, I/O or argument error.
    Error = 2,
}

impl LintExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for LintExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
