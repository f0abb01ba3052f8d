// src/exit.rs
//! Standardized process exit codes for `abapscan`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AbapscanExit {
    /// Scan completed with nothing to report.
    Success = 0,
    /// Generic error (e.g. IO, config).
    Error = 1,
    /// Input could not be decoded into units.
    InvalidInput = 2,
    /// At least one finding was reported.
    FindingsReported = 3,
    /// At least one unit's scan was aborted by its limits.
    ScanAborted = 4,
}

impl AbapscanExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for AbapscanExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(AbapscanExit::Success.code(), 0);
        assert_eq!(AbapscanExit::Error.code(), 1);
        assert_eq!(AbapscanExit::InvalidInput.code(), 2);
        assert_eq!(AbapscanExit::FindingsReported.code(), 3);
        assert_eq!(AbapscanExit::ScanAborted.code(), 4);
    }
}
