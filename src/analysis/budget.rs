// src/analysis/budget.rs
//! Per-unit resource caps.

use std::time::{Duration, Instant};

use crate::config::LimitConfig;
use crate::error::ScanError;

/// Length cap and wall-clock deadline for one unit's scan.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    max_chars: usize,
    started: Instant,
    allowed: Duration,
}

impl Budget {
    #[must_use]
    pub fn start(limits: &LimitConfig) -> Self {
        Self {
            max_chars: limits.max_unit_chars,
            started: Instant::now(),
            allowed: Duration::from_millis(limits.scan_timeout_ms),
        }
    }

    /// Rejects sources longer than the cap before any matching happens.
    ///
    /// # Errors
    /// Returns `ScanError::LimitExceeded` if `source` is too long.
    pub fn admit(&self, source: &str) -> Result<(), ScanError> {
        // Byte length bounds the char count from above; only count when it matters.
        if source.len() <= self.max_chars {
            return Ok(());
        }
        let chars = source.chars().count();
        if chars > self.max_chars {
            return Err(ScanError::LimitExceeded { chars, limit: self.max_chars });
        }
        Ok(())
    }

    /// # Errors
    /// Returns `ScanError::Timeout` once the deadline has passed.
    pub fn check(&self) -> Result<(), ScanError> {
        if self.started.elapsed() > self.allowed {
            return Err(ScanError::Timeout {
                budget_ms: u64::try_from(self.allowed.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }
}
