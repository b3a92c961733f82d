//! Cooperative limits for long scans: a cancellation token shared with the
//! caller and an optional wall-clock budget per scan.
//!
//! A scan checks its [`ScanControl`] between oracle queries; exceeding the
//! budget abandons that scan with [`SkywatchError::ScanTimeout`], a pending
//! cancellation with [`SkywatchError::Cancelled`]. Neither aborts sibling
//! scans in a batch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::skywatch_errors::SkywatchError;

/// Shared flag a caller raises to abandon in-flight work.
///
/// Cloning is cheap; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Per-scan limits, checked cooperatively between time samples.
#[derive(Debug, Clone, Default)]
pub struct ScanControl {
    deadline: Option<Instant>,
    cancel: Option<CancelToken>,
}

impl ScanControl {
    /// No limits; the scan runs to the end of its window.
    pub fn unbounded() -> ScanControl {
        ScanControl::default()
    }

    /// Abandon the scan once `budget` of wall-clock time has elapsed.
    pub fn with_timeout(mut self, budget: Duration) -> ScanControl {
        self.deadline = Some(Instant::now() + budget);
        self
    }

    /// Abandon the scan when `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> ScanControl {
        self.cancel = Some(token);
        self
    }

    /// Check both limits; called between oracle queries.
    pub fn check(&self) -> Result<(), SkywatchError> {
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return Err(SkywatchError::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(SkywatchError::ScanTimeout);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod scan_control_test {
    use super::*;

    #[test]
    fn test_unbounded_always_passes() {
        assert!(ScanControl::unbounded().check().is_ok());
    }

    #[test]
    fn test_cancel_is_shared_across_clones() {
        let token = CancelToken::new();
        let control = ScanControl::unbounded().with_cancel(token.clone());
        assert!(control.check().is_ok());

        token.cancel();
        assert_eq!(control.check().unwrap_err(), SkywatchError::Cancelled);
    }

    #[test]
    fn test_expired_budget_times_out() {
        let control = ScanControl::unbounded().with_timeout(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(control.check().unwrap_err(), SkywatchError::ScanTimeout);
    }
}
