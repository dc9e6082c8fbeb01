//! Cooperative cancellation and deadlines

use crate::errors::{ExError, VerifyError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Caller-supplied cancellation flag with an optional deadline
///
/// Clones share the flag, so cancelling any clone cancels them all. The
/// verifier checks the token before every fetch and between processing
/// steps; fetchers may check it too.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Token that is never cancelled unless `cancel` is called
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Keep the earlier of the existing and the given deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail fast if the token was cancelled or its deadline passed
    ///
    /// # Errors
    ///
    /// `Cancelled` or `Timeout`, tagged with `op`.
    pub fn check(&self, op: &str) -> Result<(), ExError> {
        if self.is_cancelled() {
            return Err(VerifyError::Cancelled { op: op.to_string() }.into());
        }
        if self.is_expired() {
            return Err(VerifyError::DeadlineExceeded { op: op.to_string() }.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_fresh_token_passes() {
        assert!(CancelToken::new().check("fetch_source").is_ok());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();

        let err = token.check("fetch_source").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Cancelled);
        assert_eq!(err.op(), Some("fetch_source"));
    }

    #[test]
    fn test_elapsed_deadline_times_out() {
        let token = CancelToken::new().with_deadline(Instant::now());
        let err = token.check("fetch_declaration").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Timeout);
    }

    #[test]
    fn test_earlier_deadline_wins() {
        let now = Instant::now();
        let token = CancelToken::new()
            .with_deadline(now + Duration::from_secs(10))
            .with_deadline(now + Duration::from_secs(60));
        assert_eq!(token.deadline(), Some(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_future_deadline_passes() {
        let token = CancelToken::new().with_timeout(Duration::from_secs(3600));
        assert!(token.check("build").is_ok());
    }
}
