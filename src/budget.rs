//! Run budget: wall-clock deadline and external cancellation.
//!
//! Phases poll [`Budget::exhausted`] between iterations, never inside one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Deadline and cancellation token for a single optimization run.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Budget {
    /// A budget that never runs out.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Sets a deadline `limit` after `started`.
    ///
    /// A limit too large to represent as an `Instant` means no deadline.
    pub fn with_time_limit(mut self, started: Instant, limit: Duration) -> Self {
        self.deadline = started.checked_add(limit);
        self
    }

    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns `true` once the deadline has passed or cancellation was requested.
    pub fn exhausted(&self) -> bool {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_exhausted() {
        assert!(!Budget::unlimited().exhausted());
    }

    #[test]
    fn test_zero_time_limit() {
        let budget = Budget::unlimited().with_time_limit(Instant::now(), Duration::ZERO);
        assert!(budget.exhausted());
    }

    #[test]
    fn test_generous_time_limit() {
        let budget = Budget::unlimited().with_time_limit(Instant::now(), Duration::from_secs(3600));
        assert!(!budget.exhausted());
    }

    #[test]
    fn test_unrepresentable_time_limit_is_unlimited() {
        let budget = Budget::unlimited().with_time_limit(Instant::now(), Duration::MAX);
        assert!(!budget.exhausted());
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let budget = Budget::unlimited().with_cancel(flag.clone());
        assert!(!budget.exhausted());
        flag.store(true, Ordering::Relaxed);
        assert!(budget.exhausted());
    }
}
