//! Progress reporting for running searches.

use crate::search::{NotFoundReason, SearchResult};
use std::time::Duration;

/// Periodic progress information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Attempts made so far, across all workers.
    pub attempts: u64,
    /// Time since the search started.
    pub elapsed: Duration,
    /// Worker that crossed the reporting threshold.
    pub worker: usize,
}

impl ProgressUpdate {
    /// Attempts per second so far.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.attempts as f64 / secs
    }
}

/// Receives search notifications.
///
/// Progress fires when the attempt count reaches an exact multiple of the
/// configured interval, at most once per multiple. With several workers the
/// calls may arrive from different threads and slightly out of order.
pub trait ProgressObserver {
    /// Called every `progress_interval` attempts.
    fn on_progress(&self, update: &ProgressUpdate);

    /// Called once when a match is found.
    fn on_found(&self, _result: &SearchResult) {}

    /// Called once when the search gives up.
    fn on_not_found(&self, _attempts: u64, _reason: NotFoundReason) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressUpdate),
{
    fn on_progress(&self, update: &ProgressUpdate) {
        self(update);
    }
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}
}

/// Logs notifications through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        tracing::info!(
            attempts = update.attempts,
            worker = update.worker,
            rate = %format!("{:.0}/s", update.rate()),
            "{} attempts so far",
            update.attempts
        );
    }

    fn on_found(&self, result: &SearchResult) {
        tracing::info!(
            attempts = result.attempts,
            address = %result.address,
            elapsed_ms = u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX),
            "Found matching key after {} attempts",
            result.attempts
        );
    }

    fn on_not_found(&self, attempts: u64, reason: NotFoundReason) {
        tracing::warn!(attempts, %reason, "No matching key found");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[test]
    fn rate() {
        let update = ProgressUpdate {
            attempts: 5000,
            elapsed: Duration::from_secs(2),
            worker: 0,
        };
        assert!((update.rate() - 2500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rate_at_time_zero() {
        let update = ProgressUpdate {
            attempts: 10,
            elapsed: Duration::ZERO,
            worker: 0,
        };
        assert!(update.rate().abs() < f64::EPSILON);
    }

    #[test]
    fn closure_observer() {
        let seen = RefCell::new(Vec::new());
        let observer = |update: &ProgressUpdate| seen.borrow_mut().push(update.attempts);

        for attempts in [1000, 2000] {
            observer.on_progress(&ProgressUpdate {
                attempts,
                elapsed: Duration::ZERO,
                worker: 0,
            });
        }
        observer.on_not_found(2000, NotFoundReason::BudgetExhausted);

        assert_eq!(*seen.borrow(), vec![1000, 2000]);
    }
}
