//! Console progress for long searches.

use indicatif::{ProgressBar, ProgressStyle};
use keygrind_search::{NotFoundReason, ProgressObserver, ProgressUpdate, SearchResult, TracingObserver};
use std::time::Duration;

/// Spinner on stderr plus structured log events.
pub struct ConsoleProgressReporter {
    progress_bar: ProgressBar,
    log: TracingObserver,
}

impl ConsoleProgressReporter {
    /// Creates a reporter. A hidden reporter only logs.
    pub fn new(visible: bool) -> Self {
        let progress_bar = if visible {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("searching...");
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        } else {
            ProgressBar::hidden()
        };

        Self {
            progress_bar,
            log: TracingObserver,
        }
    }
}

impl ProgressObserver for ConsoleProgressReporter {
    fn on_progress(&self, update: &ProgressUpdate) {
        self.progress_bar.set_position(update.attempts);
        self.progress_bar.set_message(format!(
            "{} attempts so far ({:.0} keys/s)",
            update.attempts,
            update.rate()
        ));
        self.log.on_progress(update);
    }

    fn on_found(&self, result: &SearchResult) {
        self.progress_bar.finish_and_clear();
        self.log.on_found(result);
    }

    fn on_not_found(&self, attempts: u64, reason: NotFoundReason) {
        self.progress_bar.finish_and_clear();
        self.log.on_not_found(attempts, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_reporter_tracks_position() {
        let reporter = ConsoleProgressReporter::new(false);
        reporter.on_progress(&ProgressUpdate {
            attempts: 3000,
            elapsed: Duration::from_secs(1),
            worker: 0,
        });
        assert_eq!(reporter.progress_bar.position(), 3000);
    }

    #[test]
    fn finishes_on_not_found() {
        let reporter = ConsoleProgressReporter::new(false);
        reporter.on_not_found(10, NotFoundReason::BudgetExhausted);
        assert!(reporter.progress_bar.is_finished());
    }
}
