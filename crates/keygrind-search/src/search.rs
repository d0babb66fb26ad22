//! Sequential rejection-sampling search.

use crate::attempts::Attempts;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::progress::{ProgressObserver, ProgressUpdate};
use crate::source::KeySource;
use keygrind_identity::Keypair;
use std::fmt;
use std::time::{Duration, Instant};

/// A matching keypair and what it took to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The winning keypair.
    pub keypair: Keypair,
    /// Its base58 address.
    pub address: String,
    /// Attempts made until the search stopped, summed across workers.
    pub attempts: u64,
    /// Wall-clock time until the match.
    pub elapsed: Duration,
    /// Index of the worker that found the match.
    pub worker: usize,
}

/// Why a search ended without a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The attempt budget ran out.
    BudgetExhausted,
    /// The wall-clock timeout passed.
    DeadlineElapsed,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetExhausted => write!(f, "attempt budget exhausted"),
            Self::DeadlineElapsed => write!(f, "timeout elapsed"),
        }
    }
}

/// How a search ended. Both variants are normal results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A matching keypair was found.
    Found(SearchResult),
    /// The search stopped without a match.
    NotFound {
        /// Attempts made before stopping.
        attempts: u64,
        /// What stopped the search.
        reason: NotFoundReason,
    },
}

impl SearchOutcome {
    /// Number of attempts made, whatever the outcome.
    #[must_use]
    pub fn attempts(&self) -> u64 {
        match self {
            Self::Found(result) => result.attempts,
            Self::NotFound { attempts, .. } => *attempts,
        }
    }

    /// Returns true for [`SearchOutcome::Found`].
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the result if a match was found.
    #[must_use]
    pub fn found(self) -> Option<SearchResult> {
        match self {
            Self::Found(result) => Some(result),
            Self::NotFound { .. } => None,
        }
    }
}

/// Single-threaded brute-force search.
///
/// Each iteration generates a keypair, renders its address, counts the
/// attempt and tests the pattern. Expected attempts for a pattern pinning
/// `L` characters is about `58^L`.
#[derive(Debug, Clone)]
pub struct PrefixSearch {
    pub(crate) config: SearchConfig,
}

impl PrefixSearch {
    /// Validates `config` and prepares a search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`](crate::SearchError::InvalidConfig)
    /// before any keypair is generated.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search on the calling thread.
    ///
    /// `config.workers` is ignored; see [`ParallelSearch`](crate::ParallelSearch).
    pub fn run<S>(&self, source: &mut S, observer: &dyn ProgressObserver) -> SearchOutcome
    where
        S: KeySource + ?Sized,
    {
        let config = &self.config;
        let started = Instant::now();
        let deadline = config.timeout.and_then(|t| started.checked_add(t));
        let expired = || deadline.is_some_and(|d| Instant::now() >= d);

        tracing::debug!(
            pattern = %config.pattern,
            max_attempts = ?config.max_attempts,
            progress_interval = config.progress_interval,
            "Starting search"
        );

        if expired() {
            return finish_not_found(0, NotFoundReason::DeadlineElapsed, observer);
        }

        let mut attempts = Attempts::new(source);
        loop {
            let attempt = attempts.next_attempt();
            let n = attempt.number;

            if config.pattern.matches(&attempt.address) {
                let result = SearchResult {
                    keypair: attempt.keypair,
                    address: attempt.address,
                    attempts: n,
                    elapsed: started.elapsed(),
                    worker: 0,
                };
                observer.on_found(&result);
                return SearchOutcome::Found(result);
            }

            if n % config.progress_interval == 0 {
                observer.on_progress(&ProgressUpdate {
                    attempts: n,
                    elapsed: started.elapsed(),
                    worker: 0,
                });
            }

            if config.max_attempts.is_some_and(|max| n >= max) {
                return finish_not_found(n, NotFoundReason::BudgetExhausted, observer);
            }
            if expired() {
                return finish_not_found(n, NotFoundReason::DeadlineElapsed, observer);
            }
        }
    }
}

pub(crate) fn finish_not_found(
    attempts: u64,
    reason: NotFoundReason,
    observer: &dyn ProgressObserver,
) -> SearchOutcome {
    tracing::debug!(attempts, %reason, "Search stopped without a match");
    observer.on_not_found(attempts, reason);
    SearchOutcome::NotFound { attempts, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoopObserver, SeededKeySource};
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};

    #[test]
    fn empty_prefix_matches_first_attempt() {
        let search = PrefixSearch::new(SearchConfig::prefix("")).unwrap();
        let outcome = search.run(&mut SeededKeySource::new(0), &NoopObserver);
        assert_eq!(outcome.attempts(), 1);
        assert!(outcome.is_found());
    }

    #[test]
    fn found_address_has_prefix() {
        let search = PrefixSearch::new(SearchConfig::prefix("a")).unwrap();
        let result = search
            .run(&mut SeededKeySource::new(3), &NoopObserver)
            .found()
            .unwrap();

        assert!(result.address.starts_with('a'));
        assert_eq!(result.address, result.keypair.address());
        assert_eq!(result.worker, 0);
    }

    #[test]
    fn budget_exhausted() {
        let config = SearchConfig::prefix("zzzz").with_max_attempts(Some(10));
        let outcome = PrefixSearch::new(config)
            .unwrap()
            .run(&mut SeededKeySource::new(5), &NoopObserver);

        assert_eq!(
            outcome,
            SearchOutcome::NotFound {
                attempts: 10,
                reason: NotFoundReason::BudgetExhausted
            }
        );
    }

    #[test]
    fn zero_timeout_stops_before_generating() {
        let calls = Cell::new(0u64);
        let mut source = || {
            calls.set(calls.get() + 1);
            Keypair::generate()
        };

        let config = SearchConfig::prefix("zzzzzz").with_timeout(Some(Duration::ZERO));
        let outcome = PrefixSearch::new(config).unwrap().run(&mut source, &NoopObserver);

        assert_eq!(
            outcome,
            SearchOutcome::NotFound {
                attempts: 0,
                reason: NotFoundReason::DeadlineElapsed
            }
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn timeout_stops_unbounded_search() {
        let config = SearchConfig::prefix("z".repeat(44)).with_timeout(Some(Duration::from_millis(50)));
        let outcome = PrefixSearch::new(config)
            .unwrap()
            .run(&mut SeededKeySource::new(1), &NoopObserver);

        assert!(matches!(
            outcome,
            SearchOutcome::NotFound {
                reason: NotFoundReason::DeadlineElapsed,
                ..
            }
        ));
        assert!(outcome.attempts() > 0);
    }

    #[test]
    fn progress_at_each_multiple() {
        let seen = RefCell::new(Vec::new());
        let observer = |update: &ProgressUpdate| seen.borrow_mut().push(update.attempts);

        let config = SearchConfig::prefix("zzzz")
            .with_max_attempts(Some(35))
            .with_progress_interval(10);
        PrefixSearch::new(config)
            .unwrap()
            .run(&mut SeededKeySource::new(2), &observer);

        assert_eq!(*seen.borrow(), vec![10, 20, 30]);
    }

    #[test]
    fn notifies_found_and_not_found() {
        #[derive(Default)]
        struct Recorder {
            found: Cell<Option<u64>>,
            not_found: Cell<Option<(u64, NotFoundReason)>>,
        }

        impl ProgressObserver for Recorder {
            fn on_progress(&self, _update: &ProgressUpdate) {}

            fn on_found(&self, result: &SearchResult) {
                self.found.set(Some(result.attempts));
            }

            fn on_not_found(&self, attempts: u64, reason: NotFoundReason) {
                self.not_found.set(Some((attempts, reason)));
            }
        }

        let recorder = Recorder::default();
        PrefixSearch::new(SearchConfig::prefix(""))
            .unwrap()
            .run(&mut SeededKeySource::new(0), &recorder);
        assert_eq!(recorder.found.get(), Some(1));

        PrefixSearch::new(SearchConfig::prefix("zzzz").with_max_attempts(Some(3)))
            .unwrap()
            .run(&mut SeededKeySource::new(0), &recorder);
        assert_eq!(
            recorder.not_found.get(),
            Some((3, NotFoundReason::BudgetExhausted))
        );
    }
}
