//! Multi-threaded search.
//!
//! Workers share exactly two things: a "found" flag and the attempt
//! counter. Each worker claims an attempt number from the counter before
//! generating a key, so a finite budget is never overshot, and checks the
//! flag (and the deadline) once per iteration. The first worker to flip the
//! flag wins; the others stop at their next check.
//!
//! The reported attempt count is the sum across workers: every key generated
//! by any worker before the search stopped, including attempts that were in
//! flight when the winner flipped the flag.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::progress::{ProgressObserver, ProgressUpdate};
use crate::search::{finish_not_found, NotFoundReason, PrefixSearch, SearchOutcome, SearchResult};
use crate::source::KeySource;
use keygrind_identity::Keypair;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Instant;

/// Brute-force search spread over `config.workers` threads.
#[derive(Debug, Clone)]
pub struct ParallelSearch {
    config: SearchConfig,
}

struct Winner {
    keypair: Keypair,
    address: String,
    worker: usize,
}

impl ParallelSearch {
    /// Validates `config` and prepares a search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`](crate::SearchError::InvalidConfig)
    /// before any thread is started.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search, building one source per worker with `make_source`.
    ///
    /// With a single worker, or a pattern every address satisfies, this is
    /// [`PrefixSearch::run`] on the calling thread, so a trivial pattern
    /// always reports exactly one attempt.
    pub fn run<F, S>(&self, make_source: F, observer: &(dyn ProgressObserver + Sync)) -> SearchOutcome
    where
        F: Fn(usize) -> S + Sync,
        S: KeySource,
    {
        let config = &self.config;
        if config.workers == 1 || config.pattern.is_trivial() {
            let search = PrefixSearch {
                config: config.clone(),
            };
            return search.run(&mut make_source(0), observer);
        }

        let started = Instant::now();
        let deadline = config.timeout.and_then(|t| started.checked_add(t));
        let found = AtomicBool::new(false);
        let counter = AtomicU64::new(0);
        let winner: Mutex<Option<Winner>> = Mutex::new(None);

        tracing::debug!(
            pattern = %config.pattern,
            workers = config.workers,
            max_attempts = ?config.max_attempts,
            "Starting parallel search"
        );

        thread::scope(|scope| {
            for worker in 0..config.workers {
                let (found, counter, winner, make_source) = (&found, &counter, &winner, &make_source);

                scope.spawn(move || {
                    let mut source = make_source(worker);
                    let mut generated = 0u64;

                    while !found.load(Ordering::Acquire) {
                        if deadline.is_some_and(|d| Instant::now() >= d) {
                            break;
                        }

                        let n = counter.fetch_add(1, Ordering::Relaxed) + 1;
                        if config.max_attempts.is_some_and(|max| n > max) {
                            break;
                        }

                        let keypair = source.next_keypair();
                        let address = keypair.address();
                        generated += 1;

                        if config.pattern.matches(&address) {
                            if found
                                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                                .is_ok()
                            {
                                *winner.lock() = Some(Winner {
                                    keypair,
                                    address,
                                    worker,
                                });
                            }
                            break;
                        }

                        if n % config.progress_interval == 0 {
                            observer.on_progress(&ProgressUpdate {
                                attempts: n,
                                elapsed: started.elapsed(),
                                worker,
                            });
                        }
                    }

                    tracing::trace!(worker, generated, "Worker stopped");
                });
            }
        });

        // Claims past the budget are never generated.
        let claimed = counter.load(Ordering::Acquire);
        let attempts = config.max_attempts.map_or(claimed, |max| claimed.min(max));

        match winner.into_inner() {
            Some(winner) => {
                let result = SearchResult {
                    keypair: winner.keypair,
                    address: winner.address,
                    attempts,
                    elapsed: started.elapsed(),
                    worker: winner.worker,
                };
                observer.on_found(&result);
                SearchOutcome::Found(result)
            }
            None if config.max_attempts.is_some_and(|max| attempts >= max) => {
                finish_not_found(attempts, NotFoundReason::BudgetExhausted, observer)
            }
            None => finish_not_found(attempts, NotFoundReason::DeadlineElapsed, observer),
        }
    }
}
