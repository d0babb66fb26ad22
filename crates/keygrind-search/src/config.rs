//! Search configuration.

use crate::error::{ConfigError, Result};
use crate::Pattern;
use std::time::Duration;

/// Attempts between progress notifications unless configured otherwise.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

/// What to search for and when to give up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Predicate the winning address must satisfy.
    pub pattern: Pattern,
    /// Stop after this many attempts. `None` searches until a match.
    pub max_attempts: Option<u64>,
    /// Emit a progress notification every this many attempts.
    pub progress_interval: u64,
    /// Number of worker threads.
    pub workers: usize,
    /// Stop once this much wall-clock time has passed.
    pub timeout: Option<Duration>,
}

impl SearchConfig {
    /// Creates an unbounded single-worker search for `pattern`.
    #[must_use]
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            max_attempts: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            workers: 1,
            timeout: None,
        }
    }

    /// Creates a search for addresses starting with `prefix`.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::new(Pattern::starts_with(prefix))
    }

    /// Sets the attempt budget.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the progress interval.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Sets the worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the wall-clock timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks the configuration without generating anything.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`](crate::SearchError::InvalidConfig)
    /// if the pattern can never match or a bound is zero.
    pub fn validate(&self) -> Result<()> {
        self.pattern.validate()?;

        if self.max_attempts == Some(0) {
            return Err(ConfigError::Zero("max_attempts").into());
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::Zero("progress_interval").into());
        }
        if self.workers == 0 {
            return Err(ConfigError::Zero("workers").into());
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(Pattern::default())
    }
}
