//! # Keygrind Search
//!
//! Finds ed25519 keypairs whose base58 address satisfies a [`Pattern`] by
//! rejection sampling: generate, render, test, repeat.
//!
//! ## Features
//!
//! - Configuration is validated before any key is generated
//! - Finite budgets end in [`SearchOutcome::NotFound`], a normal result
//! - Progress is reported through a [`ProgressObserver`] every N attempts
//! - Pluggable [`KeySource`]s, including a seeded one for reproducible runs
//! - Multi-threaded search with cooperative cancellation ([`ParallelSearch`])
//!
//! ## Example
//!
//! ```rust
//! use keygrind_search::{search, SearchConfig, SearchOutcome, TracingObserver};
//!
//! let config = SearchConfig::prefix("A").with_max_attempts(Some(100_000));
//! match search(config, &TracingObserver)? {
//!     SearchOutcome::Found(result) => assert!(result.address.starts_with('A')),
//!     SearchOutcome::NotFound { attempts, .. } => println!("gave up after {attempts}"),
//! }
//! # Ok::<(), keygrind_search::SearchError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod alphabet;
pub mod attempts;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod parallel;
pub mod pattern;
pub mod progress;
pub mod search;
pub mod source;

pub use attempts::{Attempt, Attempts};
pub use config::{SearchConfig, DEFAULT_PROGRESS_INTERVAL};
pub use error::{ConfigError, Result, SearchError};
pub use parallel::ParallelSearch;
pub use pattern::Pattern;
pub use progress::{NoopObserver, ProgressObserver, ProgressUpdate, TracingObserver};
pub use search::{NotFoundReason, PrefixSearch, SearchOutcome, SearchResult};
pub use source::{KeySource, OsKeySource, SeededKeySource};

/// Searches with keys from the operating system CSPRNG, using
/// `config.workers` threads.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfig`] before any key is generated.
pub fn search(
    config: SearchConfig,
    observer: &(dyn ProgressObserver + Sync),
) -> Result<SearchOutcome> {
    Ok(ParallelSearch::new(config)?.run(|_| OsKeySource, observer))
}

/// Validates `config`, then searches on the calling thread with `source`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfig`] without touching `source`.
pub fn search_with<S>(
    config: SearchConfig,
    source: &mut S,
    observer: &dyn ProgressObserver,
) -> Result<SearchOutcome>
where
    S: KeySource + ?Sized,
{
    Ok(PrefixSearch::new(config)?.run(source, observer))
}
