//! Expected cost of a search.
//!
//! Each constrained character is one of 58 symbols, so a pattern pinning
//! `L` characters needs about `58^L` attempts. Trailing characters follow
//! this closely. Leading characters are skewed because 32-byte keys do not
//! fill the 44-digit range evenly: a first character of `2`-`H` is far more
//! likely than `a`-`z`.

use crate::alphabet::ALPHABET_SIZE;
use crate::Pattern;
use std::time::Duration;

/// Expected number of attempts to match `pattern`.
#[must_use]
pub fn expected_attempts(pattern: &Pattern) -> f64 {
    let len = i32::try_from(pattern.constrained_len()).unwrap_or(i32::MAX);
    f64::from(ALPHABET_SIZE).powi(len)
}

/// Probability that a search for `pattern` succeeds within `attempts`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn probability_within(pattern: &Pattern, attempts: u64) -> f64 {
    if attempts == 0 {
        return 0.0;
    }
    if pattern.is_trivial() {
        return 1.0;
    }
    let p = expected_attempts(pattern).recip();
    // 1 - (1 - p)^n without losing precision for tiny p.
    -((attempts as f64) * (-p).ln_1p()).exp_m1()
}

/// Attempts needed to succeed with probability `probability`.
///
/// Returns `None` unless `0 <= probability < 1`.
#[must_use]
pub fn attempts_for_probability(pattern: &Pattern, probability: f64) -> Option<f64> {
    if !(0.0..1.0).contains(&probability) {
        return None;
    }
    if pattern.is_trivial() {
        return Some(1.0);
    }
    let p = expected_attempts(pattern).recip();
    Some(((-probability).ln_1p() / (-p).ln_1p()).ceil())
}

/// Expected wall-clock time at `keys_per_second`.
///
/// Returns `None` for a non-positive rate or an estimate too large for a
/// [`Duration`].
#[must_use]
pub fn estimate_duration(pattern: &Pattern, keys_per_second: f64) -> Option<Duration> {
    if keys_per_second <= 0.0 || !keys_per_second.is_finite() {
        return None;
    }
    Duration::try_from_secs_f64(expected_attempts(pattern) / keys_per_second).ok()
}
