//! Address predicates.

use crate::alphabet;
use crate::error::ConfigError;
use keygrind_identity::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A predicate over a rendered base58 address.
///
/// Matching is case-sensitive and compares only the leading (or trailing)
/// characters, never a substring anywhere in the address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// The address begins with the given string.
    StartsWith(String),
    /// The address ends with the given string.
    EndsWith(String),
    /// The address begins with `prefix` and ends with `suffix`.
    StartsAndEndsWith {
        /// Required leading characters.
        prefix: String,
        /// Required trailing characters.
        suffix: String,
    },
}

impl Pattern {
    /// Matches addresses starting with `prefix`.
    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Self::StartsWith(prefix.into())
    }

    /// Matches addresses ending with `suffix`.
    pub fn ends_with(suffix: impl Into<String>) -> Self {
        Self::EndsWith(suffix.into())
    }

    /// Builds a pattern from optional parts. Missing parts are unconstrained.
    #[must_use]
    pub fn from_parts(prefix: Option<&str>, suffix: Option<&str>) -> Self {
        match (prefix, suffix) {
            (Some(prefix), Some(suffix)) => Self::StartsAndEndsWith {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            },
            (None, Some(suffix)) => Self::EndsWith(suffix.to_string()),
            (Some(prefix), None) => Self::StartsWith(prefix.to_string()),
            (None, None) => Self::StartsWith(String::new()),
        }
    }

    /// Tests a rendered address.
    #[must_use]
    pub fn matches(&self, address: &str) -> bool {
        match self {
            Self::StartsWith(prefix) => address.starts_with(prefix.as_str()),
            Self::EndsWith(suffix) => address.ends_with(suffix.as_str()),
            Self::StartsAndEndsWith { prefix, suffix } => {
                address.len() >= prefix.len() + suffix.len()
                    && address.starts_with(prefix.as_str())
                    && address.ends_with(suffix.as_str())
            }
        }
    }

    /// Number of address characters the pattern pins down.
    #[must_use]
    pub fn constrained_len(&self) -> usize {
        match self {
            Self::StartsWith(s) | Self::EndsWith(s) => s.chars().count(),
            Self::StartsAndEndsWith { prefix, suffix } => {
                prefix.chars().count() + suffix.chars().count()
            }
        }
    }

    /// Returns true if every address matches.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.constrained_len() == 0
    }

    /// Rejects patterns no address could ever satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCharacter`] for characters outside the
    /// base58 alphabet and [`ConfigError::PatternTooLong`] for patterns longer
    /// than the longest address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::StartsWith(prefix) => alphabet::validate("prefix", prefix)?,
            Self::EndsWith(suffix) => alphabet::validate("suffix", suffix)?,
            Self::StartsAndEndsWith { prefix, suffix } => {
                alphabet::validate("prefix", prefix)?;
                alphabet::validate("suffix", suffix)?;
            }
        }

        let len = self.constrained_len();
        if len > PublicKey::MAX_BASE58_LEN {
            return Err(ConfigError::PatternTooLong {
                len,
                max: PublicKey::MAX_BASE58_LEN,
            });
        }
        Ok(())
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::StartsWith(String::new())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartsWith(prefix) => write!(f, "{prefix}*"),
            Self::EndsWith(suffix) => write!(f, "*{suffix}"),
            Self::StartsAndEndsWith { prefix, suffix } => write!(f, "{prefix}*{suffix}"),
        }
    }
}
