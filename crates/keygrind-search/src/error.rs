//! Error types for search operations.

use thiserror::Error;

/// Errors that can occur before a search starts.
///
/// Running out of attempts is not an error; see
/// [`SearchOutcome::NotFound`](crate::SearchOutcome::NotFound).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The search configuration was rejected before any key was generated.
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons a [`SearchConfig`](crate::SearchConfig) is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A pattern contains a character no address can contain.
    #[error("{field} contains '{character}' at position {position}, which is not in the base58 alphabet{hint}")]
    InvalidCharacter {
        /// Which part of the pattern.
        field: &'static str,
        /// The offending character.
        character: char,
        /// Zero-based character position within the field.
        position: usize,
        /// Extra guidance for commonly confused characters.
        hint: &'static str,
    },

    /// The pattern is longer than any address.
    #[error("pattern is {len} characters long, but addresses have at most {max}")]
    PatternTooLong {
        /// Combined pattern length.
        len: usize,
        /// Longest possible address.
        max: usize,
    },

    /// A numeric setting that must be positive was zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

impl ConfigError {
    /// Builds an [`ConfigError::InvalidCharacter`] with a look-alike hint.
    #[must_use]
    pub fn invalid_character(field: &'static str, character: char, position: usize) -> Self {
        let hint = match character {
            '0' | 'O' | 'I' | 'l' => " (base58 omits 0, O, I and l to avoid look-alikes)",
            _ => "",
        };
        Self::InvalidCharacter {
            field,
            character,
            position,
            hint,
        }
    }
}

/// A specialized Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
