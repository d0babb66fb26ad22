//! Base58 alphabet checks.

use crate::error::ConfigError;
use keygrind_identity::BASE58_ALPHABET;

/// Number of symbols in the base58 alphabet.
pub const ALPHABET_SIZE: u32 = 58;

/// Returns true if `c` can appear in a base58 address.
#[must_use]
pub fn is_base58(c: char) -> bool {
    c.is_ascii() && BASE58_ALPHABET.contains(c)
}

/// Checks every character of `value`, reporting the first that is not base58.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidCharacter`] naming `field`, the character and
/// its position.
pub fn validate(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match value.chars().enumerate().find(|(_, c)| !is_base58(*c)) {
        Some((position, character)) => Err(ConfigError::invalid_character(field, character, position)),
        None => Ok(()),
    }
}
