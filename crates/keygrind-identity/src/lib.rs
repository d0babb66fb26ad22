//! # Keygrind Identity
//!
//! Ed25519 keypairs whose public keys are rendered as base58 addresses,
//! plus reading and writing Solana-compatible keypair files.
//!
//! ## Example
//!
//! ```rust
//! use keygrind_identity::Keypair;
//!
//! let keypair = Keypair::generate();
//! let address = keypair.address();
//! assert!(address.len() <= 44);
//!
//! let signature = keypair.sign(b"hello");
//! assert!(keypair.verify(b"hello", &signature).is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod keyfile;
mod keypair;
mod public_key;
mod signature;

pub use error::{IdentityError, Result};
pub use keyfile::{read_keypair_file, write_keypair_file};
pub use keypair::Keypair;
pub use public_key::PublicKey;
pub use signature::Signature;

/// The base58 alphabet used for addresses and exported secrets.
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_has_58_unique_symbols() {
        let mut chars: Vec<char> = BASE58_ALPHABET.chars().collect();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), 58);
    }

    #[test]
    fn addresses_only_use_alphabet() {
        for _ in 0..32 {
            let address = Keypair::generate().address();
            assert!(address.chars().all(|c| BASE58_ALPHABET.contains(c)));
        }
    }
}
