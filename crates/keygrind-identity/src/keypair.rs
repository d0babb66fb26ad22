//! Ed25519 keypair with Solana-style secret export.

use crate::{IdentityError, PublicKey, Result, Signature};
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// An Ed25519 keypair for signing and verification.
///
/// The exported form is the 64-byte layout used by Solana tooling:
/// the 32-byte seed followed by the 32-byte public key.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Length of the seed in bytes.
    pub const SEED_LEN: usize = 32;

    /// Length of the exported keypair (seed followed by public key).
    pub const KEYPAIR_LEN: usize = 64;

    /// Generates a new random keypair from the operating system CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_rng(&mut OsRng)
    }

    /// Generates a keypair from the given random number generator.
    #[must_use]
    pub fn from_rng<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut seed = Zeroizing::new([0u8; Self::SEED_LEN]);
        rng.fill_bytes(&mut seed[..]);
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Creates a keypair from a 32-byte seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed is not exactly 32 bytes.
    pub fn from_seed(bytes: &[u8]) -> Result<Self> {
        let seed: &[u8; Self::SEED_LEN] = bytes.try_into().map_err(|_| {
            IdentityError::InvalidSecretKey(format!(
                "expected {} seed bytes, got {}",
                Self::SEED_LEN,
                bytes.len()
            ))
        })?;
        let seed = Zeroizing::new(*seed);

        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// Creates a keypair from its 64-byte exported form.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong or the public half does not
    /// belong to the seed.
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; Self::KEYPAIR_LEN] = bytes.try_into().map_err(|_| {
            IdentityError::InvalidSecretKey(format!(
                "expected {} keypair bytes, got {}",
                Self::KEYPAIR_LEN,
                bytes.len()
            ))
        })?;

        let signing_key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| IdentityError::InvalidSecretKey(e.to_string()))?;
        Ok(Self { signing_key })
    }

    /// Parses a keypair from its base58 exported form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not base58 or does not decode to a
    /// valid keypair.
    pub fn from_base58_string(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            bs58::decode(s)
                .into_vec()
                .map_err(|e| IdentityError::InvalidSecretKey(e.to_string()))?,
        );
        Self::from_keypair_bytes(&bytes)
    }

    /// Returns the public key for this keypair.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Returns the base58 address of this keypair.
    #[must_use]
    pub fn address(&self) -> String {
        self.public_key().to_base58()
    }

    /// Signs a message with this keypair.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig = self.signing_key.sign(message);
        Signature::from_bytes(sig.to_bytes())
    }

    /// Verifies a signature against a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is invalid.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        self.public_key().verify(message, signature)
    }

    /// Returns the 32-byte seed.
    ///
    /// # Security
    ///
    /// Handle with care. The returned bytes are zeroized on drop.
    #[must_use]
    pub fn seed_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// Returns the 64-byte exported form (seed followed by public key).
    #[must_use]
    pub fn to_keypair_bytes(&self) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }

    /// Returns the exported form rendered in base58.
    #[must_use]
    pub fn to_base58_string(&self) -> Zeroizing<String> {
        Zeroizing::new(bs58::encode(&self.to_keypair_bytes()[..]).into_string())
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        *self.to_keypair_bytes() == *other.to_keypair_bytes()
    }
}

impl Eq for Keypair {}
