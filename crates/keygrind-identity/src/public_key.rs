//! Ed25519 public key rendered as a base58 address.

use crate::{IdentityError, Result, Signature};
use ed25519_dalek::{Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An Ed25519 public key, displayed as a base58 address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    key: VerifyingKey,
}

impl PublicKey {
    /// The length of a public key in bytes.
    pub const LEN: usize = 32;

    /// The longest base58 rendering of a public key.
    pub const MAX_BASE58_LEN: usize = 44;

    /// Creates a public key from a verifying key.
    pub(crate) fn from_verifying_key(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Creates a public key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not represent a valid public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: &[u8; Self::LEN] = bytes.try_into().map_err(|_| {
            IdentityError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                Self::LEN,
                bytes.len()
            ))
        })?;

        let key = VerifyingKey::from_bytes(arr)
            .map_err(|e| IdentityError::InvalidPublicKey(e.to_string()))?;

        Ok(Self { key })
    }

    /// Returns the raw bytes of this public key.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.key.as_bytes()
    }

    /// Renders the key as a base58 address.
    #[must_use]
    pub fn to_base58(&self) -> String {
        bs58::encode(self.as_bytes()).into_string()
    }

    /// Returns a short identifier (first 8 address characters).
    #[must_use]
    pub fn short_id(&self) -> String {
        self.to_base58().chars().take(8).collect()
    }

    /// Verifies a signature against a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is invalid.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        self.key
            .verify(message, &sig)
            .map_err(|_| IdentityError::InvalidSignature)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base58())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for PublicKey {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| IdentityError::InvalidPublicKey(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base58())
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            let bytes = <[u8; 32]>::deserialize(deserializer)?;
            PublicKey::from_bytes(&bytes).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Keypair;
    use pretty_assertions::assert_eq;

    #[test]
    fn public_key_short_id() {
        let pk = Keypair::generate().public_key();
        let short = pk.short_id();
        assert_eq!(short.len(), 8);
        assert!(pk.to_base58().starts_with(&short));
    }

    #[test]
    fn public_key_base58_length() {
        for _ in 0..64 {
            let address = Keypair::generate().address();
            assert!((32..=PublicKey::MAX_BASE58_LEN).contains(&address.len()));
        }
    }

    #[test]
    fn public_key_parse() {
        let pk1 = Keypair::generate().public_key();
        let pk2: PublicKey = pk1.to_string().parse().unwrap();
        assert_eq!(pk1, pk2);
    }

    #[test]
    fn public_key_parse_rejects_non_base58() {
        let err = "0OIl".parse::<PublicKey>().unwrap_err();
        assert!(matches!(err, IdentityError::InvalidPublicKey(_)));
    }

    #[test]
    fn public_key_parse_rejects_short_input() {
        assert!("abc".parse::<PublicKey>().is_err());
    }

    #[test]
    fn public_key_known_vector() {
        // All-zero bytes render as 32 leading-zero digits.
        let pk = PublicKey::from_bytes(&[0u8; 32]).unwrap();
        assert_eq!(pk.to_base58(), "11111111111111111111111111111111");
    }

    #[test]
    fn public_key_serde_json() {
        let pk = Keypair::generate().public_key();

        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json, format!("\"{pk}\""));

        let pk2: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(pk, pk2);
    }
}
