//! Error types for identity operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The signature verification failed.
    #[error("signature verification failed")]
    InvalidSignature,

    /// The public key is malformed.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The secret key is malformed.
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// A keypair file could not be parsed.
    #[error("invalid keypair file {path}: {message}")]
    KeyFile {
        /// Path of the offending file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// Refused to replace an existing keypair file.
    #[error("refusing to overwrite existing file {0}")]
    AlreadyExists(PathBuf),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;
