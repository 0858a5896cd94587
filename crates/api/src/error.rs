//! Error handling for envelope encryption operations
//!
//! One taxonomy covers the whole workspace. Validation errors are produced
//! before any cryptographic work starts; decode errors (`Format`,
//! `Authentication`) are terminal for the operation and never retried.

use thiserror::Error;

/// Result type for all engine operations
pub type Result<T> = core::result::Result<T, Error>;

/// Primary error type for the envelope encryption engine
#[derive(Debug, Error)]
pub enum Error {
    /// The algorithm name is not in the descriptor tables
    #[error("unknown algorithm: {name}")]
    UnknownAlgorithm { name: String },

    /// The requested key size is not a member of the algorithm's closed set
    #[error("{algorithm} does not support {requested}-bit keys (supported: {supported:?})")]
    InvalidKeySize {
        algorithm: &'static str,
        requested: u32,
        supported: &'static [u32],
    },

    /// The mode/padding combination is not admissible for the algorithm
    #[error("{algorithm} does not support {detail}")]
    InvalidModeOrPadding {
        algorithm: &'static str,
        detail: String,
    },

    /// Wrong kind of key material for the operation
    #[error("key type mismatch: expected a {expected} key, got a {actual} key")]
    KeyTypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Key material is malformed: undecodable encoding or wrong raw length
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// Malformed envelope: bad magic, truncated fields, length-prefix
    /// overflow, or ciphertext that cannot be a valid encoding
    #[error("malformed envelope: {0}")]
    Format(&'static str),

    /// AEAD authentication tag verification failed
    #[error("authentication tag verification failed")]
    Authentication,

    /// Read or write failure during a streaming operation
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by the underlying cryptography provider outside the
    /// decode path
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}
