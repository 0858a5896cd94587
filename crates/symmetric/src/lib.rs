//! Symmetric encryption for the envcrypt engine
//!
//! Two layers: the envelope codec, which frames IV- or nonce-prefixed
//! ciphertext for in-memory data, and the streaming file cipher, which drives
//! the same framing over fixed-size chunks with progress reporting.

#![forbid(unsafe_code)]

pub mod envelope;
pub mod streaming;

pub use envelope::{decode, encode};
pub use streaming::{decrypt_file, decrypt_stream, encrypt_file, encrypt_stream};
