//! Public-key encryption for payloads of any size
//!
//! An asymmetric primitive can only encrypt a single block, so this crate
//! decides per operation between two shapes of ciphertext:
//!
//! - **direct**: the payload fits one block and is encrypted as-is, with no
//!   framing at all;
//! - **hybrid**: the payload is encrypted under a fresh one-time session key
//!   with a fast symmetric cipher, and only that session key is protected by
//!   the asymmetric primitive, inside a self-describing `HYBRID` envelope.
//!
//! Decryption attempts the direct interpretation first and falls back to
//! parsing the envelope; see [`engine`] for the compatibility notes on that
//! choice.

#![forbid(unsafe_code)]

pub mod engine;
pub mod envelope;
pub mod streaming;

pub use engine::{decrypt, encrypt, hybrid_threshold};
pub use envelope::HybridEnvelope;
pub use streaming::{decrypt_file, decrypt_stream, encrypt_file, encrypt_stream};
