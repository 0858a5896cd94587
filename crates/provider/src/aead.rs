//! AEAD capability: ChaCha20-Poly1305
//!
//! One-shot only: the wire format carries a single Poly1305 tag over the
//! whole message, so there is no incremental variant.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};

use envcrypt_api::error::{Error, Result};

/// Encrypts and authenticates `plaintext`, returning ciphertext ‖ tag
pub fn aead_seal(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = new_cipher(key)?;
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| Error::Other {
            context: "aead seal",
            message: "encryption failure".to_string(),
        })
}

/// Verifies the tag and decrypts
///
/// Any tampering with ciphertext or tag surfaces as `Error::Authentication`;
/// the operation is terminal and never retried.
pub fn aead_open(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher = new_cipher(key)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| Error::Authentication)
}

fn new_cipher(key: &[u8]) -> Result<ChaCha20Poly1305> {
    ChaCha20Poly1305::new_from_slice(key).map_err(|_| {
        Error::InvalidKey(format!(
            "ChaCha20-Poly1305 needs a 32-byte key, got {} bytes",
            key.len()
        ))
    })
}
