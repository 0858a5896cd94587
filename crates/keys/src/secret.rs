//! Secret key generation, password derivation, and base64 transport

use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::SecretKey;
use envcrypt_params::{describe, validate_key_size};

/// Generates a fresh random secret key for a symmetric algorithm
pub fn generate_secret_key(algorithm: &str, bits: u32) -> Result<SecretKey> {
    let desc = describe(algorithm)?;
    validate_key_size(desc.name, bits)?;
    let mut bytes = vec![0u8; desc.key_len_bytes(bits)];
    OsRng.fill_bytes(&mut bytes);
    Ok(SecretKey::new(desc.name, bytes))
}

/// Derives a secret key from a password with PBKDF2-HMAC-SHA256
pub fn derive_secret_key(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    algorithm: &str,
    bits: u32,
) -> Result<SecretKey> {
    let desc = describe(algorithm)?;
    validate_key_size(desc.name, bits)?;
    let mut bytes = vec![0u8; desc.key_len_bytes(bits)];
    pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut bytes);
    Ok(SecretKey::new(desc.name, bytes))
}

/// Generates a random salt for key derivation
pub fn generate_salt(len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Encodes a secret key as base64 of its raw bytes
pub fn export_secret_key(key: &SecretKey) -> String {
    base64::encode(key.as_bytes())
}

/// Decodes a base64 secret key, checking the length against the algorithm's
/// admissible sizes
pub fn import_secret_key(algorithm: &str, encoded: &str) -> Result<SecretKey> {
    let desc = describe(algorithm)?;
    let bytes = base64::decode(encoded.trim())
        .map_err(|e| Error::InvalidKey(format!("undecodable base64 key: {e}")))?;
    let admissible = desc
        .key_sizes
        .iter()
        .any(|&bits| desc.key_len_bytes(bits) == bytes.len());
    if !admissible {
        return Err(Error::InvalidKey(format!(
            "{} has no key size with {} raw bytes",
            desc.name,
            bytes.len()
        )));
    }
    Ok(SecretKey::new(desc.name, bytes))
}
