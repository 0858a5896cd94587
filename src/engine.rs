//! Caller-facing operation contract
//!
//! One entry point per operation; the engine routes to the symmetric or
//! hybrid codec by the algorithm's category tag and checks that the supplied
//! key material matches. Each call is synchronous, uses a fresh primitive
//! transform, and shares no mutable state with any other call.

use std::io::{Read, Write};
use std::path::Path;

use envcrypt_api::types::{Category, CipherParameters, KeyMaterial};
use envcrypt_api::Result;
use envcrypt_params::describe;

/// Encrypts an in-memory payload
///
/// Symmetric algorithms need [`KeyMaterial::Secret`] and produce an IV- or
/// nonce-prefixed envelope; asymmetric algorithms need [`KeyMaterial::Public`]
/// and produce either a direct block or a hybrid envelope, by payload size.
pub fn encrypt(plaintext: &[u8], key: &KeyMaterial, params: &CipherParameters) -> Result<Vec<u8>> {
    match describe(&params.algorithm)?.category {
        Category::Symmetric => envcrypt_symmetric::encode(plaintext, key.as_secret()?, params),
        Category::Asymmetric => envcrypt_hybrid::encrypt(plaintext, key.as_public()?, params),
    }
}

/// Decrypts an in-memory ciphertext produced by [`encrypt`]
pub fn decrypt(ciphertext: &[u8], key: &KeyMaterial, params: &CipherParameters) -> Result<Vec<u8>> {
    match describe(&params.algorithm)?.category {
        Category::Symmetric => envcrypt_symmetric::decode(ciphertext, key.as_secret()?, params),
        Category::Asymmetric => envcrypt_hybrid::decrypt(ciphertext, key.as_private()?, params),
    }
}

/// Encrypts a stream in fixed-size chunks, reporting fractional progress
///
/// `total` is the plaintext length in bytes; the final progress callback
/// reports exactly 1.0.
pub fn encrypt_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    total: u64,
    key: &KeyMaterial,
    params: &CipherParameters,
    progress: impl FnMut(f64),
) -> Result<()> {
    match describe(&params.algorithm)?.category {
        Category::Symmetric => envcrypt_symmetric::encrypt_stream(
            reader,
            writer,
            total,
            key.as_secret()?,
            params,
            progress,
        ),
        Category::Asymmetric => envcrypt_hybrid::encrypt_stream(
            reader,
            writer,
            total,
            key.as_public()?,
            params,
            progress,
        ),
    }
}

/// Decrypts a stream produced by [`encrypt_stream`]
///
/// `total` is the ciphertext length in bytes.
pub fn decrypt_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    total: u64,
    key: &KeyMaterial,
    params: &CipherParameters,
    progress: impl FnMut(f64),
) -> Result<()> {
    match describe(&params.algorithm)?.category {
        Category::Symmetric => envcrypt_symmetric::decrypt_stream(
            reader,
            writer,
            total,
            key.as_secret()?,
            params,
            progress,
        ),
        Category::Asymmetric => envcrypt_hybrid::decrypt_stream(
            reader,
            writer,
            total,
            key.as_private()?,
            params,
            progress,
        ),
    }
}

/// Encrypts a file, staging the output so a failed run leaves nothing under
/// the destination name
pub fn encrypt_file(
    source: &Path,
    dest: &Path,
    key: &KeyMaterial,
    params: &CipherParameters,
    progress: impl FnMut(f64),
) -> Result<()> {
    match describe(&params.algorithm)?.category {
        Category::Symmetric => {
            envcrypt_symmetric::encrypt_file(source, dest, key.as_secret()?, params, progress)
        }
        Category::Asymmetric => {
            envcrypt_hybrid::encrypt_file(source, dest, key.as_public()?, params, progress)
        }
    }
}

/// Decrypts a file produced by [`encrypt_file`]
pub fn decrypt_file(
    source: &Path,
    dest: &Path,
    key: &KeyMaterial,
    params: &CipherParameters,
    progress: impl FnMut(f64),
) -> Result<()> {
    match describe(&params.algorithm)?.category {
        Category::Symmetric => {
            envcrypt_symmetric::decrypt_file(source, dest, key.as_secret()?, params, progress)
        }
        Category::Asymmetric => {
            envcrypt_hybrid::decrypt_file(source, dest, key.as_private()?, params, progress)
        }
    }
}
