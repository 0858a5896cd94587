//! Symmetric envelope codec
//!
//! Byte layouts, reproduced exactly for interoperability:
//!
//! - CBC: `iv ‖ ciphertext`, where the IV length equals the cipher block
//!   size (16 bytes, or 8 for the 64-bit-block family)
//! - AEAD: `nonce(12) ‖ ciphertext‖tag`
//! - ECB: `ciphertext` with no prefix (compatibility only; ECB has no
//!   semantic integrity and is never a default)
//!
//! A fresh IV/nonce is drawn from the OS random source for every encode.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::{Category, CipherParameters, Mode, Padding, SecretKey};
use envcrypt_params::{describe, AlgorithmDescriptor};
use envcrypt_provider::{aead_open, aead_seal, block_transform, Direction};

/// Runs every admission check for a symmetric operation
///
/// Unknown algorithm, category, mode/padding admission, key-size membership,
/// raw key length, and the key's algorithm tag, all before any primitive is
/// constructed.
pub(crate) fn checked_descriptor(
    key: &SecretKey,
    params: &CipherParameters,
) -> Result<&'static AlgorithmDescriptor> {
    let desc = describe(&params.algorithm)?;
    if desc.category != Category::Symmetric {
        return Err(Error::KeyTypeMismatch {
            expected: "public or private",
            actual: "secret",
        });
    }
    desc.validate_params(params)?;
    let tagged = describe(key.algorithm())?;
    if !std::ptr::eq(tagged, desc) {
        return Err(Error::InvalidKey(format!(
            "key is tagged for {} but the parameters name {}",
            tagged.name, desc.name
        )));
    }
    let expected = desc.key_len_bytes(params.key_size_bits);
    if key.len() != expected {
        return Err(Error::InvalidKey(format!(
            "{} expects {expected} raw key bytes for a {}-bit key, got {}",
            desc.name,
            params.key_size_bits,
            key.len()
        )));
    }
    Ok(desc)
}

pub(crate) fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Best-effort inverse of zero padding
///
/// Cannot distinguish padding from plaintext that legitimately ends in zero
/// bytes; those are lost. Kept for compatibility with existing ciphertext.
pub(crate) fn trim_trailing_zeros(buf: &mut Vec<u8>) {
    let end = buf.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    buf.truncate(end);
}

/// Encrypts `plaintext` into a self-contained symmetric envelope
pub fn encode(plaintext: &[u8], key: &SecretKey, params: &CipherParameters) -> Result<Vec<u8>> {
    let desc = checked_descriptor(key, params)?;
    debug!(
        algorithm = desc.name,
        mode = %params.mode,
        plaintext_len = plaintext.len(),
        "sealing symmetric envelope"
    );
    match params.mode {
        Mode::Aead => {
            let nonce = random_bytes(desc.iv_or_nonce_len);
            let sealed = aead_seal(key.as_bytes(), &nonce, plaintext)?;
            let mut out = nonce;
            out.extend_from_slice(&sealed);
            Ok(out)
        }
        Mode::Cbc => {
            let iv = random_bytes(desc.iv_or_nonce_len);
            let mut transform = block_transform(
                desc,
                params.mode,
                params.padding,
                key.as_bytes(),
                Some(&iv),
                Direction::Encrypt,
            )?;
            let mut out = iv;
            out.extend(transform.update(plaintext)?);
            out.extend(transform.finalize()?);
            Ok(out)
        }
        Mode::Ecb => {
            let mut transform = block_transform(
                desc,
                params.mode,
                params.padding,
                key.as_bytes(),
                None,
                Direction::Encrypt,
            )?;
            let mut out = transform.update(plaintext)?;
            out.extend(transform.finalize()?);
            Ok(out)
        }
    }
}

/// Decrypts a symmetric envelope produced by [`encode`]
pub fn decode(envelope: &[u8], key: &SecretKey, params: &CipherParameters) -> Result<Vec<u8>> {
    let desc = checked_descriptor(key, params)?;
    debug!(
        algorithm = desc.name,
        mode = %params.mode,
        envelope_len = envelope.len(),
        "opening symmetric envelope"
    );
    match params.mode {
        Mode::Aead => {
            if envelope.len() < desc.iv_or_nonce_len {
                return Err(Error::Format("envelope is shorter than the nonce"));
            }
            let (nonce, ciphertext) = envelope.split_at(desc.iv_or_nonce_len);
            aead_open(key.as_bytes(), nonce, ciphertext)
        }
        Mode::Cbc => {
            if envelope.len() < desc.iv_or_nonce_len {
                return Err(Error::Format("envelope is shorter than the IV"));
            }
            let (iv, ciphertext) = envelope.split_at(desc.iv_or_nonce_len);
            let mut transform = block_transform(
                desc,
                params.mode,
                params.padding,
                key.as_bytes(),
                Some(iv),
                Direction::Decrypt,
            )?;
            let mut out = transform.update(ciphertext)?;
            out.extend(transform.finalize()?);
            if params.padding == Padding::None {
                trim_trailing_zeros(&mut out);
            }
            Ok(out)
        }
        Mode::Ecb => {
            let mut transform = block_transform(
                desc,
                params.mode,
                params.padding,
                key.as_bytes(),
                None,
                Direction::Decrypt,
            )?;
            let mut out = transform.update(envelope)?;
            out.extend(transform.finalize()?);
            if params.padding == Padding::None {
                trim_trailing_zeros(&mut out);
            }
            Ok(out)
        }
    }
}
