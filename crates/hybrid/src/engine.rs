//! Direct vs. hybrid asymmetric encryption
//!
//! The shape of the ciphertext is decided at encrypt time from the payload
//! size alone: at most [`hybrid_threshold`] bytes go straight through the
//! asymmetric primitive, anything larger gets a one-time session key and a
//! [`HybridEnvelope`](crate::HybridEnvelope).
//!
//! Decryption carries no discriminator byte, for compatibility with existing
//! ciphertext: it first treats the input as one raw asymmetric block and
//! only on failure reinterprets it as a hybrid envelope. Ciphertexts
//! produced here are unambiguous in practice, since direct mode is only
//! chosen for payloads that fit a single block, but a foreign direct block
//! that happens to begin with the ASCII bytes `HYBRID` cannot be told apart
//! by the streaming decryptor, which has no way to rewind a failed attempt
//! and dispatches on the magic instead.

use std::ptr;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::{
    Category, CipherParameters, Mode, Padding, PrivateKeyMaterial, PublicKeyMaterial, SecretKey,
};
use envcrypt_params::{describe, AlgorithmDescriptor, AES, SESSION_KEY_BITS};
use envcrypt_provider::{rsa_decrypt, rsa_encrypt};

use crate::envelope::HybridEnvelope;

/// Largest payload the asymmetric primitive can encrypt in one block
///
/// The OAEP rows use the compatible table value of 42 overhead bytes for
/// both digest widths; for OAEP-SHA256 the primitive's true capacity is 66
/// bytes less than the modulus, so direct-mode encryption of payloads in
/// that gap is rejected by the primitive itself.
pub fn hybrid_threshold(key_size_bits: u32, padding: Padding) -> Result<usize> {
    let modulus = key_size_bits as usize / 8;
    match padding {
        Padding::Pkcs1 => Ok(modulus - 11),
        Padding::OaepSha1 | Padding::OaepSha256 => Ok(modulus - 42),
        Padding::None => Ok(modulus),
        other => Err(Error::InvalidModeOrPadding {
            algorithm: "RSA",
            detail: format!("{other} padding"),
        }),
    }
}

pub(crate) fn checked_descriptor(
    key_algorithm: &str,
    params: &CipherParameters,
) -> Result<&'static AlgorithmDescriptor> {
    let desc = describe(&params.algorithm)?;
    if desc.category != Category::Asymmetric {
        return Err(Error::KeyTypeMismatch {
            expected: "secret",
            actual: "public or private",
        });
    }
    desc.validate_params(params)?;
    let tagged = describe(key_algorithm)?;
    if !ptr::eq(tagged, desc) {
        return Err(Error::InvalidKey(format!(
            "key is tagged for {} but the parameters name {}",
            tagged.name, desc.name
        )));
    }
    Ok(desc)
}

/// Parameters of the fixed symmetric transform that carries the bulk data
pub(crate) fn session_params() -> CipherParameters {
    CipherParameters::new(AES.name, Mode::Cbc, Padding::Pkcs7, SESSION_KEY_BITS)
}

/// Fresh one-time session key; zeroed on drop by `SecretKey`
pub(crate) fn fresh_session_key() -> SecretKey {
    let mut bytes = vec![0u8; (SESSION_KEY_BITS / 8) as usize];
    OsRng.fill_bytes(&mut bytes);
    SecretKey::new(AES.name, bytes)
}

/// Fresh random IV for the bulk transform
pub(crate) fn random_iv() -> Vec<u8> {
    let mut iv = vec![0u8; AES.iv_or_nonce_len];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// Encrypts a payload of any size under a public key
pub fn encrypt(
    plaintext: &[u8],
    key: &PublicKeyMaterial,
    params: &CipherParameters,
) -> Result<Vec<u8>> {
    checked_descriptor(key.algorithm(), params)?;
    let threshold = hybrid_threshold(params.key_size_bits, params.padding)?;
    if plaintext.len() <= threshold {
        debug!(len = plaintext.len(), threshold, "direct asymmetric encrypt");
        return rsa_encrypt(key.der(), params.padding, plaintext);
    }
    debug!(len = plaintext.len(), threshold, "hybrid envelope encrypt");
    let session = fresh_session_key();
    let bulk = envcrypt_symmetric::encode(plaintext, &session, &session_params())?;
    let (iv, bulk_ciphertext) = bulk.split_at(AES.iv_or_nonce_len);
    let wrapped_key = rsa_encrypt(key.der(), params.padding, session.as_bytes())?;
    Ok(HybridEnvelope {
        iv: iv.to_vec(),
        wrapped_key,
        bulk: bulk_ciphertext.to_vec(),
    }
    .serialize())
}

/// Decrypts either shape of asymmetric ciphertext
pub fn decrypt(
    ciphertext: &[u8],
    key: &PrivateKeyMaterial,
    params: &CipherParameters,
) -> Result<Vec<u8>> {
    checked_descriptor(key.algorithm(), params)?;
    match rsa_decrypt(key.der(), params.padding, ciphertext) {
        Ok(plaintext) => Ok(plaintext),
        // an undecodable key fails both interpretations; surface it as-is
        Err(err @ Error::InvalidKey(_)) => Err(err),
        Err(_) => decrypt_hybrid(ciphertext, key, params),
    }
}

fn decrypt_hybrid(
    ciphertext: &[u8],
    key: &PrivateKeyMaterial,
    params: &CipherParameters,
) -> Result<Vec<u8>> {
    let envelope = HybridEnvelope::parse(ciphertext)?;
    debug!(
        iv_len = envelope.iv.len(),
        wrapped_len = envelope.wrapped_key.len(),
        bulk_len = envelope.bulk.len(),
        "hybrid envelope decrypt"
    );
    let session_bytes = rsa_decrypt(key.der(), params.padding, &envelope.wrapped_key)
        .map_err(|err| match err {
            err @ Error::InvalidKey(_) => err,
            _ => Error::Format("session key cannot be unwrapped"),
        })?;
    let session = SecretKey::new(AES.name, session_bytes);
    let mut bulk_envelope = envelope.iv;
    bulk_envelope.extend_from_slice(&envelope.bulk);
    envcrypt_symmetric::decode(&bulk_envelope, &session, &session_params())
}
