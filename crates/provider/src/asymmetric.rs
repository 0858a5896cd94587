//! Asymmetric capability: single-block RSA over DER-encoded key handles
//!
//! Key handles arrive as standard DER (SPKI for public, PKCS#8 for private)
//! and are parsed fresh for each operation. Raw (unpadded) RSA is not
//! offered; the descriptor tables never admit it.

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::Sha256;

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::Padding;

/// Encrypts one block under the recipient's public key
pub fn rsa_encrypt(public_der: &[u8], padding: Padding, plaintext: &[u8]) -> Result<Vec<u8>> {
    let key = RsaPublicKey::from_public_key_der(public_der)
        .map_err(|e| Error::InvalidKey(format!("undecodable public key: {e}")))?;
    let mut rng = OsRng;
    let out = match padding {
        Padding::Pkcs1 => key.encrypt(&mut rng, Pkcs1v15Encrypt, plaintext),
        Padding::OaepSha1 => key.encrypt(&mut rng, Oaep::new::<Sha1>(), plaintext),
        Padding::OaepSha256 => key.encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext),
        other => return Err(unsupported(other)),
    };
    out.map_err(|e| Error::Other {
        context: "rsa encrypt",
        message: e.to_string(),
    })
}

/// Decrypts one block with the private key
pub fn rsa_decrypt(private_der: &[u8], padding: Padding, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let key = RsaPrivateKey::from_pkcs8_der(private_der)
        .map_err(|e| Error::InvalidKey(format!("undecodable private key: {e}")))?;
    let out = match padding {
        Padding::Pkcs1 => key.decrypt(Pkcs1v15Encrypt, ciphertext),
        Padding::OaepSha1 => key.decrypt(Oaep::new::<Sha1>(), ciphertext),
        Padding::OaepSha256 => key.decrypt(Oaep::new::<Sha256>(), ciphertext),
        other => return Err(unsupported(other)),
    };
    out.map_err(|e| Error::Other {
        context: "rsa decrypt",
        message: e.to_string(),
    })
}

fn unsupported(padding: Padding) -> Error {
    Error::InvalidModeOrPadding {
        algorithm: "RSA",
        detail: format!("{padding} padding"),
    }
}
