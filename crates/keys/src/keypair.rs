//! RSA key pair generation and base64 transport of standard encodings

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::{PrivateKeyMaterial, PublicKeyMaterial};
use envcrypt_params::{validate_key_size, RSA};

/// Generates an RSA key pair of an admissible size
pub fn generate_rsa_keypair(bits: u32) -> Result<(PublicKeyMaterial, PrivateKeyMaterial)> {
    validate_key_size(RSA.name, bits)?;
    let private = RsaPrivateKey::new(&mut OsRng, bits as usize).map_err(|e| Error::Other {
        context: "rsa key generation",
        message: e.to_string(),
    })?;
    let public = RsaPublicKey::from(&private);

    let public_der = public
        .to_public_key_der()
        .map_err(|e| Error::Other {
            context: "public key encoding",
            message: e.to_string(),
        })?
        .as_bytes()
        .to_vec();
    let private_der = private
        .to_pkcs8_der()
        .map_err(|e| Error::Other {
            context: "private key encoding",
            message: e.to_string(),
        })?
        .as_bytes()
        .to_vec();

    Ok((
        PublicKeyMaterial::new(RSA.name, public_der),
        PrivateKeyMaterial::new(RSA.name, private_der),
    ))
}

/// Encodes public key material as base64 of its SPKI DER
pub fn export_public_key(key: &PublicKeyMaterial) -> String {
    base64::encode(key.der())
}

/// Encodes private key material as base64 of its PKCS#8 DER
pub fn export_private_key(key: &PrivateKeyMaterial) -> String {
    base64::encode(key.der())
}

/// Decodes and validates a base64 SPKI public key
pub fn import_public_key(encoded: &str) -> Result<PublicKeyMaterial> {
    let der = base64::decode(encoded.trim())
        .map_err(|e| Error::InvalidKey(format!("undecodable base64 public key: {e}")))?;
    RsaPublicKey::from_public_key_der(&der)
        .map_err(|e| Error::InvalidKey(format!("undecodable public key: {e}")))?;
    Ok(PublicKeyMaterial::new(RSA.name, der))
}

/// Decodes and validates a base64 PKCS#8 private key
pub fn import_private_key(encoded: &str) -> Result<PrivateKeyMaterial> {
    let der = base64::decode(encoded.trim())
        .map_err(|e| Error::InvalidKey(format!("undecodable base64 private key: {e}")))?;
    RsaPrivateKey::from_pkcs8_der(&der)
        .map_err(|e| Error::InvalidKey(format!("undecodable private key: {e}")))?;
    Ok(PrivateKeyMaterial::new(RSA.name, der))
}
