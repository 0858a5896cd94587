//! Key material and parameter value objects
//!
//! Key material is created by the surrounding key-management code and
//! borrowed read-only by the engine for the duration of one operation. Secret
//! bytes are zeroed on drop and never shown by `Debug`.

use core::fmt;
use core::str::FromStr;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Whether an algorithm is driven by a shared secret key or a key pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Symmetric,
    Asymmetric,
}

/// Cipher chaining mode
///
/// ECB is carried for compatibility with existing ciphertext only; it leaks
/// block-level structure and is never the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Cbc,
    Ecb,
    /// Authenticated encryption; the primitive supplies its own integrity tag
    Aead,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Cbc => write!(f, "CBC"),
            Mode::Ecb => write!(f, "ECB"),
            Mode::Aead => write!(f, "AEAD"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cbc" => Ok(Mode::Cbc),
            "ecb" => Ok(Mode::Ecb),
            "aead" => Ok(Mode::Aead),
            _ => Err(Error::Other {
                context: "mode parsing",
                message: format!("unrecognized mode {s:?}"),
            }),
        }
    }
}

/// Padding scheme applied around the primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// PKCS#5/PKCS#7 block padding (always adds 1..=block bytes)
    Pkcs7,
    /// No padding; block ciphers zero-fill the final block and strip trailing
    /// zeros on decode, which loses plaintext that ends in zero bytes
    None,
    /// RSA PKCS#1 v1.5 encryption padding
    Pkcs1,
    /// RSA OAEP with SHA-1
    OaepSha1,
    /// RSA OAEP with SHA-256
    OaepSha256,
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Padding::Pkcs7 => write!(f, "PKCS5Padding"),
            Padding::None => write!(f, "NoPadding"),
            Padding::Pkcs1 => write!(f, "PKCS1Padding"),
            Padding::OaepSha1 => write!(f, "OAEP-SHA1"),
            Padding::OaepSha256 => write!(f, "OAEP-SHA256"),
        }
    }
}

impl FromStr for Padding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "pkcs5" | "pkcs7" | "pkcs5padding" | "pkcs7padding" => Ok(Padding::Pkcs7),
            "none" | "nopadding" => Ok(Padding::None),
            "pkcs1" | "pkcs1padding" => Ok(Padding::Pkcs1),
            "oaep" | "oaepsha1" => Ok(Padding::OaepSha1),
            "oaepsha256" => Ok(Padding::OaepSha256),
            _ => Err(Error::Other {
                context: "padding parsing",
                message: format!("unrecognized padding {s:?}"),
            }),
        }
    }
}

/// Configuration for one encrypt/decrypt operation
///
/// Validated once per operation against the matching algorithm descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherParameters {
    pub algorithm: String,
    pub mode: Mode,
    pub padding: Padding,
    pub key_size_bits: u32,
}

impl CipherParameters {
    pub fn new(
        algorithm: impl Into<String>,
        mode: Mode,
        padding: Padding,
        key_size_bits: u32,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            mode,
            padding,
            key_size_bits,
        }
    }
}

/// Raw symmetric key bytes tagged with their algorithm
///
/// Zeroed on drop; equality is constant-time; `Debug` redacts the bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: Vec<u8>,
    algorithm: String,
}

impl SecretKey {
    pub fn new(algorithm: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            algorithm: algorithm.into(),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({}, [REDACTED; {}])", self.algorithm, self.len())
    }
}

/// Public key material: a standard DER encoding treated as an opaque handle
#[derive(Debug, Clone)]
pub struct PublicKeyMaterial {
    der: Vec<u8>,
    algorithm: String,
}

impl PublicKeyMaterial {
    pub fn new(algorithm: impl Into<String>, der: Vec<u8>) -> Self {
        Self {
            der,
            algorithm: algorithm.into(),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }
}

/// Private key material: a standard DER encoding, zeroed on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyMaterial {
    der: Vec<u8>,
    algorithm: String,
}

impl PrivateKeyMaterial {
    pub fn new(algorithm: impl Into<String>, der: Vec<u8>) -> Self {
        Self {
            der,
            algorithm: algorithm.into(),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }
}

impl fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKeyMaterial({}, [REDACTED])", self.algorithm)
    }
}

/// Key material supplied by the key-management collaborator
#[derive(Debug, Clone)]
pub enum KeyMaterial {
    Secret(SecretKey),
    Public(PublicKeyMaterial),
    Private(PrivateKeyMaterial),
}

impl KeyMaterial {
    /// Short label for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            KeyMaterial::Secret(_) => "secret",
            KeyMaterial::Public(_) => "public",
            KeyMaterial::Private(_) => "private",
        }
    }

    pub fn as_secret(&self) -> Result<&SecretKey> {
        match self {
            KeyMaterial::Secret(key) => Ok(key),
            other => Err(Error::KeyTypeMismatch {
                expected: "secret",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_public(&self) -> Result<&PublicKeyMaterial> {
        match self {
            KeyMaterial::Public(key) => Ok(key),
            other => Err(Error::KeyTypeMismatch {
                expected: "public",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_private(&self) -> Result<&PrivateKeyMaterial> {
        match self {
            KeyMaterial::Private(key) => Ok(key),
            other => Err(Error::KeyTypeMismatch {
                expected: "private",
                actual: other.kind(),
            }),
        }
    }
}
