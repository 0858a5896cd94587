//! # envcrypt
//!
//! An envelope encryption engine: one encrypt/decrypt contract over a menu
//! of symmetric, AEAD, and asymmetric cipher primitives, exact byte layouts
//! for IV-prefixed, nonce-prefixed, and hybrid ciphertext, and chunked
//! streaming encryption of large files with progress reporting.
//!
//! ## Crate structure
//!
//! This is a facade crate that re-exports functionality from several
//! sub-crates:
//!
//! - [`envcrypt-api`]: error taxonomy, key material, and parameter types
//! - [`envcrypt-params`]: static algorithm descriptor tables
//! - [`envcrypt-provider`]: adapter over the external cipher primitives
//! - [`envcrypt-symmetric`]: symmetric envelope codec and file streaming
//! - [`envcrypt-hybrid`]: hybrid envelope codec and asymmetric engine
//! - [`envcrypt-keys`]: key generation and base64 import/export
//!
//! ## Usage
//!
//! ```
//! use envcrypt::prelude::*;
//!
//! fn roundtrip() -> envcrypt::Result<()> {
//!     let key = KeyMaterial::Secret(envcrypt::keys::generate_secret_key("AES", 256)?);
//!     let params = CipherParameters::new("AES", Mode::Cbc, Padding::Pkcs7, 256);
//!
//!     let sealed = envcrypt::encrypt(b"attack at dawn", &key, &params)?;
//!     let opened = envcrypt::decrypt(&sealed, &key, &params)?;
//!     assert_eq!(opened, b"attack at dawn");
//!     Ok(())
//! }
//! # roundtrip().unwrap();
//! ```

#![forbid(unsafe_code)]

pub use envcrypt_api as api;
pub use envcrypt_hybrid as hybrid;
pub use envcrypt_keys as keys;
pub use envcrypt_params as params;
pub use envcrypt_provider as provider;
pub use envcrypt_symmetric as symmetric;

mod engine;

pub use api::{Error, Result};
pub use engine::{
    decrypt, decrypt_file, decrypt_stream, encrypt, encrypt_file, encrypt_stream,
};

/// Common imports for envcrypt users
pub mod prelude {
    pub use crate::api::{
        Category, CipherParameters, Error, KeyMaterial, Mode, Padding, PrivateKeyMaterial,
        PublicKeyMaterial, Result, SecretKey,
    };
    pub use crate::engine::{
        decrypt, decrypt_file, decrypt_stream, encrypt, encrypt_file, encrypt_stream,
    };
    pub use crate::params::{describe, validate_key_size, AlgorithmDescriptor, ALGORITHMS};
}
