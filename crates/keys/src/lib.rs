//! Key material loading and saving
//!
//! The engine itself only borrows typed key material; creating, deriving,
//! and (de)serializing that material is this crate's job. Secret keys
//! travel as base64 of the raw bytes; public and private keys as base64 of
//! their standard DER encodings (SPKI and PKCS#8).

#![forbid(unsafe_code)]

pub mod keypair;
pub mod secret;

pub use keypair::{
    export_private_key, export_public_key, generate_rsa_keypair, import_private_key,
    import_public_key,
};
pub use secret::{
    derive_secret_key, export_secret_key, generate_salt, generate_secret_key, import_secret_key,
};
