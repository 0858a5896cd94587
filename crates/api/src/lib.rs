//! Public API types for the envcrypt engine
//!
//! This crate provides the shared surface used by every other crate in the
//! workspace: the error taxonomy, key material wrappers, and the parameter
//! value objects an operation is configured with.

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Category, CipherParameters, KeyMaterial, Mode, Padding, PrivateKeyMaterial, PublicKeyMaterial,
    SecretKey,
};
