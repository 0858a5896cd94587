//! Adapter over the external cryptography primitives
//!
//! The engine never talks to a primitive crate directly; it asks this crate
//! for a capability instead: an incremental block-mode transform, a one-shot
//! AEAD seal/open, or a single-block asymmetric operation. Every call
//! constructs a fresh, independently initialized primitive object; nothing
//! is cached, shared, or reused across operations.

#![forbid(unsafe_code)]

pub mod aead;
pub mod asymmetric;
pub mod block;
mod transform;

pub use aead::{aead_open, aead_seal};
pub use asymmetric::{rsa_decrypt, rsa_encrypt};
pub use block::{block_transform, Direction};
pub use transform::SymmetricTransform;
