//! Algorithm descriptor tables for the envcrypt engine
//!
//! Every supported algorithm is described once, statically, in this crate:
//! admissible key sizes, modes, paddings, block size, and IV/nonce length.
//! The tables are process-wide, read-only, and safe for unsynchronized
//! concurrent reads. All admission checks (algorithm lookup, key-size and
//! mode/padding validation) live here so no other crate special-cases
//! individual algorithms.

#![forbid(unsafe_code)]

pub mod descriptor;

pub use descriptor::{
    describe, validate_key_size, AlgorithmDescriptor, ALGORITHMS, AES, BLOWFISH,
    CHACHA20_POLY1305, DES, RSA, TRIPLE_DES,
};

/// Reference chunk size for streaming file operations
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Magic prefix of the hybrid envelope layout
pub const HYBRID_MAGIC: &[u8; 6] = b"HYBRID";

/// Session key size used for the bulk half of hybrid encryption
pub const SESSION_KEY_BITS: u32 = 256;
