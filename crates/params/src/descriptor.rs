//! Static facts about each supported algorithm

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::{Category, CipherParameters, Mode, Padding};

/// Static description of one named algorithm
///
/// Constructed once per algorithm at compile time. `iv_or_nonce_len` is the
/// single source of truth for prefix lengths: 16 for 128-bit-block ciphers,
/// 8 for the 64-bit-block family, 12 for the AEAD nonce, 0 where no prefix
/// exists.
#[derive(Debug)]
pub struct AlgorithmDescriptor {
    pub name: &'static str,
    /// Alternate spellings accepted on lookup
    pub aliases: &'static [&'static str],
    pub category: Category,
    /// Admissible key sizes in bits; closed set, never coerced
    pub key_sizes: &'static [u32],
    pub modes: &'static [Mode],
    pub paddings: &'static [Padding],
    /// Cipher block size in bytes (1 for stream ciphers, 0 for asymmetric)
    pub block_size: usize,
    pub iv_or_nonce_len: usize,
}

pub const AES: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "AES",
    aliases: &[],
    category: Category::Symmetric,
    key_sizes: &[128, 192, 256],
    modes: &[Mode::Cbc, Mode::Ecb],
    paddings: &[Padding::Pkcs7, Padding::None],
    block_size: 16,
    iv_or_nonce_len: 16,
};

pub const DES: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "DES",
    aliases: &[],
    category: Category::Symmetric,
    key_sizes: &[56],
    modes: &[Mode::Cbc, Mode::Ecb],
    paddings: &[Padding::Pkcs7, Padding::None],
    block_size: 8,
    iv_or_nonce_len: 8,
};

pub const TRIPLE_DES: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "TripleDES",
    aliases: &["3DES", "DESede"],
    category: Category::Symmetric,
    key_sizes: &[112, 168],
    modes: &[Mode::Cbc, Mode::Ecb],
    paddings: &[Padding::Pkcs7, Padding::None],
    block_size: 8,
    iv_or_nonce_len: 8,
};

pub const BLOWFISH: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "Blowfish",
    aliases: &[],
    category: Category::Symmetric,
    key_sizes: &[
        32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448,
    ],
    modes: &[Mode::Cbc, Mode::Ecb],
    paddings: &[Padding::Pkcs7, Padding::None],
    block_size: 8,
    iv_or_nonce_len: 8,
};

pub const CHACHA20_POLY1305: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "ChaCha20-Poly1305",
    aliases: &[],
    category: Category::Symmetric,
    key_sizes: &[256],
    modes: &[Mode::Aead],
    paddings: &[Padding::None],
    block_size: 1,
    iv_or_nonce_len: 12,
};

pub const RSA: AlgorithmDescriptor = AlgorithmDescriptor {
    name: "RSA",
    aliases: &[],
    category: Category::Asymmetric,
    key_sizes: &[1024, 2048, 4096],
    modes: &[Mode::Ecb],
    paddings: &[Padding::Pkcs1, Padding::OaepSha1, Padding::OaepSha256],
    block_size: 0,
    iv_or_nonce_len: 0,
};

/// Every algorithm the engine knows about
pub const ALGORITHMS: &[&AlgorithmDescriptor] = &[
    &AES,
    &DES,
    &TRIPLE_DES,
    &BLOWFISH,
    &CHACHA20_POLY1305,
    &RSA,
];

fn names_match(a: &str, b: &str) -> bool {
    // Case-insensitive, ignoring separators, so "chacha20poly1305" and
    // "ChaCha20-Poly1305" resolve to the same entry.
    let mut a = a.chars().filter(|c| *c != '-' && *c != '_');
    let mut b = b.chars().filter(|c| *c != '-' && *c != '_');
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x.eq_ignore_ascii_case(&y) => continue,
            _ => return false,
        }
    }
}

/// Looks up the descriptor for a named algorithm or one of its aliases
pub fn describe(name: &str) -> Result<&'static AlgorithmDescriptor> {
    ALGORITHMS
        .iter()
        .copied()
        .find(|desc| {
            names_match(desc.name, name)
                || desc.aliases.iter().any(|alias| names_match(alias, name))
        })
        .ok_or_else(|| Error::UnknownAlgorithm {
            name: name.to_string(),
        })
}

/// Checks that `bits` is an exact member of the algorithm's key-size set
pub fn validate_key_size(name: &str, bits: u32) -> Result<u32> {
    let desc = describe(name)?;
    if desc.key_sizes.contains(&bits) {
        Ok(bits)
    } else {
        Err(Error::InvalidKeySize {
            algorithm: desc.name,
            requested: bits,
            supported: desc.key_sizes,
        })
    }
}

impl AlgorithmDescriptor {
    pub fn is_aead(&self) -> bool {
        self.modes.contains(&Mode::Aead)
    }

    /// Raw key length in bytes for a nominal key size in bits
    ///
    /// DES-family sizes are quoted without parity bits: each 56-bit unit is
    /// carried in 8 key bytes.
    pub fn key_len_bytes(&self, bits: u32) -> usize {
        match self.name {
            "DES" | "TripleDES" => (bits as usize / 56) * 8,
            _ => bits as usize / 8,
        }
    }

    /// Validates a parameter set against this descriptor
    ///
    /// Mode/padding admission and key-size membership; runs before any
    /// cryptographic work.
    pub fn validate_params(&self, params: &CipherParameters) -> Result<()> {
        if !self.modes.contains(&params.mode) {
            return Err(Error::InvalidModeOrPadding {
                algorithm: self.name,
                detail: format!("{} mode", params.mode),
            });
        }
        if !self.paddings.contains(&params.padding) {
            return Err(Error::InvalidModeOrPadding {
                algorithm: self.name,
                detail: format!("{} with {} mode", params.padding, params.mode),
            });
        }
        validate_key_size(self.name, params.key_size_bits)?;
        Ok(())
    }
}
