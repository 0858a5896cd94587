//! Per-algorithm block cipher dispatch
//!
//! Maps a descriptor plus raw key bytes to a concrete cipher type and wraps
//! it in the requested mode. Raw key length has already been validated
//! against the descriptor by the caller, so a length mismatch here is
//! reported as invalid key material rather than a size-admission failure.

use aes::{Aes128, Aes192, Aes256};
use blowfish::Blowfish;
use cipher::crypto_common::{InnerInit, InnerIvInit};
use cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit};
use des::{Des, TdesEde2, TdesEde3};

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::{Mode, Padding};
use envcrypt_params::AlgorithmDescriptor;

use crate::transform::{BlockDecryptor, BlockEncryptor, BlockPadding, SymmetricTransform};

/// Which way a transform runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Builds a fresh transform for one block-cipher operation
///
/// CBC requires an IV of the descriptor's block length; ECB takes none.
pub fn block_transform(
    desc: &AlgorithmDescriptor,
    mode: Mode,
    padding: Padding,
    key: &[u8],
    iv: Option<&[u8]>,
    direction: Direction,
) -> Result<Box<dyn SymmetricTransform>> {
    let padding = BlockPadding::from_padding(desc.name, padding)?;
    match desc.name {
        "AES" => match key.len() {
            16 => build::<Aes128>(desc.name, mode, padding, key, iv, direction),
            24 => build::<Aes192>(desc.name, mode, padding, key, iv, direction),
            32 => build::<Aes256>(desc.name, mode, padding, key, iv, direction),
            n => Err(invalid_key_len(desc.name, n)),
        },
        "DES" => build::<Des>(desc.name, mode, padding, key, iv, direction),
        "TripleDES" => match key.len() {
            16 => build::<TdesEde2>(desc.name, mode, padding, key, iv, direction),
            24 => build::<TdesEde3>(desc.name, mode, padding, key, iv, direction),
            n => Err(invalid_key_len(desc.name, n)),
        },
        "Blowfish" => build::<Blowfish>(desc.name, mode, padding, key, iv, direction),
        other => Err(Error::UnknownAlgorithm {
            name: other.to_string(),
        }),
    }
}

fn invalid_key_len(algorithm: &str, len: usize) -> Error {
    Error::InvalidKey(format!("{algorithm} cannot use a {len}-byte raw key"))
}

fn build<C>(
    name: &'static str,
    mode: Mode,
    padding: BlockPadding,
    key: &[u8],
    iv: Option<&[u8]>,
    direction: Direction,
) -> Result<Box<dyn SymmetricTransform>>
where
    C: BlockCipher + BlockEncryptMut + BlockDecryptMut + KeyInit + 'static,
{
    let cipher = C::new_from_slice(key).map_err(|_| invalid_key_len(name, key.len()))?;
    match (mode, direction) {
        (Mode::Cbc, Direction::Encrypt) => {
            let enc = cbc::Encryptor::inner_iv_slice_init(cipher, require_iv(iv)?)
                .map_err(|_| Error::Format("IV length does not match the cipher block size"))?;
            Ok(Box::new(BlockEncryptor::new(enc, padding)))
        }
        (Mode::Cbc, Direction::Decrypt) => {
            let dec = cbc::Decryptor::inner_iv_slice_init(cipher, require_iv(iv)?)
                .map_err(|_| Error::Format("IV length does not match the cipher block size"))?;
            Ok(Box::new(BlockDecryptor::new(dec, padding)))
        }
        (Mode::Ecb, Direction::Encrypt) => Ok(Box::new(BlockEncryptor::new(
            ecb::Encryptor::inner_init(cipher),
            padding,
        ))),
        (Mode::Ecb, Direction::Decrypt) => Ok(Box::new(BlockDecryptor::new(
            ecb::Decryptor::inner_init(cipher),
            padding,
        ))),
        (Mode::Aead, _) => Err(Error::InvalidModeOrPadding {
            algorithm: name,
            detail: "AEAD mode".to_string(),
        }),
    }
}

fn require_iv(iv: Option<&[u8]>) -> Result<&[u8]> {
    iv.ok_or(Error::Format("CBC envelope is missing its IV"))
}
