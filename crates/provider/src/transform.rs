//! Incremental block-mode transform objects
//!
//! A transform is created fresh for one operation, fed input with `update`,
//! and closed with `finalize`, which applies or removes padding. Chaining
//! state lives inside the wrapped mode object, so a chunk boundary can never
//! corrupt the chain: `update` only ever releases whole cipher blocks and
//! buffers the remainder.

use cipher::block_padding::{Pkcs7, RawPadding};
use cipher::{Block, BlockDecryptMut, BlockEncryptMut};

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::Padding;

/// One-operation encrypt/decrypt object with update/finalize semantics
pub trait SymmetricTransform {
    /// Absorbs input and returns the bytes that are ready so far
    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>>;

    /// Closes the transform, applying or removing padding
    fn finalize(self: Box<Self>) -> Result<Vec<u8>>;
}

/// Padding policy admissible on a block cipher
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockPadding {
    /// PKCS#5/PKCS#7: always pads, adding a whole block for aligned input
    Pkcs7,
    /// Zero-fill of the final partial block; aligned input gains nothing.
    /// The matching strip on decode happens above this layer.
    Zero,
}

impl BlockPadding {
    pub(crate) fn from_padding(algorithm: &'static str, padding: Padding) -> Result<Self> {
        match padding {
            Padding::Pkcs7 => Ok(Self::Pkcs7),
            Padding::None => Ok(Self::Zero),
            other => Err(Error::InvalidModeOrPadding {
                algorithm,
                detail: format!("{other} on a block cipher"),
            }),
        }
    }
}

pub(crate) struct BlockEncryptor<M: BlockEncryptMut> {
    mode: M,
    pending: Vec<u8>,
    padding: BlockPadding,
}

impl<M: BlockEncryptMut> BlockEncryptor<M> {
    pub(crate) fn new(mode: M, padding: BlockPadding) -> Self {
        Self {
            mode,
            pending: Vec::new(),
            padding,
        }
    }
}

impl<M: BlockEncryptMut> SymmetricTransform for BlockEncryptor<M> {
    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let bs = M::block_size();
        self.pending.extend_from_slice(input);
        let full = self.pending.len() / bs * bs;
        let mut out: Vec<u8> = self.pending.drain(..full).collect();
        for chunk in out.chunks_exact_mut(bs) {
            self.mode.encrypt_block_mut(Block::<M>::from_mut_slice(chunk));
        }
        Ok(out)
    }

    fn finalize(mut self: Box<Self>) -> Result<Vec<u8>> {
        let bs = M::block_size();
        let pos = self.pending.len();
        debug_assert!(pos < bs);
        if self.padding == BlockPadding::Zero && pos == 0 {
            return Ok(Vec::new());
        }
        let mut block = std::mem::take(&mut self.pending);
        block.resize(bs, 0);
        if self.padding == BlockPadding::Pkcs7 {
            Pkcs7::raw_pad(&mut block, pos);
        }
        self.mode.encrypt_block_mut(Block::<M>::from_mut_slice(&mut block));
        Ok(block)
    }
}

pub(crate) struct BlockDecryptor<M: BlockDecryptMut> {
    mode: M,
    pending: Vec<u8>,
    padding: BlockPadding,
}

impl<M: BlockDecryptMut> BlockDecryptor<M> {
    pub(crate) fn new(mode: M, padding: BlockPadding) -> Self {
        Self {
            mode,
            pending: Vec::new(),
            padding,
        }
    }
}

impl<M: BlockDecryptMut> SymmetricTransform for BlockDecryptor<M> {
    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let bs = M::block_size();
        self.pending.extend_from_slice(input);
        // PKCS#7 holds the last full block back until finalize so the
        // padding can be removed there.
        let keep = match self.padding {
            BlockPadding::Pkcs7 => bs,
            BlockPadding::Zero => 0,
        };
        if self.pending.len() <= keep {
            return Ok(Vec::new());
        }
        let full = (self.pending.len() - keep) / bs * bs;
        let mut out: Vec<u8> = self.pending.drain(..full).collect();
        for chunk in out.chunks_exact_mut(bs) {
            self.mode.decrypt_block_mut(Block::<M>::from_mut_slice(chunk));
        }
        Ok(out)
    }

    fn finalize(mut self: Box<Self>) -> Result<Vec<u8>> {
        let bs = M::block_size();
        match self.padding {
            BlockPadding::Pkcs7 => {
                if self.pending.len() != bs {
                    return Err(Error::Format(
                        "ciphertext length is not a multiple of the cipher block size",
                    ));
                }
                let mut block = std::mem::take(&mut self.pending);
                self.mode
                    .decrypt_block_mut(Block::<M>::from_mut_slice(&mut block));
                let unpadded = Pkcs7::raw_unpad(&block)
                    .map_err(|_| Error::Format("invalid block padding"))?;
                Ok(unpadded.to_vec())
            }
            BlockPadding::Zero => {
                if !self.pending.is_empty() {
                    return Err(Error::Format(
                        "ciphertext length is not a multiple of the cipher block size",
                    ));
                }
                Ok(Vec::new())
            }
        }
    }
}
