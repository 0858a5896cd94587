//! Streaming file cipher for symmetric algorithms
//!
//! Sources are read in fixed 8 KiB chunks and fed through one stateful
//! transform, so chaining state is carried across chunk boundaries. The
//! IV/nonce is written first on encrypt and read first on decrypt. Progress
//! is reported as a non-decreasing fraction of total bytes, ending at
//! exactly 1.0.
//!
//! AEAD algorithms carry a single tag over the whole message, so their file
//! operations chunk the I/O and progress reporting but stage the message
//! bytes through memory.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::{CipherParameters, Mode, Padding, SecretKey};
use envcrypt_params::CHUNK_SIZE;
use envcrypt_provider::{aead_open, aead_seal, block_transform, Direction};

use crate::envelope::{checked_descriptor, random_bytes};

/// Encrypts `reader` into `writer` as one symmetric envelope
///
/// `total` is the plaintext length in bytes, used only for progress
/// fractions.
pub fn encrypt_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    total: u64,
    key: &SecretKey,
    params: &CipherParameters,
    mut progress: impl FnMut(f64),
) -> Result<()> {
    let desc = checked_descriptor(key, params)?;
    debug!(algorithm = desc.name, total, "streaming encrypt");
    match params.mode {
        Mode::Aead => {
            let plaintext = drain_reader(&mut reader, total, &mut progress)?;
            let nonce = random_bytes(desc.iv_or_nonce_len);
            writer.write_all(&nonce)?;
            writer.write_all(&aead_seal(key.as_bytes(), &nonce, &plaintext)?)?;
        }
        Mode::Cbc | Mode::Ecb => {
            let iv = (params.mode == Mode::Cbc).then(|| random_bytes(desc.iv_or_nonce_len));
            if let Some(iv) = &iv {
                writer.write_all(iv)?;
            }
            let mut transform = block_transform(
                desc,
                params.mode,
                params.padding,
                key.as_bytes(),
                iv.as_deref(),
                Direction::Encrypt,
            )?;
            let mut buf = vec![0u8; CHUNK_SIZE];
            let mut processed = 0u64;
            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                writer.write_all(&transform.update(&buf[..n])?)?;
                processed += n as u64;
                trace!(processed, "chunk encrypted");
                report(&mut progress, processed, total);
            }
            writer.write_all(&transform.finalize()?)?;
        }
    }
    writer.flush()?;
    progress(1.0);
    Ok(())
}

/// Decrypts one symmetric envelope from `reader` into `writer`
///
/// `total` is the envelope length in bytes (IV/nonce included).
pub fn decrypt_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    total: u64,
    key: &SecretKey,
    params: &CipherParameters,
    mut progress: impl FnMut(f64),
) -> Result<()> {
    let desc = checked_descriptor(key, params)?;
    debug!(algorithm = desc.name, total, "streaming decrypt");
    match params.mode {
        Mode::Aead => {
            let nonce = read_prefix(&mut reader, desc.iv_or_nonce_len)?;
            let mut processed = nonce.len() as u64;
            report(&mut progress, processed, total);
            let mut ciphertext = Vec::new();
            let mut buf = vec![0u8; CHUNK_SIZE];
            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                ciphertext.extend_from_slice(&buf[..n]);
                processed += n as u64;
                report(&mut progress, processed, total);
            }
            writer.write_all(&aead_open(key.as_bytes(), &nonce, &ciphertext)?)?;
        }
        Mode::Cbc | Mode::Ecb => {
            let iv = if params.mode == Mode::Cbc {
                Some(read_prefix(&mut reader, desc.iv_or_nonce_len)?)
            } else {
                None
            };
            let mut processed = iv.as_ref().map_or(0, |iv| iv.len()) as u64;
            report(&mut progress, processed, total);
            let mut transform = block_transform(
                desc,
                params.mode,
                params.padding,
                key.as_bytes(),
                iv.as_deref(),
                Direction::Decrypt,
            )?;
            let mut sink = TrimmedSink::new(&mut writer, params.padding == Padding::None);
            let mut buf = vec![0u8; CHUNK_SIZE];
            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                sink.write_chunk(&transform.update(&buf[..n])?)?;
                processed += n as u64;
                trace!(processed, "chunk decrypted");
                report(&mut progress, processed, total);
            }
            sink.write_chunk(&transform.finalize()?)?;
            sink.finish();
        }
    }
    writer.flush()?;
    progress(1.0);
    Ok(())
}

/// Encrypts `source` into `dest`, staging through a `.part` sibling
///
/// The staging file is promoted to `dest` only on success; on failure it is
/// removed, so a failed run never leaves a truncated file under the
/// destination name.
pub fn encrypt_file(
    source: &Path,
    dest: &Path,
    key: &SecretKey,
    params: &CipherParameters,
    progress: impl FnMut(f64),
) -> Result<()> {
    with_staged_output(source, dest, |input, output, total| {
        encrypt_stream(
            BufReader::new(input),
            BufWriter::new(output),
            total,
            key,
            params,
            progress,
        )
    })
}

/// Decrypts `source` into `dest`, staging through a `.part` sibling
pub fn decrypt_file(
    source: &Path,
    dest: &Path,
    key: &SecretKey,
    params: &CipherParameters,
    progress: impl FnMut(f64),
) -> Result<()> {
    with_staged_output(source, dest, |input, output, total| {
        decrypt_stream(
            BufReader::new(input),
            BufWriter::new(output),
            total,
            key,
            params,
            progress,
        )
    })
}

/// Runs a file operation against a `.part` staging sibling of `dest`
///
/// The staging file is promoted on success and removed on failure. Also used
/// by the hybrid file cipher.
pub fn with_staged_output(
    source: &Path,
    dest: &Path,
    op: impl FnOnce(File, File, u64) -> Result<()>,
) -> Result<()> {
    let input = File::open(source)?;
    let total = input.metadata()?.len();
    let staging = staging_path(dest);
    let outcome = File::create(&staging)
        .map_err(Error::from)
        .and_then(|output| op(input, output, total));
    match outcome {
        Ok(()) => {
            fs::rename(&staging, dest)?;
            Ok(())
        }
        Err(err) => {
            let _ = fs::remove_file(&staging);
            Err(err)
        }
    }
}

fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(".part");
    dest.with_file_name(name)
}

pub(crate) fn report(progress: &mut impl FnMut(f64), processed: u64, total: u64) {
    if total > 0 {
        progress((processed as f64 / total as f64).min(1.0));
    }
}

pub(crate) fn read_prefix<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::Format("envelope is shorter than its IV or nonce")
        } else {
            Error::Io(e)
        }
    })?;
    Ok(buf)
}

fn drain_reader<R: Read>(
    reader: &mut R,
    total: u64,
    progress: &mut impl FnMut(f64),
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut processed = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Ok(out);
        }
        out.extend_from_slice(&buf[..n]);
        processed += n as u64;
        report(progress, processed, total);
    }
}

/// Write-through sink that can hold back trailing zero runs
///
/// Used for zero-padded streams: interior zeros pass through once a nonzero
/// byte follows them; a zero run still held at the end is the padding and is
/// dropped.
struct TrimmedSink<'a, W: Write> {
    inner: &'a mut W,
    trim: bool,
    held: u64,
}

impl<'a, W: Write> TrimmedSink<'a, W> {
    fn new(inner: &'a mut W, trim: bool) -> Self {
        Self {
            inner,
            trim,
            held: 0,
        }
    }

    fn write_chunk(&mut self, data: &[u8]) -> Result<()> {
        if !self.trim {
            self.inner.write_all(data)?;
            return Ok(());
        }
        match data.iter().rposition(|&b| b != 0) {
            None => self.held += data.len() as u64,
            Some(last) => {
                self.flush_held()?;
                self.inner.write_all(&data[..=last])?;
                self.held = (data.len() - 1 - last) as u64;
            }
        }
        Ok(())
    }

    fn flush_held(&mut self) -> Result<()> {
        let zeros = [0u8; 512];
        while self.held > 0 {
            let n = (self.held).min(zeros.len() as u64) as usize;
            self.inner.write_all(&zeros[..n])?;
            self.held -= n as u64;
        }
        Ok(())
    }

    fn finish(self) {
        // held zeros are the padding; drop them
    }
}
