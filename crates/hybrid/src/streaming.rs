//! Streaming file cipher for asymmetric algorithms
//!
//! The direct-vs-hybrid decision is made once, up front, from the total
//! input size; a file is never split across the two shapes. Hybrid output
//! streams the bulk ciphertext chunk by chunk behind the envelope header;
//! direct mode only ever applies to inputs that fit a single asymmetric
//! block, which are staged through memory.
//!
//! Unlike the in-memory decryptor, the streaming decryptor dispatches on the
//! 6-byte magic prefix: a stream cannot be rewound after a failed direct
//! decode attempt.

use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use tracing::debug;

use envcrypt_api::error::{Error, Result};
use envcrypt_api::types::{CipherParameters, PrivateKeyMaterial, PublicKeyMaterial};
use envcrypt_params::{AES, CHUNK_SIZE, HYBRID_MAGIC};
use envcrypt_provider::{block_transform, rsa_decrypt, rsa_encrypt, Direction};
use envcrypt_symmetric::streaming::with_staged_output;

use crate::engine::{checked_descriptor, fresh_session_key, hybrid_threshold, session_params};

/// Encrypts `reader` into `writer` under a public key
///
/// `total` is the plaintext length in bytes and decides direct vs. hybrid.
pub fn encrypt_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    total: u64,
    key: &PublicKeyMaterial,
    params: &CipherParameters,
    mut progress: impl FnMut(f64),
) -> Result<()> {
    checked_descriptor(key.algorithm(), params)?;
    let threshold = hybrid_threshold(params.key_size_bits, params.padding)? as u64;

    if total <= threshold {
        debug!(total, threshold, "streaming direct asymmetric encrypt");
        let mut plaintext = Vec::new();
        reader.read_to_end(&mut plaintext)?;
        writer.write_all(&rsa_encrypt(key.der(), params.padding, &plaintext)?)?;
    } else {
        debug!(total, threshold, "streaming hybrid encrypt");
        let session = fresh_session_key();
        let iv = crate::engine::random_iv();
        let wrapped_key = rsa_encrypt(key.der(), params.padding, session.as_bytes())?;

        writer.write_all(HYBRID_MAGIC)?;
        writer.write_u32::<BigEndian>(iv.len() as u32)?;
        writer.write_all(&iv)?;
        writer.write_u32::<BigEndian>(wrapped_key.len() as u32)?;
        writer.write_all(&wrapped_key)?;

        let bulk = session_params();
        let mut transform = block_transform(
            &AES,
            bulk.mode,
            bulk.padding,
            session.as_bytes(),
            Some(&iv),
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
            report(&mut progress, processed, total);
        }
        writer.write_all(&transform.finalize()?)?;
    }
    writer.flush()?;
    progress(1.0);
    Ok(())
}

/// Decrypts either shape of asymmetric ciphertext from `reader` into `writer`
///
/// `total` is the ciphertext length in bytes, used for progress fractions.
pub fn decrypt_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    total: u64,
    key: &PrivateKeyMaterial,
    params: &CipherParameters,
    mut progress: impl FnMut(f64),
) -> Result<()> {
    checked_descriptor(key.algorithm(), params)?;

    let mut head = [0u8; 6];
    let mut filled = 0;
    while filled < head.len() {
        let n = reader.read(&mut head[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    if filled == head.len() && head == *HYBRID_MAGIC {
        decrypt_hybrid_stream(reader, &mut writer, total, key, params, &mut progress)?;
    } else {
        debug!(total, "streaming direct asymmetric decrypt");
        let mut ciphertext = head[..filled].to_vec();
        reader.read_to_end(&mut ciphertext)?;
        let plaintext = rsa_decrypt(key.der(), params.padding, &ciphertext).map_err(|err| {
            match err {
                err @ Error::InvalidKey(_) => err,
                _ => Error::Format("ciphertext is neither an asymmetric block nor a hybrid envelope"),
            }
        })?;
        writer.write_all(&plaintext)?;
    }
    writer.flush()?;
    progress(1.0);
    Ok(())
}

fn decrypt_hybrid_stream<R: Read, W: Write>(
    mut reader: R,
    writer: &mut W,
    total: u64,
    key: &PrivateKeyMaterial,
    params: &CipherParameters,
    progress: &mut impl FnMut(f64),
) -> Result<()> {
    debug!(total, "streaming hybrid decrypt");
    let iv = read_field(&mut reader, total, "truncated IV")?;
    let wrapped_key = read_field(&mut reader, total, "truncated wrapped key")?;
    let mut processed = (HYBRID_MAGIC.len() + 4 + iv.len() + 4 + wrapped_key.len()) as u64;
    report(progress, processed, total);

    let session_bytes =
        rsa_decrypt(key.der(), params.padding, &wrapped_key).map_err(|err| match err {
            err @ Error::InvalidKey(_) => err,
            _ => Error::Format("session key cannot be unwrapped"),
        })?;
    let session = envcrypt_api::types::SecretKey::new(AES.name, session_bytes);

    let bulk = session_params();
    let mut transform = block_transform(
        &AES,
        bulk.mode,
        bulk.padding,
        session.as_bytes(),
        Some(&iv),
        Direction::Decrypt,
    )?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&transform.update(&buf[..n])?)?;
        processed += n as u64;
        report(progress, processed, total);
    }
    writer.write_all(&transform.finalize()?)?;
    Ok(())
}

/// Encrypts `source` into `dest` under a public key, staging the output
pub fn encrypt_file(
    source: &Path,
    dest: &Path,
    key: &PublicKeyMaterial,
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

/// Decrypts `source` into `dest` with a private key, staging the output
pub fn decrypt_file(
    source: &Path,
    dest: &Path,
    key: &PrivateKeyMaterial,
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

fn report(progress: &mut impl FnMut(f64), processed: u64, total: u64) {
    if total > 0 {
        progress((processed as f64 / total as f64).min(1.0));
    }
}

/// Reads one u32-length-prefixed field, mapping EOF to a format error
fn read_field<R: Read>(reader: &mut R, total: u64, what: &'static str) -> Result<Vec<u8>> {
    let len = reader.read_u32::<BigEndian>().map_err(|e| eof_format(e, what))? as u64;
    if total > 0 && len > total {
        return Err(Error::Format("length prefix overruns the envelope"));
    }
    let mut field = vec![0u8; len as usize];
    reader
        .read_exact(&mut field)
        .map_err(|e| eof_format(e, what))?;
    Ok(field)
}

fn eof_format(e: io::Error, what: &'static str) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::Format(what)
    } else {
        Error::Io(e)
    }
}
