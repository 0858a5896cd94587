//! Hybrid envelope framing
//!
//! Layout, reproduced exactly for interoperability:
//!
//! ```text
//! "HYBRID" (6 bytes ASCII)
//! u32 big-endian  iv length
//! iv
//! u32 big-endian  wrapped session key length
//! wrapped session key
//! bulk ciphertext (to end of buffer)
//! ```

use byteorder::{BigEndian, ByteOrder};

use envcrypt_api::error::{Error, Result};
use envcrypt_params::HYBRID_MAGIC;

/// Parsed form of the self-describing hybrid layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridEnvelope {
    pub iv: Vec<u8>,
    pub wrapped_key: Vec<u8>,
    pub bulk: Vec<u8>,
}

impl HybridEnvelope {
    /// Whether a buffer carries the envelope magic
    pub fn has_magic(bytes: &[u8]) -> bool {
        bytes.len() >= HYBRID_MAGIC.len() && &bytes[..HYBRID_MAGIC.len()] == HYBRID_MAGIC
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            HYBRID_MAGIC.len() + 4 + self.iv.len() + 4 + self.wrapped_key.len() + self.bulk.len(),
        );
        out.extend_from_slice(HYBRID_MAGIC);
        let mut len = [0u8; 4];
        BigEndian::write_u32(&mut len, self.iv.len() as u32);
        out.extend_from_slice(&len);
        out.extend_from_slice(&self.iv);
        BigEndian::write_u32(&mut len, self.wrapped_key.len() as u32);
        out.extend_from_slice(&len);
        out.extend_from_slice(&self.wrapped_key);
        out.extend_from_slice(&self.bulk);
        out
    }

    /// Parses a buffer, rejecting bad magic and any length field that
    /// overruns the remaining bytes
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if !Self::has_magic(bytes) {
            return Err(Error::Format("missing hybrid envelope magic"));
        }
        let mut pos = HYBRID_MAGIC.len();

        let iv = read_field(
            bytes,
            &mut pos,
            "truncated IV length",
            "IV length overruns the envelope",
        )?;
        let wrapped_key = read_field(
            bytes,
            &mut pos,
            "truncated wrapped key length",
            "wrapped key length overruns the envelope",
        )?;
        let bulk = bytes[pos..].to_vec();

        Ok(Self {
            iv,
            wrapped_key,
            bulk,
        })
    }
}

fn read_field(
    bytes: &[u8],
    pos: &mut usize,
    truncated: &'static str,
    overrun: &'static str,
) -> Result<Vec<u8>> {
    if bytes.len() < *pos + 4 {
        return Err(Error::Format(truncated));
    }
    let len = BigEndian::read_u32(&bytes[*pos..*pos + 4]) as usize;
    *pos += 4;
    if bytes.len() - *pos < len {
        return Err(Error::Format(overrun));
    }
    let field = bytes[*pos..*pos + len].to_vec();
    *pos += len;
    Ok(field)
}
