//! Optional zlib pass over the token stream.

use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use tracing::{debug, warn};

use crate::error::{CodecError, Result};

/// Payload bytes and whether zlib was applied to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryOutput {
    pub payload: Vec<u8>,
    pub applied: bool,
}

/// Deflate `stream` when it is longer than `threshold` bytes and the
/// result is strictly smaller; otherwise keep it as is.
pub fn maybe_compress(stream: &str, threshold: usize) -> SecondaryOutput {
    let raw = stream.as_bytes();
    if raw.len() <= threshold {
        return SecondaryOutput { payload: raw.to_vec(), applied: false };
    }

    match deflate(raw) {
        Ok(packed) if packed.len() < raw.len() => {
            debug!(raw = raw.len(), packed = packed.len(), "zlib applied");
            SecondaryOutput { payload: packed, applied: true }
        }
        Ok(packed) => {
            debug!(raw = raw.len(), packed = packed.len(), "zlib rejected, no gain");
            SecondaryOutput { payload: raw.to_vec(), applied: false }
        }
        Err(e) => {
            warn!(error = %e, "zlib failed, storing token stream raw");
            SecondaryOutput { payload: raw.to_vec(), applied: false }
        }
    }
}

pub fn deflate(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

pub fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| CodecError::decode(format!("zlib inflate failed: {e}")))?;
    if decoder.total_in() != bytes.len() as u64 {
        return Err(CodecError::decode(format!(
            "{} trailing bytes after zlib stream",
            bytes.len() as u64 - decoder.total_in()
        )));
    }
    Ok(out)
}
