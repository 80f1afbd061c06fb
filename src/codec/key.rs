//! Key codec
//!
//! Fixed-width, order-preserving encoding of sequence numbers.

use crate::error::{BenchError, Result};

/// Width of an encoded key in bytes
pub const KEY_SIZE: usize = 8;

/// Encode a sequence number as an 8-byte big-endian key
pub fn encode_key(n: u64) -> [u8; KEY_SIZE] {
    n.to_be_bytes()
}

/// Decode a key produced by [`encode_key`]
pub fn decode_key(bytes: &[u8]) -> Result<u64> {
    let raw: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
        BenchError::Serialization(format!(
            "Invalid key width: expected {} bytes, got {}",
            KEY_SIZE,
            bytes.len()
        ))
    })?;
    Ok(u64::from_be_bytes(raw))
}
