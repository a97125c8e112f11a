//! This module contains the pure, stateless kernels for performing Zstandard
//! compression and decompression.
//!
//! This is the Final Stage transform for a packed series. It takes the byte buffer
//! already pretreated by the XOR delta kernel and applies a general-purpose entropy
//! coder, which is where the long zero-bit runs actually turn into saved bytes.
//! This module is a safe, panic-free wrapper around the `zstd` crate.

use crate::error::SmoothpackError;

/// Size of the little-endian uncompressed-length prefix written by [`encode`].
pub const LENGTH_PREFIX_SIZE: usize = 8;

/// Compresses `input_bytes`, prefixing the output with the uncompressed length.
///
/// An empty input produces an empty output.
pub fn encode(input_bytes: &[u8], level: i32) -> Result<Vec<u8>, SmoothpackError> {
    if input_bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut output_buf = Vec::with_capacity(input_bytes.len() / 2 + LENGTH_PREFIX_SIZE);
    let uncompressed_len: u64 = input_bytes.len() as u64;
    output_buf.extend_from_slice(&uncompressed_len.to_le_bytes());

    // `finish` is essential to finalize the Zstd frame.
    let mut encoder = zstd::stream::Encoder::new(&mut output_buf, level)
        .map_err(|e| SmoothpackError::ZstdError(e.to_string()))?;
    std::io::Write::write_all(&mut encoder, input_bytes)
        .map_err(|e| SmoothpackError::ZstdError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| SmoothpackError::ZstdError(e.to_string()))?;

    Ok(output_buf)
}

/// Pre-allocation cap for [`decode`], so a corrupted length prefix cannot
/// request an arbitrarily large buffer up front. (64MB)
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

/// Splits the length prefix from the zstd stream.
fn split_prefix(input_bytes: &[u8]) -> Result<(u64, &[u8]), SmoothpackError> {
    match input_bytes.split_first_chunk::<LENGTH_PREFIX_SIZE>() {
        Some((len_bytes, compressed_data)) => Ok((u64::from_le_bytes(*len_bytes), compressed_data)),
        None => Err(SmoothpackError::ZstdError(
            "Input stream too short to contain size header.".to_string(),
        )),
    }
}

fn decompress_checked(
    compressed_data: &[u8],
    uncompressed_len: usize,
    capacity: usize,
) -> Result<Vec<u8>, SmoothpackError> {
    let mut decompressed_data = Vec::with_capacity(capacity);
    zstd::stream::copy_decode(compressed_data, &mut decompressed_data)
        .map_err(|e| SmoothpackError::ZstdError(e.to_string()))?;

    if decompressed_data.len() != uncompressed_len {
        return Err(SmoothpackError::ZstdError(format!(
            "Decompressed size does not match header. Expected {}, got {}.",
            uncompressed_len,
            decompressed_data.len()
        )));
    }
    Ok(decompressed_data)
}

/// Decompresses the output of [`encode`], checking the length prefix.
pub fn decode(input_bytes: &[u8]) -> Result<Vec<u8>, SmoothpackError> {
    if input_bytes.is_empty() {
        return Ok(Vec::new());
    }
    let (prefix, compressed_data) = split_prefix(input_bytes)?;
    let uncompressed_len = usize::try_from(prefix).map_err(|_| {
        SmoothpackError::ZstdError(format!("Size header {} does not fit in memory.", prefix))
    })?;
    decompress_checked(
        compressed_data,
        uncompressed_len,
        uncompressed_len.min(MAX_PREALLOC),
    )
}

/// Decompresses the output of [`encode`] when the caller already knows how many
/// bytes to expect. The length prefix is checked before anything is allocated.
pub fn decode_exact(input_bytes: &[u8], expected_len: usize) -> Result<Vec<u8>, SmoothpackError> {
    if input_bytes.is_empty() {
        if expected_len == 0 {
            return Ok(Vec::new());
        }
        return Err(SmoothpackError::ZstdError(format!(
            "Empty stream, expected {} bytes.",
            expected_len
        )));
    }
    let (prefix, compressed_data) = split_prefix(input_bytes)?;
    if prefix != expected_len as u64 {
        return Err(SmoothpackError::ZstdError(format!(
            "Size header {} does not match the expected {} bytes.",
            prefix, expected_len
        )));
    }
    decompress_checked(compressed_data, expected_len, expected_len)
}

//==================================================================================
// Unit Tests
//==================================================================================
