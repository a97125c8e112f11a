// In: src/bridge/format.rs

//! Defines the byte layout of a packed series frame. This is the single source of
//! truth for both the writer (`pack_series`) and the reader (`unpack_series`).
//!
//! ```text
//! | magic "SMPK" (4) | version u16 LE (2) | header_len u32 LE (4) | header JSON | payload |
//! ```
//!
//! The payload is the zstd kernel output (an 8-byte uncompressed length followed by
//! a zstd stream) of the pretreated sample bytes.

use serde::{Deserialize, Serialize};

use crate::error::SmoothpackError;
use crate::types::SampleType;

/// The magic number to identify the start of a smoothpack frame.
pub const FRAME_MAGIC: &[u8; 4] = b"SMPK";
/// The current version of the frame format.
pub const FRAME_FORMAT_VERSION: u16 = 1;
/// magic(4) + version(2) + header_len(4)
pub const FRAME_PREAMBLE_SIZE: usize = 10;
/// A reasonable limit to prevent OOM attacks from malformed header lengths. (1MB)
const MAX_HEADER_LEN: usize = 1024 * 1024;

/// The JSON header describing how the payload was produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub sample_type: SampleType,
    /// Full array shape; axis 0 is time.
    pub shape: Vec<usize>,
    /// Whether the XOR delta pretreatment was applied along axis 0.
    pub xor_delta: bool,
    /// Fletcher-32 of the pretreated, uncompressed bytes. Odd-length byte buffers
    /// are checksummed with one trailing zero byte appended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<u32>,
    pub zstd_level: i32,
    pub writer_version: String,
}

impl FrameHeader {
    /// Number of samples described by `shape`, guarding against overflow.
    pub fn sample_count(&self) -> Result<usize, SmoothpackError> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| {
                SmoothpackError::FrameFormatError(format!("shape {:?} overflows usize", self.shape))
            })
    }

    /// Expected length of the decompressed payload in bytes.
    pub fn payload_len(&self) -> Result<usize, SmoothpackError> {
        self.sample_count()?
            .checked_mul(self.sample_type.byte_width())
            .ok_or_else(|| {
                SmoothpackError::FrameFormatError(format!("shape {:?} overflows usize", self.shape))
            })
    }
}

/// The public-facing summary returned by `inspect_frame`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    pub header: FrameHeader,
    /// Preamble plus JSON header, in bytes.
    pub header_size: usize,
    /// Compressed payload, in bytes.
    pub payload_size: usize,
    pub total_size: usize,
}

/// Serializes the preamble and header, then appends the payload.
pub(crate) fn write_frame(header: &FrameHeader, payload: &[u8]) -> Result<Vec<u8>, SmoothpackError> {
    let header_json = serde_json::to_vec(header)?;
    let header_len = u32::try_from(header_json.len()).map_err(|_| {
        SmoothpackError::FrameFormatError("frame header exceeds u32::MAX bytes".to_string())
    })?;

    let mut out = Vec::with_capacity(FRAME_PREAMBLE_SIZE + header_json.len() + payload.len());
    out.extend_from_slice(FRAME_MAGIC);
    out.extend_from_slice(&FRAME_FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&header_len.to_le_bytes());
    out.extend_from_slice(&header_json);
    out.extend_from_slice(payload);
    Ok(out)
}

/// Splits a frame into its parsed header and the raw payload, returning the
/// header section size as well.
pub(crate) fn read_frame(bytes: &[u8]) -> Result<(FrameHeader, &[u8], usize), SmoothpackError> {
    if bytes.len() < FRAME_PREAMBLE_SIZE {
        return Err(SmoothpackError::FrameFormatError(format!(
            "frame too short: expected at least {} bytes, got {}",
            FRAME_PREAMBLE_SIZE,
            bytes.len()
        )));
    }
    if &bytes[0..4] != FRAME_MAGIC {
        return Err(SmoothpackError::FrameFormatError(
            "invalid magic number".to_string(),
        ));
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FRAME_FORMAT_VERSION {
        return Err(SmoothpackError::FrameFormatError(format!(
            "unsupported frame version {} (this build reads {})",
            version, FRAME_FORMAT_VERSION
        )));
    }
    let header_len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
    if header_len > MAX_HEADER_LEN || FRAME_PREAMBLE_SIZE + header_len > bytes.len() {
        return Err(SmoothpackError::FrameFormatError(format!(
            "header length {} does not fit in a frame of {} bytes",
            header_len,
            bytes.len()
        )));
    }

    let header_end = FRAME_PREAMBLE_SIZE + header_len;
    let header: FrameHeader = serde_json::from_slice(&bytes[FRAME_PREAMBLE_SIZE..header_end])?;
    if header.shape.is_empty() {
        return Err(SmoothpackError::FrameFormatError(
            "frame shape must have a leading time axis".to_string(),
        ));
    }
    Ok((header, &bytes[header_end..], header_end))
}
