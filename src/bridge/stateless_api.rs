// In: src/bridge/stateless_api.rs

use ndarray::{ArrayD, ArrayView, Dimension, IxDyn};

use crate::bridge::format::{read_frame, write_frame, FrameHeader, FrameInfo};
use crate::config::PackConfig;
use crate::error::SmoothpackError;
use crate::kernels::{fletcher32, xor_delta, zstd};
use crate::traits::SampleWord;
use crate::utils::bytes_to_typed_vec;
use crate::VERSION;

/// Fletcher-32 over a pretreated payload. An odd trailing byte is paired with a
/// zero byte so byte-wide samples can be checksummed too.
fn payload_checksum(bytes: &[u8]) -> Result<u32, SmoothpackError> {
    if bytes.len() % 2 == 0 {
        return fletcher32::fletcher32_bytes(bytes);
    }
    let mut state = fletcher32::Fletcher32::new();
    let (even, last) = bytes.split_at(bytes.len() - 1);
    let words: Vec<u16> = even
        .chunks_exact(2)
        .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
        .chain(std::iter::once(u16::from_ne_bytes([last[0], 0])))
        .collect();
    state.update(&words);
    Ok(state.finish())
}

/// Packs a time series (axis 0 is time) into a self-describing frame.
///
/// The samples are copied into row-major order, XOR delta encoded if enabled,
/// checksummed, and compressed with zstd.
pub fn pack_series<T, D>(series: ArrayView<'_, T, D>, config: &PackConfig) -> Result<Vec<u8>, SmoothpackError>
where
    T: SampleWord,
    D: Dimension,
{
    config.validate()?;
    let series = series.into_dyn();
    if series.ndim() == 0 {
        return Err(SmoothpackError::InvalidArgument(
            "cannot pack a 0-d array: a leading time axis is required".to_string(),
        ));
    }

    let mut owned = series.as_standard_layout().into_owned();
    if config.xor_delta {
        xor_delta::encode_series(owned.view_mut())?;
    }
    let samples = owned.as_slice().ok_or_else(|| {
        SmoothpackError::FrameFormatError("series is not contiguous after relayout".to_string())
    })?;
    let raw: &[u8] = bytemuck::cast_slice(samples);

    let checksum = if config.checksum {
        Some(payload_checksum(raw)?)
    } else {
        None
    };
    let level = config.effective_zstd_level();
    let payload = zstd::encode(raw, level)?;

    let header = FrameHeader {
        sample_type: T::SAMPLE_TYPE,
        shape: owned.shape().to_vec(),
        xor_delta: config.xor_delta,
        checksum,
        zstd_level: level,
        writer_version: VERSION.to_string(),
    };
    let frame = write_frame(&header, &payload)?;

    log::info!(
        "pack_series: type={} shape={:?} raw={}B frame={}B",
        header.sample_type,
        header.shape,
        raw.len(),
        frame.len()
    );
    log_metric!(
        "event" = "pack_series",
        "raw_bytes" = raw.len(),
        "frame_bytes" = frame.len()
    );
    Ok(frame)
}

/// Restores a time series packed by [`pack_series`], bit for bit.
///
/// # Errors
/// `UnsupportedType` if the frame holds a different sample type than `T`,
/// `ChecksumMismatch` if the stored checksum does not match, and
/// `FrameFormatError` for truncated or corrupted frames, including a payload
/// whose size disagrees with the header shape. The payload size is checked
/// before any buffer is allocated.
pub fn unpack_series<T: SampleWord>(bytes: &[u8]) -> Result<ArrayD<T>, SmoothpackError> {
    let (header, payload, _) = read_frame(bytes)?;
    if header.sample_type != T::SAMPLE_TYPE {
        return Err(SmoothpackError::UnsupportedType(format!(
            "frame holds {} samples, requested {}",
            header.sample_type,
            T::SAMPLE_TYPE
        )));
    }

    let expected_len = header.payload_len()?;
    let raw = zstd::decode_exact(payload, expected_len).map_err(|e| {
        SmoothpackError::FrameFormatError(format!(
            "payload does not hold shape {:?} of {} ({} bytes): {}",
            header.shape, header.sample_type, expected_len, e
        ))
    })?;

    if let Some(expected) = header.checksum {
        let actual = payload_checksum(&raw)?;
        if actual != expected {
            log::warn!(
                "unpack_series: checksum mismatch (expected {:#010x}, got {:#010x})",
                expected,
                actual
            );
            return Err(SmoothpackError::ChecksumMismatch { expected, actual });
        }
    }

    let samples: Vec<T> = bytes_to_typed_vec(&raw)?;
    let mut series = ArrayD::from_shape_vec(IxDyn(&header.shape), samples)?;
    if header.xor_delta {
        xor_delta::decode_series(series.view_mut())?;
    }
    log::debug!("unpack_series: restored shape {:?}", header.shape);
    Ok(series)
}

/// Reads a frame's header without decompressing the payload.
pub fn inspect_frame(bytes: &[u8]) -> Result<FrameInfo, SmoothpackError> {
    let (header, payload, header_size) = read_frame(bytes)?;
    Ok(FrameInfo {
        header,
        header_size,
        payload_size: payload.len(),
        total_size: bytes.len(),
    })
}
