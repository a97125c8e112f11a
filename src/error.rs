// In: src/error.rs

//! This module defines the single, unified error type for the entire smoothpack library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmoothpackError {
    // =========================================================================
    // === Caller Contract Violations
    // =========================================================================
    /// A precondition on the inputs does not hold (non-monotonic grid, boundary
    /// outside the grid, mismatched lengths, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Buffer length mismatch: expected a multiple of {0}, got {1}")]
    BufferMismatch(usize, usize),

    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    // =========================================================================
    // === Frame Serialization Errors
    // =========================================================================
    #[error("Frame serialization/deserialization failed: {0}")]
    FrameFormatError(String),

    #[error("Checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("Zstd operation failed: {0}")]
    ZstdError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g. opening a log file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically during frame header serialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
