// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API for storing time series. It wraps the pure,
// stateless kernels in a self-describing frame so a series can be written by one
// process and restored bit-exactly by another.
//
// Data Flow (Packing):
//
//   1. [pack_series]            -> Receives `ArrayView<T, D>` (axis 0 is time)
//         |
//         `-> a. Relayout to row-major, `kernels::xor_delta::encode_series`
//         |
//         `-> b. `kernels::fletcher32` over the pretreated bytes
//         |
//         `-> c. `kernels::zstd::encode`
//         |
//   2. [format::write_frame]    -> Returns `Vec<u8>` (preamble + JSON header + payload)
//
//
// Data Flow (Unpacking):
//
//   1. [format::read_frame]     -> Validates magic, version and header
//         |
//   2. [unpack_series]          -> zstd decode, checksum verify, XOR delta decode
//         |
//         `-> Returns `ArrayD<T>` with the original shape
//
// ====================================================================================
pub mod format;
pub mod stateless_api;

pub use format::{FrameHeader, FrameInfo, FRAME_FORMAT_VERSION, FRAME_MAGIC};
pub use stateless_api::{inspect_frame, pack_series, unpack_series};
