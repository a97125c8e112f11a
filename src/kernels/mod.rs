//! This module serves as the public API for the collection of all pure,
//! stateless kernels.
//!
//! Windowing kernels shape signals before they are stored; pretreatment and
//! integrity kernels run on the raw sample buffers right before (or after)
//! serialization.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Smooth windows: transition, bump and their derivatives.
pub mod window;

/// Running integrals consumed by the taper.
pub mod integrate;

/// Damping a signal smoothly to a constant.
pub mod taper;

/// Layer 1: Value Reduction
pub mod xor_delta;

/// Integrity: Fletcher-32 checksum.
pub mod fletcher32;

/// Final Stage: Entropy Coding
pub mod zstd;

//==================================================================================
// 2. Re-exports
//==================================================================================

pub use fletcher32::{fletcher32, fletcher32_bytes, fletcher32_halfwords, Fletcher32};
pub use integrate::{CumulativeTrapezoid, IndefiniteIntegral};
pub use taper::{transition_to_constant, transition_to_constant_trapezoid};
pub use window::{bump, transition, transition_derivative, BumpParams, TransitionOutput, TransitionParams};
pub use xor_delta::{decode_series, encode_series};
