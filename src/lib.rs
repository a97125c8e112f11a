//! This file is the root of the `smoothpack` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`bridge`, `kernels`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of items most callers need, so they can write
//!     `smoothpack::pack_series` instead of reaching into submodules.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[doc(hidden)]
pub use log as __log;

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;
pub mod traits;
pub mod types;
pub mod utils;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use bridge::{inspect_frame, pack_series, unpack_series, FrameHeader, FrameInfo};
pub use config::{CompressionProfile, PackConfig};
pub use error::SmoothpackError;
pub use kernels::{
    bump, fletcher32, transition, transition_derivative, transition_to_constant,
    transition_to_constant_trapezoid, BumpParams, CumulativeTrapezoid, IndefiniteIntegral,
    TransitionOutput, TransitionParams,
};
pub use observability::enable_verbose_logging;
pub use traits::{SampleWord, WindowFloat};
pub use types::SampleType;
