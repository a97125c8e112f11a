//! This module defines the core, strongly-typed data representations used
//! throughout smoothpack.
//!
//! It currently includes the canonical `SampleType` enum, which tags the element
//! type of a serialized time series so a frame can be validated before its bytes
//! are reinterpreted.

pub mod sample_type;

// Re-export the main type(s) for easier access.
pub use sample_type::SampleType;
