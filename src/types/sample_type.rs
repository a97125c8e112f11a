//! This module defines the canonical, type-safe representation of the sample
//! element types a smoothpack frame can carry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical, internal representation of a sample element type.
///
/// Every variant has a fixed width, which is what makes the XOR delta transform
/// and the Fletcher-32 halfword view well defined.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SampleType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl SampleType {
    /// Width of one sample in bytes.
    pub fn byte_width(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }
}

/// Provides the canonical string representation for a `SampleType`.
impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These string representations are part of the frame header contract.
        write!(f, "{:?}", self)
    }
}
