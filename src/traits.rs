//! This module defines shared traits used across different kernels.

use num_traits::Float;
use std::fmt::Debug;
use std::ops::BitXor;

use crate::types::SampleType;

//==================================================================================
// 1. Window Kernel Floats
//==================================================================================

/// A floating-point type the smooth window kernels can be evaluated in.
pub trait WindowFloat: Float + Debug {
    /// Largest exponent passed to `exp` before the sigmoid is clamped to its start
    /// value. It is 99% of the largest representable exponent in natural-log units.
    const OVERFLOW_EXPONENT: Self;
}

impl WindowFloat for f32 {
    const OVERFLOW_EXPONENT: f32 = f32::MAX_EXP as f32 * std::f32::consts::LN_2 * 0.99;
}

impl WindowFloat for f64 {
    const OVERFLOW_EXPONENT: f64 = f64::MAX_EXP as f64 * std::f64::consts::LN_2 * 0.99;
}

//==================================================================================
// 2. Fixed-Width Sample Words
//==================================================================================

/// A fixed-width sample whose raw bit pattern can be viewed as an unsigned word
/// of the same width.
pub trait SampleWord: Copy + bytemuck::Pod {
    /// The same-width unsigned integer holding the bit pattern.
    type Word: Copy + bytemuck::Pod + BitXor<Output = Self::Word>;

    /// The frame tag for this element type.
    const SAMPLE_TYPE: SampleType;

    fn to_word(self) -> Self::Word;
    fn from_word(word: Self::Word) -> Self;

    /// XOR of the two bit patterns, reinterpreted back as a sample.
    #[inline]
    fn xor_bits(self, other: Self) -> Self {
        Self::from_word(self.to_word() ^ other.to_word())
    }
}

impl SampleWord for f32 {
    type Word = u32;
    const SAMPLE_TYPE: SampleType = SampleType::Float32;

    #[inline]
    fn to_word(self) -> u32 {
        self.to_bits()
    }
    #[inline]
    fn from_word(word: u32) -> Self {
        f32::from_bits(word)
    }
}

impl SampleWord for f64 {
    type Word = u64;
    const SAMPLE_TYPE: SampleType = SampleType::Float64;

    #[inline]
    fn to_word(self) -> u64 {
        self.to_bits()
    }
    #[inline]
    fn from_word(word: u64) -> Self {
        f64::from_bits(word)
    }
}

// Implement the trait for all primitive integer types. Signed integers map onto
// their unsigned counterpart through a plain `as` cast, which keeps every bit.
macro_rules! impl_integer_sample_word {
    ($T:ty, $U:ty, $tag:ident) => {
        impl SampleWord for $T {
            type Word = $U;
            const SAMPLE_TYPE: SampleType = SampleType::$tag;

            #[inline]
            fn to_word(self) -> $U {
                self as $U
            }
            #[inline]
            fn from_word(word: $U) -> Self {
                word as $T
            }
        }
    };
}

impl_integer_sample_word!(i8, u8, Int8);
impl_integer_sample_word!(i16, u16, Int16);
impl_integer_sample_word!(i32, u32, Int32);
impl_integer_sample_word!(i64, u64, Int64);
impl_integer_sample_word!(u8, u8, UInt8);
impl_integer_sample_word!(u16, u16, UInt16);
impl_integer_sample_word!(u32, u32, UInt32);
impl_integer_sample_word!(u64, u64, UInt64);
