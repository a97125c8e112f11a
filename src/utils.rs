//! This module provides a set of shared, low-level utility functions used
//! throughout the smoothpack core.
//!
//! Its primary responsibilities include:
//! 1.  Providing a validated, alignment-free conversion from raw bytes to typed samples.
//! 2.  Validating sample grids before any kernel indexes into them.
//! 3.  Bounds-checked boundary searches over monotonic grids.

use ndarray::ArrayView1;
use num_traits::Float;

use crate::error::SmoothpackError;

//==================================================================================
// 1. Byte Conversions
//==================================================================================

/// Copies bytes into an owned, correctly aligned `Vec<T>`.
///
/// Never fails on alignment, so it is safe for payloads sliced out of a larger
/// frame.
///
/// # Errors
/// Returns `SmoothpackError::BufferMismatch` if the byte slice length is not
/// divisible by the size of `T`.
pub fn bytes_to_typed_vec<T>(bytes: &[u8]) -> Result<Vec<T>, SmoothpackError>
where
    T: bytemuck::Pod,
{
    let width = std::mem::size_of::<T>();
    if bytes.len() % width != 0 {
        return Err(SmoothpackError::BufferMismatch(width, bytes.len()));
    }
    Ok(bytes
        .chunks_exact(width)
        .map(bytemuck::pod_read_unaligned::<T>)
        .collect())
}

//==================================================================================
// 2. Grid Validation & Search
//==================================================================================

/// Checks that `x` is a usable sample grid: non-empty and non-decreasing.
///
/// A NaN anywhere in the grid breaks monotonicity and is rejected here too.
pub fn validate_grid<F: Float>(x: &ArrayView1<'_, F>, name: &str) -> Result<(), SmoothpackError> {
    if x.is_empty() {
        return Err(SmoothpackError::InvalidArgument(format!(
            "{} must contain at least one sample",
            name
        )));
    }
    if x[0].is_nan() {
        return Err(SmoothpackError::InvalidArgument(format!(
            "{} contains NaN at index 0",
            name
        )));
    }
    for k in 1..x.len() {
        // `!(a <= b)` is also true when either side is NaN.
        if !(x[k - 1] <= x[k]) {
            return Err(SmoothpackError::InvalidArgument(format!(
                "{} must be monotonic non-decreasing (index {}: {:?} -> {:?})",
                name,
                k,
                x[k - 1].to_f64(),
                x[k].to_f64()
            )));
        }
    }
    Ok(())
}

/// Returns the first index `k` for which `pred(x[k])` is false, assuming `pred`
/// is true on a prefix of `x` and false afterwards. Returns `x.len()` when the
/// predicate holds everywhere.
pub fn partition_point<F, P>(x: &ArrayView1<'_, F>, pred: P) -> usize
where
    F: Copy,
    P: Fn(F) -> bool,
{
    let mut lo = 0;
    let mut hi = x.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(x[mid]) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// First index with `x[k] > bound`.
pub fn first_above<F: Float>(x: &ArrayView1<'_, F>, bound: F) -> usize {
    partition_point(x, |v| v <= bound)
}

/// First index with `x[k] >= bound`.
pub fn first_at_or_above<F: Float>(x: &ArrayView1<'_, F>, bound: F) -> usize {
    partition_point(x, |v| v < bound)
}
