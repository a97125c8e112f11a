//! This module contains the pure, stateless, and performant kernels for performing
//! XOR delta encoding and decoding of time series.
//!
//! This is a Layer 1 (Value Reduction) transform. Consecutive samples of a smooth
//! physical series usually differ in only a few bits of their floating-point
//! representation, so XOR-ing each time step with its predecessor leaves long runs
//! of zero bits for the entropy coder. The transform works on raw bit patterns and
//! is exactly invertible, NaN payloads and signed zeros included.
//!
//! Time runs along axis 0. Encoding walks from the last time step back to the
//! second so each step sees its unmodified predecessor; decoding walks forward so
//! each step sees its restored predecessor.

use ndarray::{ArrayViewMut, Axis, Dimension, RemoveAxis, Zip};

use crate::error::SmoothpackError;
use crate::traits::SampleWord;

//==================================================================================
// 1. Private Core Logic
//==================================================================================

/// XORs time step `i` with time step `i - 1` in place.
fn xor_step<T, D>(series: &mut ArrayViewMut<'_, T, D>, i: usize)
where
    T: SampleWord,
    D: Dimension + RemoveAxis,
{
    let (head, mut tail) = series.view_mut().split_at(Axis(0), i);
    let prev = head.index_axis(Axis(0), i - 1);
    let current = tail.index_axis_mut(Axis(0), 0);
    Zip::from(current)
        .and(prev)
        .for_each(|c, &p| *c = (*c).xor_bits(p));
}

fn check_has_time_axis(ndim: usize) -> Result<(), SmoothpackError> {
    if ndim == 0 {
        return Err(SmoothpackError::InvalidArgument(
            "time series must have a leading time axis (got a 0-d array)".to_string(),
        ));
    }
    Ok(())
}

//==================================================================================
// 2. Public API
//==================================================================================

/// XOR-encodes a time series in place. Row 0 is left untouched and every later
/// row becomes the bitwise XOR of itself and its original predecessor.
///
/// The array may have any memory layout and any trailing shape.
pub fn encode_series<T, D>(mut series: ArrayViewMut<'_, T, D>) -> Result<(), SmoothpackError>
where
    T: SampleWord,
    D: Dimension + RemoveAxis,
{
    check_has_time_axis(series.ndim())?;
    let steps = series.len_of(Axis(0));
    for i in (1..steps).rev() {
        xor_step(&mut series, i);
    }
    Ok(())
}

/// Inverts [`encode_series`] in place, restoring the original bit patterns.
pub fn decode_series<T, D>(mut series: ArrayViewMut<'_, T, D>) -> Result<(), SmoothpackError>
where
    T: SampleWord,
    D: Dimension + RemoveAxis,
{
    check_has_time_axis(series.ndim())?;
    let steps = series.len_of(Axis(0));
    for i in 1..steps {
        xor_step(&mut series, i);
    }
    Ok(())
}
