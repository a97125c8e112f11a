//! Indefinite integration of sampled functions over an ordered grid.
//!
//! `transition_to_constant` only needs a running integral, so it consumes the
//! [`IndefiniteIntegral`] trait rather than a concrete quadrature rule. Callers
//! with a higher-order integrator plug it in there.

use ndarray::{Array1, ArrayView1};
use num_traits::Float;

use crate::error::SmoothpackError;

/// A running integral of `g` over the grid `t`.
///
/// Implementations return an array of the same length as the input with
/// `result[0] == 0` and `result[k]` the integral of `g` from `t[0]` to `t[k]`.
pub trait IndefiniteIntegral<F> {
    fn indefinite_integral(
        &self,
        g: ArrayView1<'_, F>,
        t: ArrayView1<'_, F>,
    ) -> Result<Array1<F>, SmoothpackError>;
}

/// Composite trapezoid rule, accumulated sample by sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CumulativeTrapezoid;

impl<F: Float> IndefiniteIntegral<F> for CumulativeTrapezoid {
    fn indefinite_integral(
        &self,
        g: ArrayView1<'_, F>,
        t: ArrayView1<'_, F>,
    ) -> Result<Array1<F>, SmoothpackError> {
        if g.len() != t.len() {
            return Err(SmoothpackError::InvalidArgument(format!(
                "cumulative trapezoid: g and t must have the same length (got {} and {})",
                g.len(),
                t.len()
            )));
        }

        let mut result = Array1::zeros(g.len());
        let half = F::from(0.5).ok_or_else(|| {
            SmoothpackError::UnsupportedType("float type cannot represent 0.5".to_string())
        })?;
        let mut acc = F::zero();
        for k in 1..g.len() {
            acc = acc + half * (t[k] - t[k - 1]) * (g[k] + g[k - 1]);
            result[k] = acc;
        }
        Ok(result)
    }
}
