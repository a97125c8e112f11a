//! This module contains the pure, stateless kernels for the smooth transition and
//! bump windows.
//!
//! Both are built from the standard C-infinity sigmoid with compact support:
//!
//! ```text
//! s(tau) = 1 / (1 + exp(1/tau - 1/(1 - tau)))     for 0 < tau < 1
//! ```
//!
//! which is exactly 0 at `tau = 0`, exactly 1 at `tau = 1`, and has every
//! derivative vanish at both ends. Tapering a signal with it introduces no
//! high-frequency artifacts. The exponent diverges near `tau = 0`; once it passes
//! `WindowFloat::OVERFLOW_EXPONENT` the kernel returns the start value directly
//! instead of evaluating `exp`.

use ndarray::{s, Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::SmoothpackError;
use crate::traits::WindowFloat;
use crate::utils::{first_above, first_at_or_above, validate_grid};

//==================================================================================
// 1. Public Types
//==================================================================================

/// The result of [`transition`]: the window plus the indices bounding the open
/// interpolation region, such that `values[..i0] == y0` and `values[i1..] == y1`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutput<F> {
    pub values: Array1<F>,
    pub i0: usize,
    pub i1: usize,
}

/// Parameters of a single transition from `y0` (before `x0`) to `y1` (after `x1`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TransitionParams {
    pub x0: f64,
    pub x1: f64,
    #[serde(default)]
    pub y0: f64,
    #[serde(default = "default_one")]
    pub y1: f64,
}

/// Parameters of a bump: `y0` before `x0`, `y12` on `[x1, x2]`, `y3` after `x3`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BumpParams {
    pub x0: f64,
    pub x1: f64,
    pub x2: f64,
    pub x3: f64,
    #[serde(default)]
    pub y0: f64,
    #[serde(default = "default_one")]
    pub y12: f64,
    #[serde(default)]
    pub y3: f64,
}

fn default_one() -> f64 {
    1.0
}

impl TransitionParams {
    /// A standard 0 -> 1 transition over `(x0, x1)`.
    pub fn new(x0: f64, x1: f64) -> Self {
        Self { x0, x1, y0: 0.0, y1: 1.0 }
    }

    pub fn apply(&self, x: ArrayView1<'_, f64>) -> Result<TransitionOutput<f64>, SmoothpackError> {
        transition(x, self.x0, self.x1, self.y0, self.y1)
    }

    pub fn apply_derivative(&self, x: ArrayView1<'_, f64>) -> Result<Array1<f64>, SmoothpackError> {
        transition_derivative(x, self.x0, self.x1, self.y0, self.y1)
    }
}

impl BumpParams {
    /// A standard bump that is 0 outside `(x0, x3)` and 1 on `[x1, x2]`.
    pub fn new(x0: f64, x1: f64, x2: f64, x3: f64) -> Self {
        Self { x0, x1, x2, x3, y0: 0.0, y12: 1.0, y3: 0.0 }
    }

    pub fn apply(&self, x: ArrayView1<'_, f64>) -> Result<Array1<f64>, SmoothpackError> {
        bump(x, self.x0, self.x1, self.x2, self.x3, self.y0, self.y12, self.y3)
    }
}

//==================================================================================
// 2. Private Core Logic
//==================================================================================

/// The sigmoid argument at normalized position `tau` in (0, 1).
#[inline]
fn exponent<F: WindowFloat>(tau: F) -> F {
    F::one() / tau - F::one() / (F::one() - tau)
}

/// Fills `out[lo..hi]` with the sigmoid from `ya` (at `xa`) to `yb` (at `xb`).
fn fill_sigmoid<F: WindowFloat>(
    x: &ArrayView1<'_, F>,
    out: &mut Array1<F>,
    lo: usize,
    hi: usize,
    (xa, xb): (F, F),
    (ya, yb): (F, F),
) {
    let width = xb - xa;
    let ydiff = yb - ya;
    for k in lo..hi {
        let tau = (x[k] - xa) / width;
        let e = exponent(tau);
        out[k] = if e >= F::OVERFLOW_EXPONENT {
            ya
        } else {
            ya + ydiff / (F::one() + e.exp())
        };
    }
}

/// Checks that some sample sits at or beyond `bound`, i.e. the boundary scan
/// would terminate inside the grid.
fn check_crossing(index: usize, len: usize, name: &str) -> Result<(), SmoothpackError> {
    if index >= len {
        return Err(SmoothpackError::InvalidArgument(format!(
            "boundary {} is not crossed by the sample grid (all {} samples lie before it)",
            name, len
        )));
    }
    Ok(())
}

fn check_finite<F: WindowFloat>(values: &[(F, &str)]) -> Result<(), SmoothpackError> {
    for (v, name) in values {
        if !v.is_finite() {
            return Err(SmoothpackError::InvalidArgument(format!(
                "{} must be finite, got {:?}",
                name, v
            )));
        }
    }
    Ok(())
}

/// Validates the grid and boundaries and locates the open region `(x0, x1)`.
fn locate_transition<F: WindowFloat>(
    x: &ArrayView1<'_, F>,
    x0: F,
    x1: F,
) -> Result<(usize, usize), SmoothpackError> {
    validate_grid(x, "x")?;
    check_finite(&[(x0, "x0"), (x1, "x1")])?;
    if !(x0 < x1) {
        return Err(SmoothpackError::InvalidArgument(format!(
            "transition requires x0 < x1, got x0={:?}, x1={:?}",
            x0, x1
        )));
    }
    let i0 = first_above(x, x0);
    check_crossing(i0, x.len(), "x0")?;
    let i1 = first_at_or_above(x, x1).max(i0);
    check_crossing(i1, x.len(), "x1")?;
    Ok((i0, i1))
}

//==================================================================================
// 3. Public API
//==================================================================================

/// Returns a smooth function that is constant outside `(x0, x1)`.
///
/// The output equals `y0` for every `x[k] <= x0`, `y1` for every `x[k] >= x1`, and
/// follows the C-infinity sigmoid in between. The returned `i0` is the first index
/// with `x > x0` and `i1` the first index with `x >= x1`.
///
/// # Errors
/// `InvalidArgument` if `x` is empty or not monotonic, if `x0 >= x1`, or if no
/// sample reaches `x1`.
pub fn transition<F: WindowFloat>(
    x: ArrayView1<'_, F>,
    x0: F,
    x1: F,
    y0: F,
    y1: F,
) -> Result<TransitionOutput<F>, SmoothpackError> {
    let (i0, i1) = locate_transition(&x, x0, x1)?;
    log::debug!(
        "transition: n={} region=[{}, {}) x0={:?} x1={:?}",
        x.len(),
        i0,
        i1,
        x0,
        x1
    );

    let mut values = Array1::from_elem(x.len(), y0);
    fill_sigmoid(&x, &mut values, i0, i1, (x0, x1), (y0, y1));
    values.slice_mut(s![i1..]).fill(y1);

    Ok(TransitionOutput { values, i0, i1 })
}

/// Returns the derivative of [`transition`] with respect to `x`.
///
/// The derivative is evaluated analytically as
/// `(y1 - y0) * s * (1 - s) * (1/tau^2 + 1/(1-tau)^2) / (x1 - x0)` where `s` is the
/// sigmoid. It is exactly zero outside `(x0, x1)`, wherever the overflow clamp
/// applies, and where `tau` rounds to 1, so it never yields NaN or Inf.
///
/// # Errors
/// Same preconditions as [`transition`].
pub fn transition_derivative<F: WindowFloat>(
    x: ArrayView1<'_, F>,
    x0: F,
    x1: F,
    y0: F,
    y1: F,
) -> Result<Array1<F>, SmoothpackError> {
    let (i0, i1) = locate_transition(&x, x0, x1)?;

    let mut derivative = Array1::zeros(x.len());
    let width = x1 - x0;
    let ydiff = y1 - y0;
    for k in i0..i1 {
        let tau = (x[k] - x0) / width;
        // tau can round up to exactly 1 for samples just below x1.
        if tau >= F::one() {
            continue;
        }
        let e = exponent(tau);
        if e >= F::OVERFLOW_EXPONENT {
            continue;
        }
        // s * (1 - s) with s = 1 / (1 + exp(e)), free of the 1 - s cancellation.
        let ee = e.exp();
        let one_plus = F::one() + ee;
        let bell = ee / (one_plus * one_plus);
        let one_minus_tau = F::one() - tau;
        let chain = F::one() / (tau * tau) + F::one() / (one_minus_tau * one_minus_tau);
        let d = ydiff * bell * chain / width;
        if d.is_finite() {
            derivative[k] = d;
        }
    }
    Ok(derivative)
}

/// Returns a smooth bump that is constant outside `(x0, x3)` and inside `(x1, x2)`.
///
/// This is a rising transition from `(x0, y0)` to `(x1, y12)` followed by a falling
/// transition from `(x2, y12)` to `(x3, y3)`. The plateau between them is a sharp
/// constant; only the two edges are smooth. Equal neighbouring boundaries are
/// allowed and collapse the corresponding segment.
///
/// # Errors
/// `InvalidArgument` if `x` is empty or not monotonic, if the boundaries are not
/// ordered `x0 <= x1 <= x2 <= x3`, or if no sample reaches `x3`.
#[allow(clippy::too_many_arguments)]
pub fn bump<F: WindowFloat>(
    x: ArrayView1<'_, F>,
    x0: F,
    x1: F,
    x2: F,
    x3: F,
    y0: F,
    y12: F,
    y3: F,
) -> Result<Array1<F>, SmoothpackError> {
    validate_grid(&x, "x")?;
    check_finite(&[(x0, "x0"), (x1, "x1"), (x2, "x2"), (x3, "x3")])?;
    if !(x0 <= x1 && x1 <= x2 && x2 <= x3) {
        return Err(SmoothpackError::InvalidArgument(format!(
            "bump requires x0 <= x1 <= x2 <= x3, got {:?}, {:?}, {:?}, {:?}",
            x0, x1, x2, x3
        )));
    }

    let n = x.len();
    let i0 = first_above(&x, x0);
    let i1 = first_at_or_above(&x, x1).max(i0);
    let i2 = first_above(&x, x2).max(i1);
    let i3 = first_at_or_above(&x, x3).max(i2);
    check_crossing(i3, n, "x3")?;
    log::debug!("bump: n={} edges=[{}, {}, {}, {}]", n, i0, i1, i2, i3);

    let mut values = Array1::from_elem(n, y0);
    fill_sigmoid(&x, &mut values, i0, i1, (x0, x1), (y0, y12));
    values.slice_mut(s![i1..i2]).fill(y12);
    fill_sigmoid(&x, &mut values, i2, i3, (x2, x3), (y12, y3));
    values.slice_mut(s![i3..]).fill(y3);
    Ok(values)
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    fn grid(n: usize, lo: f64, hi: f64) -> Array1<f64> {
        Array1::linspace(lo, hi, n)
    }

    #[test]
    fn test_transition_concrete_scenario() {
        let x = array![0.0f64, 0.25, 0.5, 0.75, 1.0];
        let out = transition(x.view(), 0.2, 0.8, 0.0, 1.0).unwrap();

        assert_eq!(out.i0, 1);
        assert_eq!(out.i1, 4);
        assert_eq!(out.values[0], 0.0);
        assert!(out.values[1] > 0.0 && out.values[1] < 1e-3);
        assert!((out.values[2] - 0.5).abs() < 1e-15);
        assert!(out.values[3] < 1.0 && out.values[3] > 1.0 - 1e-3);
        assert_eq!(out.values[4], 1.0);
    }

    #[test]
    fn test_start_boundary_before_grid_is_accepted() {
        let x = array![0.0f64, 0.25, 0.5, 0.75, 1.0];
        let out = transition(x.view(), -0.5, 0.5, 0.0, 1.0).unwrap();
        assert_eq!(out.i0, 0);
        assert_eq!(out.i1, 2);
        assert!((out.values[0] - 0.5).abs() < 1e-15);
        assert_eq!(out.values[2], 1.0);
    }

    #[test]
    fn test_transition_flat_regions_are_exact() {
        let x = grid(1001, -1.0, 2.0);
        let (x0, x1, y0, y1) = (0.1, 0.9, -3.0, 7.0);
        let out = transition(x.view(), x0, x1, y0, y1).unwrap();

        for (k, &xk) in x.iter().enumerate() {
            if xk <= x0 {
                assert_eq!(out.values[k], y0);
                assert!(k < out.i0);
            } else if xk >= x1 {
                assert_eq!(out.values[k], y1);
                assert!(k >= out.i1);
            } else {
                assert!(k >= out.i0 && k < out.i1);
            }
        }
    }

    #[test]
    fn test_transition_is_monotonic() {
        let x = grid(2001, 0.0, 1.0);
        let rising = transition(x.view(), 0.3, 0.6, 0.0, 1.0).unwrap().values;
        for w in rising.windows(2) {
            assert!(w[0] <= w[1]);
        }
        let falling = transition(x.view(), 0.3, 0.6, 2.0, -1.0).unwrap().values;
        for w in falling.windows(2) {
            assert!(w[0] >= w[1]);
        }
    }

    #[test]
    fn test_transition_never_produces_nan_near_boundaries() {
        // Samples packed against both boundaries drive the exponent to +/- infinity.
        let mut pts = vec![0.0];
        for k in 1..200 {
            let eps = 10f64.powi(-(k % 17) - 1) * (k as f64);
            pts.push(0.0 + eps.min(0.49));
            pts.push(1.0 - eps.min(0.49));
        }
        pts.push(1.0);
        pts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let x = Array1::from(pts);

        let values = transition(x.view(), 0.0, 1.0, 0.0, 1.0).unwrap().values;
        let deriv = transition_derivative(x.view(), 0.0, 1.0, 0.0, 1.0).unwrap();
        assert!(values.iter().all(|v| v.is_finite() && *v >= 0.0 && *v <= 1.0));
        assert!(deriv.iter().all(|d| d.is_finite() && *d >= 0.0));
    }

    #[test]
    fn test_overflow_clamp_returns_start_value() {
        // tau = 1e-3 gives an exponent of ~999, beyond the f64 threshold.
        let x = array![0.0f64, 1e-3, 0.5, 1.0];
        let out = transition(x.view(), 0.0, 1.0, 4.0, 5.0).unwrap();
        assert_eq!(out.values[1], 4.0);
        let deriv = transition_derivative(x.view(), 0.0, 1.0, 4.0, 5.0).unwrap();
        assert_eq!(deriv[1], 0.0);
    }

    #[test]
    fn test_transition_f32() {
        let x: Array1<f32> = Array1::linspace(0.0, 1.0, 101);
        let out = transition(x.view(), 0.25f32, 0.75, 0.0, 1.0).unwrap();
        assert!(out.values.iter().all(|v| v.is_finite()));
        assert!((out.values[50] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let n = 20_001;
        let x = grid(n, 0.0, 1.0);
        let h = 1.0 / (n - 1) as f64;
        let (x0, x1, y0, y1) = (0.2, 0.7, 1.0, -2.0);
        let values = transition(x.view(), x0, x1, y0, y1).unwrap().values;
        let deriv = transition_derivative(x.view(), x0, x1, y0, y1).unwrap();

        let scale = deriv.iter().fold(0.0f64, |m, d| m.max(d.abs()));
        for k in 1..n - 1 {
            let central = (values[k + 1] - values[k - 1]) / (2.0 * h);
            assert!(
                (central - deriv[k]).abs() < 1e-4 * scale,
                "k={} fd={} analytic={}",
                k,
                central,
                deriv[k]
            );
        }
    }

    #[test]
    fn test_derivative_is_finite_when_tau_rounds_to_one() {
        let (x0, x1) = (-0.37f64, 0.013f64);
        let just_below = f64::from_bits(x1.to_bits() - 1);
        assert_eq!((just_below - x0) / (x1 - x0), 1.0);

        let x = array![x0 - 1.0, just_below, x1 + 1.0];
        let deriv = transition_derivative(x.view(), x0, x1, 0.0, 1.0).unwrap();
        assert!(deriv.iter().all(|d| d.is_finite()));
        assert_eq!(deriv[1], 0.0);

        let f = array![2.0f64, 3.0, 4.0];
        let out = crate::kernels::taper::transition_to_constant_trapezoid(f.view(), x.view(), x0, x1)
            .unwrap();
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_derivative_is_zero_outside_region() {
        let x = grid(101, 0.0, 1.0);
        let deriv = transition_derivative(x.view(), 0.4, 0.6, 0.0, 1.0).unwrap();
        for (k, &xk) in x.iter().enumerate() {
            if xk <= 0.4 || xk >= 0.6 {
                assert_eq!(deriv[k], 0.0);
            }
        }
    }

    #[test]
    fn test_bump_decomposes_into_transitions() {
        let x = grid(1001, 0.0, 10.0);
        let (x0, x1, x2, x3) = (1.0, 3.0, 6.0, 8.5);
        let b = bump(x.view(), x0, x1, x2, x3, 0.0, 1.0, 0.0).unwrap();
        let rise = transition(x.view(), x0, x1, 0.0, 1.0).unwrap().values;
        let fall = transition(x.view(), x2, x3, 1.0, 0.0).unwrap().values;

        for (k, &xk) in x.iter().enumerate() {
            if xk < x2 {
                assert_eq!(b[k], rise[k]);
            }
            if xk >= x1 {
                assert_eq!(b[k], fall[k]);
            }
            if xk >= x1 && xk <= x2 {
                assert_eq!(b[k], 1.0);
            }
        }
    }

    #[test]
    fn test_bump_with_empty_plateau_and_custom_levels() {
        let x = grid(401, 0.0, 4.0);
        let b = bump(x.view(), 1.0, 2.0, 2.0, 3.0, -1.0, 2.0, 0.5).unwrap();
        assert_eq!(b[0], -1.0);
        assert_eq!(b[200], 2.0); // x == 2.0 exactly
        assert_eq!(b[400], 0.5);
        assert!(b.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_params_from_json_use_defaults() {
        let params: TransitionParams = serde_json::from_str(r#"{"x0": 0.2, "x1": 0.8}"#).unwrap();
        assert_eq!(params, TransitionParams::new(0.2, 0.8));

        let bump_params: BumpParams =
            serde_json::from_str(r#"{"x0": 0, "x1": 1, "x2": 2, "x3": 3, "y12": 4}"#).unwrap();
        assert_eq!(bump_params.y0, 0.0);
        assert_eq!(bump_params.y12, 4.0);
        assert_eq!(bump_params.y3, 0.0);

        let x = grid(31, 0.0, 3.0);
        let via_params = bump_params.apply(x.view()).unwrap();
        let direct = bump(x.view(), 0.0, 1.0, 2.0, 3.0, 0.0, 4.0, 0.0).unwrap();
        assert_eq!(via_params, direct);
    }

    #[test]
    fn test_invalid_arguments_are_rejected() {
        let x = grid(11, 0.0, 1.0);
        let err = |r: Result<TransitionOutput<f64>, SmoothpackError>| {
            matches!(r, Err(SmoothpackError::InvalidArgument(_)))
        };

        // Boundaries never crossed by the grid.
        assert!(err(transition(x.view(), 0.2, 1.5, 0.0, 1.0)));
        assert!(err(transition(x.view(), 1.0, 2.0, 0.0, 1.0)));
        // Reversed or degenerate boundaries.
        assert!(err(transition(x.view(), 0.8, 0.2, 0.0, 1.0)));
        assert!(err(transition(x.view(), 0.5, 0.5, 0.0, 1.0)));
        assert!(err(transition(x.view(), f64::NAN, 0.5, 0.0, 1.0)));
        // Non-monotonic grid.
        let bad = array![0.0f64, 0.6, 0.3, 1.0];
        assert!(err(transition(bad.view(), 0.1, 0.9, 0.0, 1.0)));
        // Mis-ordered bump.
        assert!(matches!(
            bump(x.view(), 0.1, 0.5, 0.4, 0.9, 0.0, 1.0, 0.0),
            Err(SmoothpackError::InvalidArgument(_))
        ));
        assert!(transition_derivative(x.view(), 0.2, 1.5, 0.0, 1.0).is_err());
    }
}
