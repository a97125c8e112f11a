//! Smoothly damping a sampled signal to a constant.
//!
//! Conceptually the output is the integral of `f' * w`, where `w` falls smoothly
//! from 1 to 0 over `(t1, t2)`. Integrating by parts removes the need for `f'`:
//!
//! ```text
//! f_out = f * w - integral_{t1}^{t} f * w' dt
//! ```
//!
//! and `w'` is non-zero only inside the transition, so one numerical integration
//! over that region is enough. The final constant depends on `f` inside
//! `(t1, t2)` and on the exact choice of `t1` and `t2`.

use ndarray::{s, Array1, ArrayView1, Zip};

use crate::error::SmoothpackError;
use crate::kernels::integrate::{CumulativeTrapezoid, IndefiniteIntegral};
use crate::kernels::window::{transition, transition_derivative, TransitionOutput};
use crate::traits::WindowFloat;

/// Returns a copy of `f` that equals `f` for `t <= t1`, transitions smoothly over
/// `(t1, t2)`, and is exactly constant for `t >= t2`.
///
/// # Errors
/// `InvalidArgument` if `f` and `t` differ in length, plus every precondition of
/// [`transition`] on `(t, t1, t2)`. Errors from `integrator` are propagated.
pub fn transition_to_constant<F, I>(
    f: ArrayView1<'_, F>,
    t: ArrayView1<'_, F>,
    t1: F,
    t2: F,
    integrator: &I,
) -> Result<Array1<F>, SmoothpackError>
where
    F: WindowFloat,
    I: IndefiniteIntegral<F> + ?Sized,
{
    if f.len() != t.len() {
        return Err(SmoothpackError::InvalidArgument(format!(
            "f and t must have the same length (got {} and {})",
            f.len(),
            t.len()
        )));
    }

    let TransitionOutput { values: window, i0: i1, i1: i2 } =
        transition(t, t1, t2, F::one(), F::zero())?;
    let window_dot = transition_derivative(t, t1, t2, F::one(), F::zero())?;

    let mut out = &f * &window;

    if i2 > i1 {
        let mut integrand = Array1::zeros(i2 - i1);
        Zip::from(&mut integrand)
            .and(f.slice(s![i1..i2]))
            .and(window_dot.slice(s![i1..i2]))
            .for_each(|g, &fk, &wk| *g = fk * wk);

        let correction = integrator.indefinite_integral(integrand.view(), t.slice(s![i1..i2]))?;
        if correction.len() != i2 - i1 {
            return Err(SmoothpackError::InvalidArgument(format!(
                "integrator returned {} samples for a region of {}",
                correction.len(),
                i2 - i1
            )));
        }
        Zip::from(out.slice_mut(s![i1..i2]))
            .and(&correction)
            .for_each(|o, &c| *o = *o - c);
    }

    // Hold the last transitioned value. When i2 == 0 the window is already zero
    // everywhere, so the output is zero too.
    if i2 > 0 {
        let last = out[i2 - 1];
        out.slice_mut(s![i2..]).fill(last);
    }

    log::debug!(
        "transition_to_constant: n={} region=[{}, {}) final={:?}",
        t.len(),
        i1,
        i2,
        out.last()
    );
    Ok(out)
}

/// [`transition_to_constant`] with the built-in cumulative trapezoid integrator.
pub fn transition_to_constant_trapezoid<F>(
    f: ArrayView1<'_, F>,
    t: ArrayView1<'_, F>,
    t1: F,
    t2: F,
) -> Result<Array1<F>, SmoothpackError>
where
    F: WindowFloat,
{
    transition_to_constant(f, t, t1, t2, &CumulativeTrapezoid)
}
