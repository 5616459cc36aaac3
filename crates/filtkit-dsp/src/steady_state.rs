//! Steady-state initial conditions for cascades.
//!
//! Both methods return per-section delay states for a constant unit input;
//! callers scale them by the actual first sample.

use crate::cascade::{Biquad, Cascade};
use crate::error::{DspError, DspResult};
use crate::numeric::lu_solve;
use crate::runtime::{BiquadRuntime, Topology};
use crate::tolerances::Tolerances;

/// How initial conditions are computed for zero-phase filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMethod {
    /// Solve `(I - A) z = B` per transposed section, scaled by the DC gain
    /// of the preceding sections. Runs the cascade in DF-II transposed form.
    #[default]
    LfilterZi,
    /// Closed-form DF-II state `w = in / (1 + a1 + a2)` with `v1 = v2 = w`,
    /// propagated section to section by each section's DC gain.
    ClosedForm,
}

impl SeedMethod {
    /// The recurrence the seeded states are expressed in.
    pub fn topology(&self) -> Topology {
        match self {
            SeedMethod::LfilterZi => Topology::DirectForm2Transposed,
            SeedMethod::ClosedForm => Topology::DirectForm2,
        }
    }
}

fn check_dc_denominator(index: usize, biquad: &Biquad, tol: &Tolerances) -> DspResult<f64> {
    let den = biquad.dc_denominator();
    if den.abs() < tol.degeneracy || !den.is_finite() {
        return Err(DspError::numeric(format!(
            "section {} has a pole at DC (a0 + a1 + a2 = {:e})",
            index, den
        )));
    }
    Ok(den)
}

/// Transposed-form state of one section for a constant unit input.
///
/// Solves `[[1 + a1, -1], [a2, 1]] · z = [b1 - a1·b0, b2 - a2·b0]`.
pub fn lfilter_zi(biquad: &Biquad, tol: &Tolerances) -> DspResult<[f64; 2]> {
    let (b0, b1, b2) = (biquad.b0(), biquad.b1(), biquad.b2());
    let (a1, a2) = (biquad.a1(), biquad.a2());
    lu_solve(
        [[1.0 + a1, -1.0], [a2, 1.0]],
        [b1 - a1 * b0, b2 - a2 * b0],
        tol.degeneracy,
    )
}

/// Transposed-form states of a whole cascade for a constant unit input.
///
/// Each section's state is scaled by the product of the DC gains of the
/// sections before it.
pub fn sosfilt_zi(cascade: &Cascade, tol: &Tolerances) -> DspResult<Vec<[f64; 2]>> {
    let mut scale = 1.0;
    let mut states = Vec::with_capacity(cascade.len());
    for (i, section) in cascade.sections().iter().enumerate() {
        check_dc_denominator(i, section, tol)?;
        let zi = lfilter_zi(section, tol)?;
        states.push([scale * zi[0], scale * zi[1]]);
        scale *= section.dc_gain();
    }
    Ok(states)
}

/// Direct-form-II states of a whole cascade for a constant unit input.
pub fn closed_form_zi(cascade: &Cascade, tol: &Tolerances) -> DspResult<Vec<[f64; 2]>> {
    let mut input = 1.0;
    let mut states = Vec::with_capacity(cascade.len());
    for (i, section) in cascade.sections().iter().enumerate() {
        let den = check_dc_denominator(i, section, tol)?;
        let w = input / den;
        states.push([w, w]);
        input = (section.b0() + section.b1() + section.b2()) * w;
    }
    Ok(states)
}

/// Unit-input states for `method`.
pub fn unit_states(
    cascade: &Cascade,
    method: SeedMethod,
    tol: &Tolerances,
) -> DspResult<Vec<[f64; 2]>> {
    match method {
        SeedMethod::LfilterZi => sosfilt_zi(cascade, tol),
        SeedMethod::ClosedForm => closed_form_zi(cascade, tol),
    }
}

/// Runtimes seeded with `unit` states scaled by `x0`.
pub fn seeded_runtimes(
    cascade: &Cascade,
    method: SeedMethod,
    unit: &[[f64; 2]],
    x0: f64,
) -> Vec<BiquadRuntime> {
    let mut runtimes = BiquadRuntime::for_cascade(cascade, method.topology());
    for (rt, zi) in runtimes.iter_mut().zip(unit) {
        rt.seed(zi[0] * x0, zi[1] * x0);
    }
    runtimes
}
