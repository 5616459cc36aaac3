//! Polynomial root finding (Aberth–Ehrlich with Newton polishing).

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::error::{DspError, DspResult};

/// Iteration cap for the simultaneous Aberth update.
const ABERTH_MAX_ITER: usize = 500;

/// Newton steps applied to each root after Aberth converges.
const POLISH_STEPS: usize = 3;

/// Angular offset of the initial guesses, avoiding symmetric starts.
const START_ANGLE: f64 = 0.4;

/// Evaluates `p(x)` and `p'(x)` by Horner's rule. `coeffs` is highest degree first.
pub fn horner(coeffs: &[Complex64], x: Complex64) -> (Complex64, Complex64) {
    let mut p = Complex64::new(0.0, 0.0);
    let mut dp = Complex64::new(0.0, 0.0);
    for &c in coeffs {
        dp = dp * x + p;
        p = p * x + c;
    }
    (p, dp)
}

/// Finds every complex root of a real polynomial.
///
/// `coeffs` is ordered highest degree first and must have a non-zero
/// leading coefficient.
pub fn roots(coeffs: &[f64]) -> DspResult<Vec<Complex64>> {
    let Some(&lead) = coeffs.first() else {
        return Err(DspError::invalid_param("coeffs", "polynomial has no coefficients"));
    };
    if lead == 0.0 || !lead.is_finite() {
        return Err(DspError::invalid_param(
            "coeffs",
            format!("leading coefficient must be finite and non-zero, got {}", lead),
        ));
    }
    let n = coeffs.len() - 1;
    if n == 0 {
        return Ok(Vec::new());
    }

    let monic: Vec<Complex64> = coeffs
        .iter()
        .map(|&c| Complex64::new(c / lead, 0.0))
        .collect();

    let radius = monic[n].norm().powf(1.0 / n as f64);
    let mut z: Vec<Complex64> = (0..n)
        .map(|k| Complex64::from_polar(radius, 2.0 * PI * k as f64 / n as f64 + START_ANGLE))
        .collect();

    let threshold = 1e-15 * radius.max(1.0);
    for _ in 0..ABERTH_MAX_ITER {
        let mut max_step = 0.0f64;
        for i in 0..n {
            let (p, dp) = horner(&monic, z[i]);
            if p == Complex64::new(0.0, 0.0) {
                continue;
            }
            let ratio = p / dp;
            let repulsion: Complex64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| (z[i] - z[j]).inv())
                .sum();
            let step = ratio / (1.0 - ratio * repulsion);
            z[i] -= step;
            max_step = max_step.max(step.norm());
        }
        if max_step < threshold {
            break;
        }
    }

    for root in z.iter_mut() {
        for _ in 0..POLISH_STEPS {
            let (p, dp) = horner(&monic, *root);
            if dp.norm() == 0.0 {
                break;
            }
            *root -= p / dp;
        }
    }

    if z.iter().any(|r| !r.re.is_finite() || !r.im.is_finite()) {
        return Err(DspError::numeric("polynomial root finder diverged"));
    }
    Ok(z)
}
