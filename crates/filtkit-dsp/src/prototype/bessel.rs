use std::f64::consts::FRAC_1_SQRT_2;

use filtkit_spec::BesselNorm;

use super::split_conjugate_roots;
use crate::error::{DspError, DspResult};
use crate::layout::{AnalogLayout, Complex, Normalization, INFINITY};
use crate::numeric::roots;

/// Secant iteration limits for the -3 dB search.
const MAG_START: f64 = 1.5;
const MAG_TOL: f64 = 1.48e-8;
const MAG_MAX_ITER: usize = 50;

/// Coefficients `a_0..=a_N` of the reverse Bessel polynomial
/// `θ_N(s) = Σ a_k s^k`, with `a_k = (2N-k)! / (2^(N-k) k! (N-k)!)`.
pub(super) fn reverse_bessel_coefficients(order: u32) -> Vec<f64> {
    let n = order as usize;
    let mut a = vec![0.0; n + 1];
    a[n] = 1.0;
    for k in (1..=n).rev() {
        let (kf, nf) = (k as f64, n as f64);
        a[k - 1] = a[k] * (2.0 * nf - kf + 1.0) * kf / (2.0 * (nf - kf + 1.0));
    }
    a
}

/// Maximally flat delay prototype: poles are the roots of the reverse
/// Bessel polynomial, rescaled for the chosen normalization.
pub(super) fn design(order: u32, norm: BesselNorm) -> DspResult<AnalogLayout> {
    let coeffs = reverse_bessel_coefficients(order);
    let a0 = coeffs[0];
    let highest_first: Vec<f64> = coeffs.iter().rev().copied().collect();
    let (upper, real) = split_conjugate_roots(roots(&highest_first)?);

    let scale = match norm {
        BesselNorm::Phase => 10f64.powf(-a0.log10() / order as f64),
        BesselNorm::Delay => 1.0,
        BesselNorm::Mag => 1.0 / mag_norm_factor(&upper, real, a0)?,
    };

    let mut layout = AnalogLayout::new(Normalization::dc(1.0));
    for pole in upper {
        layout.push_conjugate(pole * scale, INFINITY);
    }
    if let Some(re) = real {
        layout.push_single(Complex::new(re * scale, 0.0), INFINITY);
    }
    Ok(layout)
}

/// Frequency at which the delay-normalized filter falls to `1/√2`,
/// found by secant iteration from `ω = 1.5`.
fn mag_norm_factor(upper: &[Complex], real: Option<f64>, a0: f64) -> DspResult<f64> {
    let response = |w: f64| {
        let jw = Complex::new(0.0, w);
        let mut den = upper
            .iter()
            .fold(Complex::new(1.0, 0.0), |acc, &p| acc * (jw - p) * (jw - p.conj()));
        if let Some(re) = real {
            den *= jw - re;
        }
        (a0 / den).norm() - FRAC_1_SQRT_2
    };

    let mut p0 = MAG_START;
    let mut p1 = MAG_START * (1.0 + 1e-4) + 1e-4;
    let mut q0 = response(p0);
    let mut q1 = response(p1);
    for _ in 0..MAG_MAX_ITER {
        if q1 == q0 {
            break;
        }
        let p = p1 - q1 * (p1 - p0) / (q1 - q0);
        if (p - p1).abs() < MAG_TOL {
            return Ok(p);
        }
        p0 = p1;
        q0 = q1;
        p1 = p;
        q1 = response(p1);
    }
    Err(DspError::numeric(
        "Bessel magnitude normalization did not converge",
    ))
}
