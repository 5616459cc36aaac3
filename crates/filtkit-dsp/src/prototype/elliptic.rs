use crate::elliptic::{arc_jac_sc1, ellipdeg, ellipj, ellipk};
use crate::error::{DspError, DspResult};
use crate::layout::{AnalogLayout, Complex, Normalization, INFINITY};
use crate::tolerances::Tolerances;

/// Cauer prototype: equiripple passband and stopband.
///
/// The modulus `m` comes from the degree equation for the selectivity
/// `m1 = ε_pass² / ε_stop²`. Zeros sit at `j / (√m · sn(jK/N))` and poles
/// are placed by `sn/cn/dn` at `v0` with the complementary modulus.
pub(super) fn design(
    order: u32,
    ripple_db: f64,
    stopband_db: f64,
    tol: &Tolerances,
) -> DspResult<AnalogLayout> {
    let eps_sq = 10f64.powf(ripple_db / 10.0) - 1.0;

    if order == 1 {
        let mut layout = AnalogLayout::new(Normalization::dc(1.0));
        layout.push_single(Complex::new(-(1.0 / eps_sq).sqrt(), 0.0), INFINITY);
        return Ok(layout);
    }

    let eps = eps_sq.sqrt();
    let ck1_sq = eps_sq / (10f64.powf(stopband_db / 10.0) - 1.0);
    if !(ck1_sq > 0.0 && ck1_sq < 1.0) {
        return Err(DspError::numeric(format!(
            "elliptic selectivity {} is outside (0, 1)",
            ck1_sq
        )));
    }

    let val = ellipk(ck1_sq, tol);
    let m = ellipdeg(order, ck1_sq, tol);
    let capk = ellipk(m, tol);
    if !capk.is_finite() || !m.is_finite() {
        return Err(DspError::numeric(format!(
            "elliptic modulus {} does not give a finite K",
            m
        )));
    }

    let r = arc_jac_sc1(1.0 / eps, ck1_sq, tol)?;
    let v0 = capk * r / (order as f64 * val);
    let comp = ellipj(v0, 1.0 - m, tol);
    let (sv, cv, dv) = (comp.sn, comp.cn, comp.dn);

    let gain = if order % 2 == 1 {
        1.0
    } else {
        1.0 / (1.0 + eps_sq).sqrt()
    };
    let mut layout = AnalogLayout::new(Normalization::dc(gain));

    let n = order as f64;
    let start = 1 - order % 2;
    for j in (start..order).step_by(2) {
        let jac = ellipj(j as f64 * capk / n, m, tol);
        let (s, c, d) = (jac.sn, jac.cn, jac.dn);

        let denom = 1.0 - (d * sv).powi(2);
        let pole = -Complex::new(c * d * sv * cv, s * dv) / denom;
        let zero = if s.abs() > tol.real_root {
            Complex::new(0.0, 1.0 / (m.sqrt() * s))
        } else {
            INFINITY
        };

        if pole.im.abs() <= tol.real_root * pole.norm() {
            layout.push_single(Complex::new(pole.re, 0.0), zero);
        } else {
            layout.push_conjugate(pole, zero);
        }
    }

    if !layout.pairs().iter().all(|p| p.poles.first.re.is_finite()) {
        return Err(DspError::numeric("elliptic pole placement produced non-finite poles"));
    }
    Ok(layout)
}
