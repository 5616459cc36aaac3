//! Complete elliptic integrals, Jacobi elliptic functions, the degree
//! equation, and inverse Jacobi functions.
//!
//! All functions use the parameter convention `m = k²`.

use std::f64::consts::{FRAC_PI_2, PI};

use num_complex::Complex64;

use crate::error::{DspError, DspResult};
use crate::tolerances::{Tolerances, MACHEP};

/// Below this parameter the Jacobi functions use the circular expansion.
const SMALL_M: f64 = 1e-9;

/// Above this parameter the Jacobi functions use the hyperbolic expansion.
const NEAR_ONE_M: f64 = 0.999_999_999_9;

/// Arithmetic-geometric mean of `a` and `b`.
pub fn agm(a: f64, b: f64, tol: &Tolerances) -> f64 {
    let (mut a, mut b) = (a, b);
    for _ in 0..tol.agm_max_iter {
        if (a - b).abs() <= tol.agm * a {
            break;
        }
        let next_a = (a + b) / 2.0;
        b = (a * b).sqrt();
        a = next_a;
    }
    (a + b) / 2.0
}

/// Complete elliptic integral of the first kind, `K(m)`.
///
/// `K(0) = π/2` and `K(1) = +∞`. Returns NaN for `m > 1`.
pub fn ellipk(m: f64, tol: &Tolerances) -> f64 {
    if m == 1.0 {
        return f64::INFINITY;
    }
    if m > 1.0 || m.is_nan() {
        return f64::NAN;
    }
    PI / (2.0 * agm(1.0, (1.0 - m).sqrt(), tol))
}

/// `K(1 - p)`, accurate for small `p`.
pub fn ellipkm1(p: f64, tol: &Tolerances) -> f64 {
    if p == 0.0 {
        return f64::INFINITY;
    }
    if p < 0.0 || p.is_nan() {
        return f64::NAN;
    }
    PI / (2.0 * agm(1.0, p.sqrt(), tol))
}

/// Values of the Jacobi elliptic functions at one argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jacobi {
    /// sn(u|m)
    pub sn: f64,
    /// cn(u|m)
    pub cn: f64,
    /// dn(u|m)
    pub dn: f64,
    /// Amplitude φ, with sn = sin φ and cn = cos φ.
    pub ph: f64,
}

/// Jacobi elliptic functions sn, cn, dn and the amplitude of `u` with
/// parameter `m`, by AGM descent and back-substitution.
///
/// Returns NaN in every field for `m` outside `[0, 1]`.
pub fn ellipj(u: f64, m: f64, tol: &Tolerances) -> Jacobi {
    if !(0.0..=1.0).contains(&m) {
        return Jacobi {
            sn: f64::NAN,
            cn: f64::NAN,
            dn: f64::NAN,
            ph: f64::NAN,
        };
    }

    if m < SMALL_M {
        let t = u.sin();
        let b = u.cos();
        let ai = 0.25 * m * (u - t * b);
        return Jacobi {
            sn: t - ai * b,
            cn: b + ai * t,
            dn: 1.0 - 0.5 * m * t * t,
            ph: u - ai,
        };
    }

    if m >= NEAR_ONE_M {
        let mut ai = 0.25 * (1.0 - m);
        let b = u.cosh();
        let t = u.tanh();
        let phi = 1.0 / b;
        let twon = b * u.sinh();
        let sn = t + ai * (twon - u) / (b * b);
        let ph = 2.0 * u.exp().atan() - FRAC_PI_2 + ai * (twon - u) / b;
        ai *= t * phi;
        return Jacobi {
            sn,
            cn: phi - ai * (twon - u),
            dn: phi + ai * (twon + u),
            ph,
        };
    }

    let cap = tol.jacobi_max_descent;
    let mut a = vec![0.0; cap + 1];
    let mut c = vec![0.0; cap + 1];
    a[0] = 1.0;
    c[0] = m.sqrt();
    let mut b = (1.0 - m).sqrt();
    let mut twon = 1.0;
    let mut i = 0;

    while (c[i] / a[i]).abs() > MACHEP {
        if i >= cap {
            break;
        }
        let ai = a[i];
        i += 1;
        c[i] = (ai - b) / 2.0;
        let t = (ai * b).sqrt();
        a[i] = (ai + b) / 2.0;
        b = t;
        twon *= 2.0;
    }

    let mut phi = twon * a[i] * u;
    let mut prev = phi;
    while i > 0 {
        let t = c[i] * phi.sin() / a[i];
        prev = phi;
        phi = (t.asin() + phi) / 2.0;
        i -= 1;
    }

    let sn = phi.sin();
    let cn = phi.cos();
    Jacobi {
        sn,
        cn,
        dn: cn / (phi - prev).cos(),
        ph: phi,
    }
}

/// Solves the degree equation for the modulus `m` of an order-`n` elliptic
/// filter whose selectivity parameter is `m1`, using the nome series.
pub fn ellipdeg(n: u32, m1: f64, tol: &Tolerances) -> f64 {
    let k1 = ellipk(m1, tol);
    let k1p = ellipkm1(m1, tol);
    let q1 = (-PI * k1p / k1).exp();
    let q = q1.powf(1.0 / n as f64);

    let terms = tol.degree_terms as i32;
    let num: f64 = (0..=terms).map(|k| q.powi(k * (k + 1))).sum();
    let den = 1.0 + 2.0 * (1..=terms + 1).map(|k| q.powi(k * k)).sum::<f64>();

    16.0 * q * (num / den).powi(4)
}

/// Inverse Jacobi `sn` for complex argument, by the Landen transformation.
///
/// Fails if the descending modulus sequence does not reach zero within the
/// configured iteration cap.
pub fn arc_jac_sn(w: Complex64, m: f64, tol: &Tolerances) -> DspResult<Complex64> {
    let k = m.sqrt();
    if k == 1.0 {
        return Ok(w.atanh());
    }

    let mut ks = vec![k];
    let mut iterations = 0;
    while let Some(&last) = ks.last() {
        if last == 0.0 {
            break;
        }
        let kp = ((1.0 - last) * (1.0 + last)).sqrt();
        ks.push((1.0 - kp) / (1.0 + kp));
        iterations += 1;
        if iterations > tol.landen_max_iter {
            return Err(DspError::numeric(format!(
                "Landen transformation did not converge for m = {}",
                m
            )));
        }
    }

    let big_k = ks[1..].iter().fold(FRAC_PI_2, |acc, &x| acc * (1.0 + x));

    let mut wn = w;
    for pair in ks.windows(2) {
        let (kn, knext) = (pair[0], pair[1]);
        let root = ((1.0 - kn * wn) * (1.0 + kn * wn)).sqrt();
        wn = 2.0 * wn / ((1.0 + knext) * (1.0 + root));
    }

    Ok(big_k * (2.0 / PI) * wn.asin())
}

/// Real inverse Jacobi `sc` with complementary parameter: the real `u`
/// solving `w = sc(u | 1 - m)`.
pub fn arc_jac_sc1(w: f64, m: f64, tol: &Tolerances) -> DspResult<f64> {
    let z = arc_jac_sn(Complex64::new(0.0, w), m, tol)?;
    if z.re.abs() > tol.arc_sc1_real {
        return Err(DspError::numeric(format!(
            "arc_jac_sc1 produced a complex result (real part {:e})",
            z.re
        )));
    }
    Ok(z.im)
}
