//! Normalized analog low-pass prototypes.
//!
//! Each family produces an [`AnalogLayout`] with unit cutoff: conjugate
//! pole/zero sections, an optional real first-order section for odd
//! orders, and the DC gain the finished filter must have.

mod bessel;
mod butterworth;
mod chebyshev;
mod elliptic;


use std::f64::consts::PI;

use filtkit_spec::{BesselNorm, Family, MAX_ORDER};

use crate::error::{DspError, DspResult};
use crate::layout::{AnalogLayout, Complex};
use crate::steady_state::SeedMethod;
use crate::tolerances::Tolerances;

/// An analog prototype family with its design parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalogPrototype {
    /// Maximally flat magnitude.
    Butterworth,
    /// Passband ripple of `ripple_db`.
    ChebyshevI {
        /// Passband ripple in dB.
        ripple_db: f64,
    },
    /// Stopband floor of `stopband_db`.
    ChebyshevII {
        /// Stopband attenuation in dB.
        stopband_db: f64,
    },
    /// Equiripple in both bands.
    Elliptic {
        /// Passband ripple in dB.
        ripple_db: f64,
        /// Stopband attenuation in dB.
        stopband_db: f64,
    },
    /// Maximally flat group delay.
    Bessel {
        /// Pole normalization.
        norm: BesselNorm,
    },
}

impl From<&Family> for AnalogPrototype {
    fn from(family: &Family) -> Self {
        match *family {
            Family::Butterworth => AnalogPrototype::Butterworth,
            Family::ChebyshevI { ripple_db } => AnalogPrototype::ChebyshevI { ripple_db },
            Family::ChebyshevII { stopband_db } => AnalogPrototype::ChebyshevII { stopband_db },
            Family::Elliptic {
                ripple_db,
                stopband_db,
            } => AnalogPrototype::Elliptic {
                ripple_db,
                stopband_db,
            },
            Family::Bessel { norm } => AnalogPrototype::Bessel { norm },
        }
    }
}

impl AnalogPrototype {
    /// Designs the normalized prototype of the given order.
    ///
    /// Parameters are checked before any numeric work: `order` must be in
    /// `1..=MAX_ORDER`, ripple and attenuation must be positive, and an
    /// elliptic ripple must be below its attenuation.
    pub fn design(&self, order: u32, tol: &Tolerances) -> DspResult<AnalogLayout> {
        self.validate(order)?;
        let layout = match *self {
            AnalogPrototype::Butterworth => butterworth::design(order),
            AnalogPrototype::ChebyshevI { ripple_db } => chebyshev::design_type1(order, ripple_db),
            AnalogPrototype::ChebyshevII { stopband_db } => {
                chebyshev::design_type2(order, stopband_db)
            }
            AnalogPrototype::Elliptic {
                ripple_db,
                stopband_db,
            } => elliptic::design(order, ripple_db, stopband_db, tol)?,
            AnalogPrototype::Bessel { norm } => bessel::design(order, norm)?,
        };
        debug_assert_eq!(layout.num_poles(), order as usize);
        Ok(layout)
    }

    /// How filtfilt computes initial conditions for cascades of this family.
    pub fn seed_method(&self) -> SeedMethod {
        match self {
            AnalogPrototype::Bessel { .. } => SeedMethod::ClosedForm,
            _ => SeedMethod::LfilterZi,
        }
    }

    /// Family name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            AnalogPrototype::Butterworth => "butterworth",
            AnalogPrototype::ChebyshevI { .. } => "chebyshev1",
            AnalogPrototype::ChebyshevII { .. } => "chebyshev2",
            AnalogPrototype::Elliptic { .. } => "elliptic",
            AnalogPrototype::Bessel { .. } => "bessel",
        }
    }

    fn validate(&self, order: u32) -> DspResult<()> {
        if order == 0 || order > MAX_ORDER {
            return Err(DspError::InvalidOrder { order });
        }
        match *self {
            AnalogPrototype::ChebyshevI { ripple_db } => check_db("ripple_db", ripple_db),
            AnalogPrototype::ChebyshevII { stopband_db } => check_db("stopband_db", stopband_db),
            AnalogPrototype::Elliptic {
                ripple_db,
                stopband_db,
            } => {
                check_db("ripple_db", ripple_db)?;
                check_db("stopband_db", stopband_db)?;
                if ripple_db >= stopband_db {
                    return Err(DspError::invalid_param(
                        "ripple_db",
                        format!(
                            "must be smaller than stopband_db ({} >= {})",
                            ripple_db, stopband_db
                        ),
                    ));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn check_db(name: &'static str, value: f64) -> DspResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DspError::InvalidDecibels { name, value })
    }
}

/// Calls `section` once per conjugate pole pair with its angle
/// `θ_k = (2k+1)π/(2N)`, `k` in `0..N/2`.
fn for_each_angle(order: u32, mut section: impl FnMut(f64)) {
    let n = order as f64;
    for k in 0..order / 2 {
        section((2 * k + 1) as f64 * PI / (2.0 * n));
    }
}

/// Splits a conjugate-symmetric root set into section representatives:
/// the upper-half-plane roots, and the real root if there is one.
///
/// The real root's imaginary residue is discarded so conjugates match
/// exactly.
fn split_conjugate_roots(mut roots: Vec<Complex>) -> (Vec<Complex>, Option<f64>) {
    roots.sort_by(|a, b| b.im.total_cmp(&a.im));
    let half = roots.len() / 2;
    let upper = roots[..half].to_vec();
    let real = if roots.len() % 2 == 1 {
        Some(roots[half].re)
    } else {
        None
    };
    (upper, real)
}
