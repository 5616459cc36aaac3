//! Bilinear discretization into a cascade of second-order sections.

use std::f64::consts::PI;

use log::trace;

use crate::error::{DspError, DspResult};
use crate::layout::{is_infinite, Complex, DigitalLayout, PoleZeroPair};

/// Maps an s-plane root to the z-plane: `z = (2 + s) / (2 - s)`.
///
/// Roots at infinity map to `z = -1` (Nyquist).
pub fn bilinear(s: Complex) -> Complex {
    if is_infinite(s) {
        Complex::new(-1.0, 0.0)
    } else {
        (2.0 + s) / (2.0 - s)
    }
}

/// One second-order section `(b0 + b1 z⁻¹ + b2 z⁻²) / (1 + a1 z⁻¹ + a2 z⁻²)`.
///
/// Coefficients are stored normalized so that `a0 == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Biquad {
    /// Creates a section from raw coefficients, dividing through by `a0`.
    pub fn new(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> DspResult<Self> {
        let coeffs = [b0, b1, b2, a0, a1, a2];
        if coeffs.iter().any(|c| !c.is_finite()) {
            return Err(DspError::invalid_param(
                "sos",
                format!("section coefficients must be finite, got {:?}", coeffs),
            ));
        }
        if a0 == 0.0 {
            return Err(DspError::invalid_param("sos", "a0 must be non-zero"));
        }
        Ok(Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        })
    }

    /// Discretizes one pole/zero section with the bilinear transform.
    ///
    /// First-order sections become `b2 = a2 = 0`.
    pub fn from_pair(pair: &PoleZeroPair) -> Self {
        if pair.is_single_pole() {
            let p = bilinear(pair.poles.first);
            let z = bilinear(pair.zeros.first);
            return Self {
                b0: 1.0,
                b1: -z.re,
                b2: 0.0,
                a1: -p.re,
                a2: 0.0,
            };
        }
        let (p1, p2) = (bilinear(pair.poles.first), bilinear(pair.poles.second));
        let (z1, z2) = (bilinear(pair.zeros.first), bilinear(pair.zeros.second));
        Self {
            b0: 1.0,
            b1: -(z1 + z2).re,
            b2: (z1 * z2).re,
            a1: -(p1 + p2).re,
            a2: (p1 * p2).re,
        }
    }

    /// Numerator coefficients `[b0, b1, b2]`.
    pub fn b_coefficients(&self) -> [f64; 3] {
        [self.b0, self.b1, self.b2]
    }

    /// Denominator coefficients `[a0, a1, a2]` (with `a0 == 1`).
    pub fn a_coefficients(&self) -> [f64; 3] {
        [1.0, self.a1, self.a2]
    }

    /// `b0`
    pub fn b0(&self) -> f64 {
        self.b0
    }

    /// `b1`
    pub fn b1(&self) -> f64 {
        self.b1
    }

    /// `b2`
    pub fn b2(&self) -> f64 {
        self.b2
    }

    /// `a1`
    pub fn a1(&self) -> f64 {
        self.a1
    }

    /// `a2`
    pub fn a2(&self) -> f64 {
        self.a2
    }

    /// Row `[b0, b1, b2, a0, a1, a2]` of an SOS matrix.
    pub fn as_sos(&self) -> [f64; 6] {
        [self.b0, self.b1, self.b2, 1.0, self.a1, self.a2]
    }

    /// Returns true for a first-order section.
    pub fn is_first_order(&self) -> bool {
        self.b2 == 0.0 && self.a2 == 0.0
    }

    /// Complex response at digital radian frequency `w`.
    pub fn response(&self, w: f64) -> Complex {
        let z1 = Complex::from_polar(1.0, -w);
        let z2 = z1 * z1;
        (self.b0 + self.b1 * z1 + self.b2 * z2) / (1.0 + self.a1 * z1 + self.a2 * z2)
    }

    /// `a0 + a1 + a2`, the denominator at DC.
    pub fn dc_denominator(&self) -> f64 {
        1.0 + self.a1 + self.a2
    }

    /// `(b0 + b1 + b2) / (a0 + a1 + a2)`.
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / self.dc_denominator()
    }

    /// Multiplies the numerator by `scale`.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            b0: self.b0 * scale,
            b1: self.b1 * scale,
            b2: self.b2 * scale,
            ..*self
        }
    }
}

/// An ordered cascade of biquads.
///
/// The overall gain is folded into the first section's numerator.
#[derive(Debug, Clone, PartialEq)]
pub struct Cascade {
    sections: Vec<Biquad>,
    gain: f64,
}

impl Cascade {
    /// Discretizes a digital layout and normalizes its gain so the
    /// magnitude at the layout's normalization frequency equals its target.
    pub fn from_layout(layout: &DigitalLayout) -> DspResult<Self> {
        if layout.is_empty() {
            return Err(DspError::invalid_param("layout", "layout has no sections"));
        }
        let mut sections: Vec<Biquad> = layout.pairs().iter().map(Biquad::from_pair).collect();

        let normal = layout.normal();
        let magnitude = sections
            .iter()
            .fold(Complex::new(1.0, 0.0), |acc, s| acc * s.response(normal.w))
            .norm();
        if !(magnitude.is_finite() && magnitude > 0.0) {
            return Err(DspError::numeric(format!(
                "cascade magnitude {} at w = {} cannot be normalized",
                magnitude, normal.w
            )));
        }
        let gain = normal.gain / magnitude;
        sections[0] = sections[0].scaled(gain);

        for (i, s) in sections.iter().enumerate() {
            trace!("section {}: {:?}", i, s.as_sos());
        }
        Ok(Self { sections, gain })
    }

    /// Builds a cascade from SOS rows `[b0, b1, b2, a0, a1, a2]`.
    pub fn from_sos(sos: &[[f64; 6]]) -> DspResult<Self> {
        if sos.is_empty() {
            return Err(DspError::invalid_param("sos", "at least one section is required"));
        }
        let sections = sos
            .iter()
            .map(|r| Biquad::new(r[0], r[1], r[2], r[3], r[4], r[5]))
            .collect::<DspResult<Vec<_>>>()?;
        Ok(Self {
            sections,
            gain: 1.0,
        })
    }

    /// SOS matrix, one row per section.
    pub fn to_sos(&self) -> Vec<[f64; 6]> {
        self.sections.iter().map(Biquad::as_sos).collect()
    }

    /// The sections in order.
    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false for a constructed cascade.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Scale folded into the first section during normalization.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Complex response at digital radian frequency `w` in `[0, π]`.
    pub fn response(&self, w: f64) -> Complex {
        self.sections
            .iter()
            .fold(Complex::new(1.0, 0.0), |acc, s| acc * s.response(w))
    }

    /// Magnitude in dB at `freq` Hz for a signal sampled at `sample_rate` Hz.
    pub fn magnitude_db(&self, freq: f64, sample_rate: f64) -> f64 {
        20.0 * self.response(2.0 * PI * freq / sample_rate).norm().log10()
    }

    /// Product of the section DC gains.
    pub fn dc_gain(&self) -> f64 {
        self.sections.iter().map(Biquad::dc_gain).product()
    }
}
