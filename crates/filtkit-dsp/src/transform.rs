//! Low-pass to low/high/band-pass/band-stop frequency transforms.
//!
//! Frequencies are normalized to the sample rate (`f / fs`, so Nyquist is
//! 0.5) and pre-warped with `w = 2·tan(π·f)`, matching a bilinear map with
//! unit sample period.

use std::f64::consts::PI;

use filtkit_spec::Band;

use crate::error::{DspError, DspResult};
use crate::layout::{
    is_infinite, AnalogLayout, Complex, ComplexPair, DigitalLayout, Normalization, PoleZeroPair,
    INFINITY,
};

/// A frequency transform with its normalized critical frequencies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrequencyTransform {
    /// Scale the prototype to `cutoff`.
    LowPass {
        /// Normalized cutoff.
        cutoff: f64,
    },
    /// Invert the prototype about `cutoff`.
    HighPass {
        /// Normalized cutoff.
        cutoff: f64,
    },
    /// Map each prototype root to two roots around the band center.
    BandPass {
        /// Normalized lower edge.
        low: f64,
        /// Normalized upper edge.
        high: f64,
    },
    /// Band-pass applied to the inverted prototype.
    BandStop {
        /// Normalized lower edge.
        low: f64,
        /// Normalized upper edge.
        high: f64,
    },
}

/// Pre-warps a normalized frequency: `2·tan(π·f)`.
pub fn prewarp(f: f64) -> f64 {
    2.0 * (PI * f).tan()
}

/// First root of `s² - 2c·s + wo² = 0`: `c + sqrt(c² - wo²)`.
pub fn solve_quadratic_1(c: Complex, wo: f64) -> Complex {
    c + (c * c - wo * wo).sqrt()
}

/// Second root of `s² - 2c·s + wo² = 0`: `c - sqrt(c² - wo²)`.
pub fn solve_quadratic_2(c: Complex, wo: f64) -> Complex {
    c - (c * c - wo * wo).sqrt()
}

fn check_normalized(name: &'static str, value: f64) -> DspResult<()> {
    if value.is_finite() && value > 0.0 && value < 0.5 {
        Ok(())
    } else {
        Err(DspError::InvalidFrequency { name, value })
    }
}

impl FrequencyTransform {
    /// Builds the transform for a band given in Hz.
    pub fn from_band(band: &Band, sample_rate: f64) -> DspResult<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(DspError::InvalidSampleRate { rate: sample_rate });
        }
        let transform = match *band {
            Band::Lowpass { cutoff } => FrequencyTransform::LowPass {
                cutoff: cutoff / sample_rate,
            },
            Band::Highpass { cutoff } => FrequencyTransform::HighPass {
                cutoff: cutoff / sample_rate,
            },
            Band::Bandpass { center, width } => FrequencyTransform::BandPass {
                low: (center - width / 2.0) / sample_rate,
                high: (center + width / 2.0) / sample_rate,
            },
            Band::Bandstop { center, width } => FrequencyTransform::BandStop {
                low: (center - width / 2.0) / sample_rate,
                high: (center + width / 2.0) / sample_rate,
            },
        };
        transform.validate()?;
        Ok(transform)
    }

    /// Checks that every critical frequency lies in `(0, 0.5)` and that
    /// band edges are ordered.
    pub fn validate(&self) -> DspResult<()> {
        match *self {
            FrequencyTransform::LowPass { cutoff } | FrequencyTransform::HighPass { cutoff } => {
                check_normalized("cutoff", cutoff)
            }
            FrequencyTransform::BandPass { low, high }
            | FrequencyTransform::BandStop { low, high } => {
                check_normalized("low", low)?;
                check_normalized("high", high)?;
                if low >= high {
                    return Err(DspError::invalid_param(
                        "band",
                        format!("lower edge {} must be below upper edge {}", low, high),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Maps an analog prototype to the target response shape.
    ///
    /// Low-pass and high-pass keep one section per prototype section;
    /// band-pass and band-stop split each conjugate section into two.
    pub fn apply(&self, analog: &AnalogLayout) -> DspResult<DigitalLayout> {
        self.validate()?;
        let gain = analog.normal().gain;
        let layout = match *self {
            FrequencyTransform::LowPass { cutoff } => lowpass(analog, prewarp(cutoff), gain),
            FrequencyTransform::HighPass { cutoff } => highpass(analog, prewarp(cutoff), gain),
            FrequencyTransform::BandPass { low, high } => {
                let (wo, bw) = band_geometry(low, high);
                let normal = Normalization {
                    w: 2.0 * (wo / 2.0).atan(),
                    gain,
                };
                band(analog, normal, |c| {
                    if is_infinite(c) {
                        (Complex::new(0.0, 0.0), INFINITY)
                    } else {
                        let c = c * (bw / 2.0);
                        (solve_quadratic_1(c, wo), solve_quadratic_2(c, wo))
                    }
                })
            }
            FrequencyTransform::BandStop { low, high } => {
                let (wo, bw) = band_geometry(low, high);
                band(analog, Normalization::dc(gain), |c| {
                    if is_infinite(c) {
                        (Complex::new(0.0, wo), Complex::new(0.0, -wo))
                    } else {
                        let c = (bw / 2.0) / c;
                        (solve_quadratic_1(c, wo), solve_quadratic_2(c, wo))
                    }
                })
            }
        };
        Ok(layout)
    }
}

/// Geometric center and width of pre-warped band edges.
fn band_geometry(low: f64, high: f64) -> (f64, f64) {
    let (w_low, w_high) = (prewarp(low), prewarp(high));
    ((w_low * w_high).sqrt(), w_high - w_low)
}

fn lowpass(analog: &AnalogLayout, wo: f64, gain: f64) -> DigitalLayout {
    let scale = |c: Complex| if is_infinite(c) { c } else { c * wo };
    let pairs = analog
        .pairs()
        .iter()
        .map(|p| {
            PoleZeroPair::new(
                ComplexPair::new(scale(p.poles.first), scale(p.poles.second)),
                ComplexPair::new(scale(p.zeros.first), scale(p.zeros.second)),
            )
        })
        .collect();
    DigitalLayout::new(pairs, Normalization::dc(gain))
}

fn highpass(analog: &AnalogLayout, wo: f64, gain: f64) -> DigitalLayout {
    let invert = |c: Complex| {
        if is_infinite(c) {
            Complex::new(0.0, 0.0)
        } else {
            wo / c
        }
    };
    let pairs = analog
        .pairs()
        .iter()
        .map(|p| {
            if p.is_single_pole() {
                PoleZeroPair::single(invert(p.poles.first), invert(p.zeros.first))
            } else {
                PoleZeroPair::new(
                    ComplexPair::new(invert(p.poles.first), invert(p.poles.second)),
                    ComplexPair::new(invert(p.zeros.first), invert(p.zeros.second)),
                )
            }
        })
        .collect();
    DigitalLayout::new(pairs, Normalization { w: PI, gain })
}

/// Shared band-pass/band-stop expansion: `map` sends one prototype root to
/// its two band roots.
fn band(
    analog: &AnalogLayout,
    normal: Normalization,
    map: impl Fn(Complex) -> (Complex, Complex),
) -> DigitalLayout {
    let mut pairs = Vec::with_capacity(analog.len() * 2);
    for p in analog.pairs() {
        let (pa, pb) = map(p.poles.first);
        let (za, zb) = map(p.zeros.first);
        if p.is_single_pole() {
            pairs.push(PoleZeroPair::new(
                ComplexPair::new(pa, pb),
                ComplexPair::new(za, zb),
            ));
        } else {
            pairs.push(PoleZeroPair::new(
                ComplexPair::conjugate(pa),
                ComplexPair::conjugate(za),
            ));
            pairs.push(PoleZeroPair::new(
                ComplexPair::conjugate(pb),
                ComplexPair::conjugate(zb),
            ));
        }
    }
    DigitalLayout::new(pairs, normal)
}
