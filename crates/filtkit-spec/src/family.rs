//! Filter family types.

use serde::{Deserialize, Serialize};

/// Pole normalization used for Bessel designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BesselNorm {
    /// Phase-matched: half the maximum phase shift at the cutoff, with the
    /// same high-frequency asymptote as a Butterworth filter.
    #[default]
    Phase,
    /// Unit group delay at DC.
    Delay,
    /// -3 dB magnitude at the cutoff.
    Mag,
}

impl BesselNorm {
    /// Returns the normalization name as used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            BesselNorm::Phase => "phase",
            BesselNorm::Delay => "delay",
            BesselNorm::Mag => "mag",
        }
    }
}

/// Classical analog filter family with its family-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Family {
    /// Maximally flat passband.
    Butterworth,
    /// Equiripple passband, monotonic stopband.
    #[serde(rename = "chebyshev1")]
    ChebyshevI {
        /// Peak-to-peak passband ripple in dB.
        ripple_db: f64,
    },
    /// Monotonic passband, equiripple stopband.
    #[serde(rename = "chebyshev2")]
    ChebyshevII {
        /// Minimum stopband attenuation in dB.
        stopband_db: f64,
    },
    /// Equiripple passband and stopband (Cauer).
    Elliptic {
        /// Peak-to-peak passband ripple in dB.
        ripple_db: f64,
        /// Minimum stopband attenuation in dB.
        stopband_db: f64,
    },
    /// Maximally flat group delay.
    Bessel {
        /// Pole normalization.
        #[serde(default)]
        norm: BesselNorm,
    },
}

impl Family {
    /// Creates a Chebyshev Type I family.
    pub fn chebyshev1(ripple_db: f64) -> Self {
        Family::ChebyshevI { ripple_db }
    }

    /// Creates a Chebyshev Type II family.
    pub fn chebyshev2(stopband_db: f64) -> Self {
        Family::ChebyshevII { stopband_db }
    }

    /// Creates an elliptic family.
    pub fn elliptic(ripple_db: f64, stopband_db: f64) -> Self {
        Family::Elliptic {
            ripple_db,
            stopband_db,
        }
    }

    /// Creates a phase-normalized Bessel family.
    pub fn bessel() -> Self {
        Family::Bessel {
            norm: BesselNorm::Phase,
        }
    }

    /// Returns the family name as used in JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Family::Butterworth => "butterworth",
            Family::ChebyshevI { .. } => "chebyshev1",
            Family::ChebyshevII { .. } => "chebyshev2",
            Family::Elliptic { .. } => "elliptic",
            Family::Bessel { .. } => "bessel",
        }
    }

    /// Passband ripple in dB, if this family has one.
    pub fn ripple_db(&self) -> Option<f64> {
        match *self {
            Family::ChebyshevI { ripple_db } | Family::Elliptic { ripple_db, .. } => {
                Some(ripple_db)
            }
            _ => None,
        }
    }

    /// Stopband attenuation in dB, if this family has one.
    pub fn stopband_db(&self) -> Option<f64> {
        match *self {
            Family::ChebyshevII { stopband_db } | Family::Elliptic { stopband_db, .. } => {
                Some(stopband_db)
            }
            _ => None,
        }
    }
}
