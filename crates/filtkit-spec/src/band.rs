//! Response shape (band) types.

use serde::{Deserialize, Serialize};

/// The response shape of a digital filter, with frequencies in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Band {
    /// Low-pass filter.
    Lowpass {
        /// Cutoff frequency in Hz.
        cutoff: f64,
    },
    /// High-pass filter.
    Highpass {
        /// Cutoff frequency in Hz.
        cutoff: f64,
    },
    /// Band-pass filter.
    Bandpass {
        /// Center frequency in Hz.
        center: f64,
        /// Bandwidth in Hz.
        width: f64,
    },
    /// Band-stop filter.
    Bandstop {
        /// Center frequency in Hz.
        center: f64,
        /// Bandwidth in Hz.
        width: f64,
    },
}

/// Band kind without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandKind {
    /// Low-pass.
    Lowpass,
    /// High-pass.
    Highpass,
    /// Band-pass.
    Bandpass,
    /// Band-stop.
    Bandstop,
}

impl BandKind {
    /// Returns true for band-pass and band-stop.
    pub fn is_band(&self) -> bool {
        matches!(self, BandKind::Bandpass | BandKind::Bandstop)
    }

    /// Lowercase name, matching the serialized tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            BandKind::Lowpass => "lowpass",
            BandKind::Highpass => "highpass",
            BandKind::Bandpass => "bandpass",
            BandKind::Bandstop => "bandstop",
        }
    }
}

impl std::fmt::Display for BandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Band {
    /// Creates a low-pass band.
    pub fn lowpass(cutoff: f64) -> Self {
        Band::Lowpass { cutoff }
    }

    /// Creates a high-pass band.
    pub fn highpass(cutoff: f64) -> Self {
        Band::Highpass { cutoff }
    }

    /// Creates a band-pass band from center and width.
    pub fn bandpass(center: f64, width: f64) -> Self {
        Band::Bandpass { center, width }
    }

    /// Creates a band-stop band from center and width.
    pub fn bandstop(center: f64, width: f64) -> Self {
        Band::Bandstop { center, width }
    }

    /// Creates a band-pass band from its lower and upper edges.
    pub fn bandpass_edges(low: f64, high: f64) -> Self {
        Band::Bandpass {
            center: (low + high) / 2.0,
            width: high - low,
        }
    }

    /// Creates a band-stop band from its lower and upper edges.
    pub fn bandstop_edges(low: f64, high: f64) -> Self {
        Band::Bandstop {
            center: (low + high) / 2.0,
            width: high - low,
        }
    }

    /// Returns the band kind.
    pub fn kind(&self) -> BandKind {
        match self {
            Band::Lowpass { .. } => BandKind::Lowpass,
            Band::Highpass { .. } => BandKind::Highpass,
            Band::Bandpass { .. } => BandKind::Bandpass,
            Band::Bandstop { .. } => BandKind::Bandstop,
        }
    }

    /// Returns the `(low, high)` edges in Hz for band-pass and band-stop.
    pub fn edges(&self) -> Option<(f64, f64)> {
        match *self {
            Band::Bandpass { center, width } | Band::Bandstop { center, width } => {
                Some((center - width / 2.0, center + width / 2.0))
            }
            _ => None,
        }
    }

    /// Returns every critical frequency in Hz (one cutoff, or two edges).
    pub fn critical_frequencies(&self) -> Vec<f64> {
        match *self {
            Band::Lowpass { cutoff } | Band::Highpass { cutoff } => vec![cutoff],
            _ => match self.edges() {
                Some((low, high)) => vec![low, high],
                None => Vec::new(),
            },
        }
    }
}
