//! Filter design request type.

use serde::{Deserialize, Serialize};

use crate::band::Band;
use crate::error::SpecError;
use crate::family::Family;

/// Highest supported filter order.
pub const MAX_ORDER: u32 = 24;

/// Orders above this still design, but with a precision warning.
pub const HIGH_ORDER_WARNING: u32 = 12;

/// A complete IIR filter design request.
///
/// Frequencies in [`Band`] are in Hz and are checked against the Nyquist
/// frequency `sample_rate / 2` during validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Filter family and its ripple/attenuation parameters.
    pub family: Family,
    /// Response shape and critical frequencies.
    pub band: Band,
    /// Prototype order (number of analog poles).
    pub order: u32,
    /// Sample rate in Hz.
    pub sample_rate: f64,
}

impl FilterSpec {
    /// Creates a new filter spec.
    pub fn new(family: Family, band: Band, order: u32, sample_rate: f64) -> Self {
        Self {
            family,
            band,
            order,
            sample_rate,
        }
    }

    /// Returns the Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Parses a spec from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the spec to compact JSON.
    pub fn to_json(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spec_json_roundtrip() {
        let spec = FilterSpec::new(
            Family::elliptic(1.0, 20.0),
            Band::lowpass(20.0),
            4,
            250.0,
        );
        let json = spec.to_json().unwrap();
        let parsed = FilterSpec::from_json(&json).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_spec_from_handwritten_json() {
        let json = r#"{
            "family": { "type": "chebyshev2", "stopband_db": 40 },
            "band": { "type": "bandpass", "center": 35, "width": 20 },
            "order": 2,
            "sample_rate": 250
        }"#;
        let spec = FilterSpec::from_json(json).unwrap();
        assert_eq!(spec.family, Family::chebyshev2(40.0));
        assert_eq!(spec.band.edges(), Some((25.0, 45.0)));
        assert_eq!(spec.nyquist(), 125.0);
    }

    #[test]
    fn test_spec_rejects_unknown_family() {
        let json = r#"{
            "family": { "type": "gaussian" },
            "band": { "type": "lowpass", "cutoff": 10 },
            "order": 2,
            "sample_rate": 100
        }"#;
        let err = FilterSpec::from_json(json).unwrap_err();
        assert!(matches!(err, SpecError::JsonParse(_)));
    }
}
