//! Error types for filter design and filtering.

use filtkit_spec::{CodedError, ValidationError};
use thiserror::Error;

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;

/// Errors that can occur while designing or applying a filter.
#[derive(Debug, Error)]
pub enum DspError {
    /// Filter order outside the supported range.
    #[error("invalid filter order: {order}")]
    InvalidOrder {
        /// The rejected order.
        order: u32,
    },

    /// Ripple or attenuation not positive.
    #[error("invalid {name}: {value} dB (must be positive)")]
    InvalidDecibels {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Normalized frequency outside (0, 0.5).
    #[error("invalid normalized frequency {value} for {name}: must be in (0, 0.5)")]
    InvalidFrequency {
        /// Parameter name.
        name: &'static str,
        /// The rejected normalized frequency.
        value: f64,
    },

    /// Sample rate not positive or not finite.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The rejected sample rate.
        rate: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Zero-length input signal.
    #[error("input signal is empty")]
    EmptySignal,

    /// Two arrays that must agree in length do not.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Filter spec failed validation.
    #[error("filter spec is invalid: {}", format_errors(.errors))]
    Validation {
        /// Every validation error found.
        errors: Vec<ValidationError>,
    },

    /// Numeric degeneracy (singular system, vanishing denominator).
    #[error("numeric failure: {message}")]
    Numeric {
        /// Error message.
        message: String,
    },
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl DspError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a numeric failure.
    pub fn numeric(message: impl Into<String>) -> Self {
        Self::Numeric {
            message: message.into(),
        }
    }

    /// Returns true for failures raised by the numeric pipeline rather than
    /// by parameter checks.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DspError::Numeric { .. })
    }
}

impl CodedError for DspError {
    fn code(&self) -> &'static str {
        match self {
            DspError::InvalidOrder { .. } => "DSP_001",
            DspError::InvalidDecibels { .. } => "DSP_002",
            DspError::InvalidFrequency { .. } => "DSP_003",
            DspError::InvalidSampleRate { .. } => "DSP_004",
            DspError::InvalidParameter { .. } => "DSP_005",
            DspError::EmptySignal => "DSP_006",
            DspError::LengthMismatch { .. } => "DSP_007",
            DspError::Validation { .. } => "DSP_008",
            DspError::Numeric { .. } => "DSP_009",
        }
    }

    fn category(&self) -> &'static str {
        if self.is_numeric() {
            "numeric"
        } else {
            "config"
        }
    }
}
