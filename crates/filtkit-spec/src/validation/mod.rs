//! Filter spec validation logic.

pub mod common;


use crate::band::Band;
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::family::Family;
use crate::spec::{FilterSpec, HIGH_ORDER_WARNING, MAX_ORDER};

pub use common::{validate_open_range, validate_order, validate_positive, CommonValidationError};

/// Critical frequencies above this fraction of Nyquist get a warning.
const NEAR_NYQUIST_FRACTION: f64 = 0.95;

/// Validates a filter spec and returns a validation result.
///
/// # Example
/// ```
/// use filtkit_spec::{Band, Family, FilterSpec};
/// use filtkit_spec::validation::validate_filter_spec;
///
/// let spec = FilterSpec::new(Family::Butterworth, Band::lowpass(20.0), 4, 250.0);
/// assert!(validate_filter_spec(&spec).is_ok());
///
/// let spec = FilterSpec::new(Family::Butterworth, Band::lowpass(200.0), 4, 250.0);
/// assert!(!validate_filter_spec(&spec).is_ok());
/// ```
pub fn validate_filter_spec(spec: &FilterSpec) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_spec_order(spec, &mut result);
    validate_family(&spec.family, &mut result);
    if validate_sample_rate(spec, &mut result) {
        validate_band(&spec.band, spec.nyquist(), &mut result);
    }

    result
}

fn validate_spec_order(spec: &FilterSpec, result: &mut ValidationResult) {
    if let Err(e) = validate_order(spec.order, MAX_ORDER) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidOrder,
            e.message,
            "order",
        ));
        return;
    }
    if spec.order > HIGH_ORDER_WARNING {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::HighOrder,
            format!(
                "order {} is above {}; section coefficients may lose precision",
                spec.order, HIGH_ORDER_WARNING
            ),
            "order",
        ));
    }
}

/// Returns true if the sample rate is usable for band checks.
fn validate_sample_rate(spec: &FilterSpec, result: &mut ValidationResult) -> bool {
    match validate_positive("sample_rate", spec.sample_rate) {
        Ok(()) => true,
        Err(e) => {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidSampleRate,
                e.message,
                "sample_rate",
            ));
            false
        }
    }
}

fn validate_family(family: &Family, result: &mut ValidationResult) {
    if let Some(ripple) = family.ripple_db() {
        if let Err(e) = validate_positive("ripple_db", ripple) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidRipple,
                e.message,
                "family.ripple_db",
            ));
        }
    }
    if let Some(stopband) = family.stopband_db() {
        if let Err(e) = validate_positive("stopband_db", stopband) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidAttenuation,
                e.message,
                "family.stopband_db",
            ));
        }
    }
    if let Family::Elliptic {
        ripple_db,
        stopband_db,
    } = *family
    {
        if ripple_db > 0.0 && stopband_db > 0.0 && ripple_db >= stopband_db {
            result.add_error(ValidationError::with_path(
                ErrorCode::RippleExceedsAttenuation,
                format!(
                    "ripple_db ({}) must be smaller than stopband_db ({})",
                    ripple_db, stopband_db
                ),
                "family",
            ));
        }
    }
}

fn validate_band(band: &Band, nyquist: f64, result: &mut ValidationResult) {
    match *band {
        Band::Lowpass { cutoff } | Band::Highpass { cutoff } => {
            check_frequency("band.cutoff", "cutoff", cutoff, nyquist, result);
        }
        Band::Bandpass { center, width } | Band::Bandstop { center, width } => {
            if let Err(e) = validate_positive("width", width) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidBandEdges,
                    e.message,
                    "band.width",
                ));
                return;
            }
            let low = center - width / 2.0;
            let high = center + width / 2.0;
            check_frequency("band.center", "lower band edge", low, nyquist, result);
            check_frequency("band.center", "upper band edge", high, nyquist, result);
        }
    }
}

fn check_frequency(
    path: &str,
    name: &str,
    value: f64,
    nyquist: f64,
    result: &mut ValidationResult,
) {
    if let Err(e) = validate_open_range(name, value, 0.0, nyquist) {
        result.add_error(ValidationError::with_path(
            ErrorCode::FrequencyOutOfRange,
            format!("{} (Nyquist is {} Hz)", e.message, nyquist),
            path,
        ));
        return;
    }
    if value > NEAR_NYQUIST_FRACTION * nyquist {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::NearNyquist,
            format!(
                "{} {} Hz is within 5% of Nyquist ({} Hz)",
                name, value, nyquist
            ),
            path,
        ));
    }
}
