//! Scalar checks shared by spec validation and the design entry points.

use std::fmt;

/// Error type for scalar parameter checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that a filter order is in `[1, max]`.
///
/// # Example
/// ```
/// use filtkit_spec::validation::common::validate_order;
///
/// assert!(validate_order(4, 24).is_ok());
/// assert!(validate_order(0, 24).is_err());
/// assert!(validate_order(25, 24).is_err());
/// ```
pub fn validate_order(order: u32, max: u32) -> Result<(), CommonValidationError> {
    if order == 0 {
        return Err(CommonValidationError::new("order must be at least 1"));
    }
    if order > max {
        return Err(CommonValidationError::new(format!(
            "order must be at most {}, got {}",
            max, order
        )));
    }
    Ok(())
}

/// Validate that a value is positive (> 0) and finite.
///
/// # Example
/// ```
/// use filtkit_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("ripple_db", 1.0).is_ok());
/// assert!(validate_positive("ripple_db", 0.0).is_err());
/// assert!(validate_positive("ripple_db", f64::NAN).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value lies strictly inside `(min, max)`.
///
/// # Example
/// ```
/// use filtkit_spec::validation::common::validate_open_range;
///
/// assert!(validate_open_range("cutoff", 20.0, 0.0, 125.0).is_ok());
/// assert!(validate_open_range("cutoff", 125.0, 0.0, 125.0).is_err());
/// assert!(validate_open_range("cutoff", 0.0, 0.0, 125.0).is_err());
/// ```
pub fn validate_open_range(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    if value <= min || value >= max {
        return Err(CommonValidationError::new(format!(
            "{} must be in ({}, {}), got {}",
            name, min, max, value
        )));
    }
    Ok(())
}
