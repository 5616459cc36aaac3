//! Filtkit Filter Spec Library
//!
//! This crate provides the types, JSON parsing, and validation for IIR filter
//! design requests. A [`FilterSpec`] names a classical analog family, a
//! response shape in Hz, an order, and a sample rate.
//!
//! # Example
//!
//! ```
//! use filtkit_spec::{Band, Family, FilterSpec};
//! use filtkit_spec::validation::validate_filter_spec;
//!
//! let spec = FilterSpec::new(Family::elliptic(1.0, 40.0), Band::bandpass(35.0, 20.0), 4, 250.0);
//! let result = validate_filter_spec(&spec);
//! assert!(result.is_ok());
//!
//! let json = spec.to_json().unwrap();
//! assert_eq!(FilterSpec::from_json(&json).unwrap(), spec);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`family`]: Filter family and Bessel normalization
//! - [`band`]: Response shape and critical frequencies
//! - [`options`]: Zero-phase filtering options
//! - [`spec`]: The design request type
//! - [`validation`]: Spec validation functions

pub mod band;
pub mod error;
pub mod family;
pub mod options;
pub mod spec;
pub mod validation;

pub use band::{Band, BandKind};
pub use error::{
    CodedError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use family::{BesselNorm, Family};
pub use options::{FiltfiltOptions, PadType};
pub use spec::{FilterSpec, HIGH_ORDER_WARNING, MAX_ORDER};
pub use validation::validate_filter_spec;
