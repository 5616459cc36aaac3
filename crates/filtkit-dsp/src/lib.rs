//! Filtkit DSP
//!
//! This crate designs classical analog-derived digital IIR filters and
//! applies them causally or with zero phase.
//!
//! # Overview
//!
//! A design runs through a fixed pipeline:
//!
//! - **Prototype** - normalized analog low-pass poles and zeros for
//!   Butterworth, Chebyshev I/II, Elliptic, or Bessel
//! - **Transform** - s-plane mapping to low-pass, high-pass, band-pass, or
//!   band-stop at pre-warped critical frequencies
//! - **Cascade** - bilinear discretization into second-order sections with
//!   the overall gain folded into the first section
//! - **Filtering** - single causal pass (`lfilter`, `sosfilt`) or
//!   forward-backward zero-phase filtering (`filtfilt`) with steady-state
//!   initial conditions
//!
//! # Determinism
//!
//! Every operation is a pure function of its inputs. Designing the same spec
//! twice yields bit-identical coefficients on the same platform.
//!
//! # Example
//!
//! ```
//! use filtkit_dsp::IirFilter;
//! use filtkit_spec::{Band, Family, FilterSpec};
//!
//! let spec = FilterSpec::new(Family::chebyshev1(0.5), Band::highpass(20.0), 5, 250.0);
//! let filter = IirFilter::design(&spec).unwrap();
//!
//! let x: Vec<f64> = (0..256).map(|i| (i as f64 * 0.3).sin()).collect();
//! let y = filter.filtfilt(&x).unwrap();
//! assert_eq!(y.len(), x.len());
//! ```
//!
//! # Crate Structure
//!
//! - [`IirFilter`] - Design facade
//! - [`prototype`] - Analog prototypes
//! - [`elliptic`] - Complete elliptic integral and Jacobi elliptic functions
//! - [`transform`] - Frequency transforms
//! - [`layout`] - Pole/zero section containers
//! - [`cascade`] - Bilinear transform and biquad cascades
//! - [`runtime`] - Per-section filter state
//! - [`steady_state`] - Initial conditions for zero-phase filtering
//! - [`filter`] - Single-pass filtering primitives
//! - [`filtfilt`] - Zero-phase filtering engine
//! - [`numeric`] - Polynomial roots and small linear solves

pub mod cascade;
pub mod design;
pub mod elliptic;
pub mod error;
pub mod filter;
pub mod filtfilt;
pub mod layout;
pub mod numeric;
pub mod prototype;
pub mod runtime;
pub mod steady_state;
pub mod tolerances;
pub mod transform;

// Re-export main types at crate root
pub use cascade::{bilinear, Biquad, Cascade};
pub use design::IirFilter;
pub use error::{DspError, DspResult};
pub use filter::{lfilter, sosfilt, sosfilt_with_state};
pub use filtfilt::{default_pad_len, filtfilt, Stage, ZeroPhaseEngine};
pub use layout::{AnalogLayout, Complex, ComplexPair, DigitalLayout, Normalization, PoleZeroPair};
pub use prototype::AnalogPrototype;
pub use runtime::{BiquadRuntime, Topology};
pub use steady_state::{lfilter_zi, sosfilt_zi, SeedMethod};
pub use tolerances::Tolerances;
pub use transform::FrequencyTransform;

/// Designs the SOS matrix for a spec.
///
/// Shorthand for `IirFilter::design(spec)?.sos()`.
pub fn design_sos(spec: &filtkit_spec::FilterSpec) -> DspResult<Vec<[f64; 6]>> {
    Ok(IirFilter::design(spec)?.sos())
}
